//! Sound handles
//!
//! A handle owns exactly one media element. Unloading detaches the
//! element's source; from then on every control on the handle is a no-op.

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

use crate::error::Result;
use crate::media::{MediaElement, MediaError, NativeEvent, Preload};

use super::playback::Playback;
use super::state::PlaybackState;

/// Identifier of a sound within one registry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SoundId(u32);

impl SoundId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for SoundId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One playback resource with a stable id
pub struct SoundHandle<E: MediaElement> {
    id: SoundId,
    src: String,
    element: E,
    released: watch::Sender<bool>,
}

impl<E: MediaElement> SoundHandle<E> {
    /// Take ownership of `element` and point it at `src`
    pub fn new(
        id: SoundId,
        src: impl Into<String>,
        element: E,
        preload: Preload,
        autoplay: bool,
    ) -> Self {
        let src = src.into();
        element.set_autoplay(autoplay);
        element.set_preload(preload);
        element.set_src(&src);

        let (released, _) = watch::channel(false);

        Self {
            id,
            src,
            element,
            released,
        }
    }

    pub fn id(&self) -> SoundId {
        self.id
    }

    /// Source locator the handle was created with
    pub fn src(&self) -> &str {
        &self.src
    }

    /// The owned element
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Snapshot the element's playback attributes
    pub fn state(&self) -> PlaybackState {
        PlaybackState::read(self.id, &self.element)
    }

    /// Subscribe to the element's native events
    pub fn subscribe(&self) -> broadcast::Receiver<NativeEvent> {
        self.element.subscribe()
    }

    /// Watch for the handle being unloaded
    pub fn released(&self) -> watch::Receiver<bool> {
        self.released.subscribe()
    }

    pub fn is_released(&self) -> bool {
        *self.released.borrow()
    }

    /// Detach the element's source, releasing the resource
    ///
    /// Idempotent.
    pub fn unload(&self) {
        if self.is_released() {
            return;
        }

        self.element.set_src("");
        self.released.send_replace(true);
        tracing::trace!(sound_id = %self.id, src = %self.src, "Sound unloaded");
    }

    /// Run `op` against the element unless the handle is released
    pub(crate) fn with_element<F>(&self, op: &'static str, f: F) -> std::result::Result<(), MediaError>
    where
        F: FnOnce(&E) -> std::result::Result<(), MediaError>,
    {
        if self.is_released() {
            tracing::trace!(sound_id = %self.id, op = op, "Ignoring operation on unloaded sound");
            return Ok(());
        }

        f(&self.element)
    }
}

impl<E: MediaElement> Playback for SoundHandle<E> {
    fn set_current_time(&self, value: f64) -> Result<()> {
        self.with_element("setCurrentTime", |e| e.set_current_time(value))?;
        Ok(())
    }

    fn set_loop(&self, value: bool) -> Result<()> {
        self.with_element("setLoop", |e| {
            e.set_loop(value);
            Ok(())
        })?;
        Ok(())
    }

    fn set_muted(&self, value: bool) -> Result<()> {
        self.with_element("setMuted", |e| {
            e.set_muted(value);
            Ok(())
        })?;
        Ok(())
    }

    fn set_playback_rate(&self, value: f64) -> Result<()> {
        self.with_element("setPlaybackRate", |e| e.set_playback_rate(value))?;
        Ok(())
    }

    fn set_volume(&self, value: f64) -> Result<()> {
        self.with_element("setVolume", |e| e.set_volume(value))?;
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.with_element("play", |e| e.play())?;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.with_element("pause", |e| {
            e.pause();
            Ok(())
        })?;
        Ok(())
    }
}

impl<E: MediaElement> std::fmt::Debug for SoundHandle<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundHandle")
            .field("id", &self.id)
            .field("src", &self.src)
            .field("released", &self.is_released())
            .finish()
    }
}
