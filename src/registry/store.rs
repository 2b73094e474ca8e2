//! Sound registry implementation
//!
//! The registry owns every live sound, hands out ids and applies broadcast
//! controls.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::error::Result;
use crate::media::{MediaBackend, MediaElement, MediaError, NativeEvent, Preload};

use super::error::RegistryError;
use super::handle::{SoundHandle, SoundId};
use super::playback::Playback;

/// Element options applied to every sound the registry creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementOptions {
    /// Preload hint
    pub preload: Preload,
    /// Whether elements start playing on their own once loaded
    pub autoplay: bool,
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            preload: Preload::Auto,
            autoplay: false,
        }
    }
}

type Handle<B> = Arc<SoundHandle<<B as MediaBackend>::Element>>;

/// Central registry for all live sounds
///
/// Ids come from a counter that only grows, so an id is never handed out
/// twice by the same registry, even after `del` or `unload`.
pub struct SoundRegistry<B: MediaBackend> {
    /// Live sounds, in id order
    sounds: Mutex<BTreeMap<SoundId, Handle<B>>>,

    /// Next id to assign
    next_id: AtomicU32,

    /// Element factory
    backend: B,

    /// Options for new elements
    options: ElementOptions,
}

impl<B: MediaBackend> SoundRegistry<B> {
    /// Create an empty registry with default element options
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, ElementOptions::default())
    }

    /// Create an empty registry with custom element options
    pub fn with_options(backend: B, options: ElementOptions) -> Self {
        Self {
            sounds: Mutex::new(BTreeMap::new()),
            next_id: AtomicU32::new(0),
            backend,
            options,
        }
    }

    fn sounds(&self) -> MutexGuard<'_, BTreeMap<SoundId, Handle<B>>> {
        self.sounds.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the element backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create a sound for `src` and store it under the next id
    ///
    /// Fails once the id space is used up; ids never wrap around.
    pub fn add(&self, src: &str) -> std::result::Result<Handle<B>, RegistryError> {
        self.add_subscribed(src).map(|(handle, _)| handle)
    }

    /// Like [`add`](Self::add), also returning an event receiver that was
    /// subscribed before the source was assigned, so no load event is missed
    pub fn add_subscribed(
        &self,
        src: &str,
    ) -> std::result::Result<(Handle<B>, broadcast::Receiver<NativeEvent>), RegistryError> {
        let mut sounds = self.sounds();
        let id = self
            .next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map(SoundId::new)
            .map_err(|_| {
                tracing::error!(src = %src, sounds = sounds.len(), "Sound ids exhausted");
                RegistryError::IdsExhausted
            })?;

        let element = self.backend.create_element();
        let events = element.subscribe();
        let handle = Arc::new(SoundHandle::new(
            id,
            src,
            element,
            self.options.preload,
            self.options.autoplay,
        ));
        sounds.insert(id, Arc::clone(&handle));

        tracing::info!(
            sound_id = %id,
            src = %src,
            sounds = sounds.len(),
            "Sound added"
        );

        Ok((handle, events))
    }

    /// Get a live sound
    pub fn get(&self, id: SoundId) -> Option<Handle<B>> {
        self.sounds().get(&id).cloned()
    }

    /// Get a live sound, failing if the id is unknown or deleted
    pub fn try_get(&self, id: SoundId) -> std::result::Result<Handle<B>, RegistryError> {
        self.get(id).ok_or(RegistryError::SoundNotFound(id))
    }

    /// Unload a sound and clear its slot
    ///
    /// Returns `false` if no live sound has this id.
    pub fn del(&self, id: SoundId) -> bool {
        let removed = self.sounds().remove(&id);

        match removed {
            Some(handle) => {
                handle.unload();
                tracing::info!(sound_id = %id, "Sound deleted");
                true
            }
            None => {
                tracing::debug!(sound_id = %id, "Delete ignored, no such sound");
                false
            }
        }
    }

    /// Unload every live sound, leaving the registry empty
    pub fn unload(&self) {
        let drained = std::mem::take(&mut *self.sounds());

        for handle in drained.values() {
            handle.unload();
        }

        tracing::info!(unloaded = drained.len(), "Registry unloaded");
    }

    /// Number of live sounds
    pub fn len(&self) -> usize {
        self.sounds().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds().is_empty()
    }

    /// Ids of live sounds, in ascending order
    pub fn ids(&self) -> Vec<SoundId> {
        self.sounds().keys().copied().collect()
    }

    /// Id the next `add` will assign
    pub fn next_id(&self) -> SoundId {
        SoundId::new(self.next_id.load(Ordering::Relaxed))
    }

    /// Apply `f` to every live sound in id order
    ///
    /// A sound that rejects the operation does not stop the broadcast;
    /// failures are collected and returned together.
    fn broadcast<F>(&self, op: &'static str, f: F) -> Result<()>
    where
        F: Fn(&SoundHandle<B::Element>) -> std::result::Result<(), MediaError>,
    {
        // Snapshot so element callbacks run without the registry lock
        let handles: Vec<_> = self.sounds().values().cloned().collect();
        let mut failures = Vec::new();

        for handle in &handles {
            if let Err(e) = f(handle.as_ref()) {
                tracing::warn!(
                    sound_id = %handle.id(),
                    op = op,
                    error = %e,
                    "Broadcast operation rejected"
                );
                failures.push((handle.id(), e));
            }
        }

        tracing::debug!(
            op = op,
            sounds = handles.len(),
            failed = failures.len(),
            "Broadcast applied"
        );

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::BroadcastFailed(failures).into())
        }
    }
}

impl<B: MediaBackend> Playback for SoundRegistry<B> {
    fn set_current_time(&self, value: f64) -> Result<()> {
        self.broadcast("setCurrentTime", |h| {
            h.with_element("setCurrentTime", |e| e.set_current_time(value))
        })
    }

    fn set_loop(&self, value: bool) -> Result<()> {
        self.broadcast("setLoop", |h| {
            h.with_element("setLoop", |e| {
                e.set_loop(value);
                Ok(())
            })
        })
    }

    fn set_muted(&self, value: bool) -> Result<()> {
        self.broadcast("setMuted", |h| {
            h.with_element("setMuted", |e| {
                e.set_muted(value);
                Ok(())
            })
        })
    }

    fn set_playback_rate(&self, value: f64) -> Result<()> {
        self.broadcast("setPlaybackRate", |h| {
            h.with_element("setPlaybackRate", |e| e.set_playback_rate(value))
        })
    }

    fn set_volume(&self, value: f64) -> Result<()> {
        self.broadcast("setVolume", |h| {
            h.with_element("setVolume", |e| e.set_volume(value))
        })
    }

    fn play(&self) -> Result<()> {
        self.broadcast("play", |h| h.with_element("play", |e| e.play()))
    }

    fn pause(&self) -> Result<()> {
        self.broadcast("pause", |h| {
            h.with_element("pause", |e| {
                e.pause();
                Ok(())
            })
        })
    }
}
