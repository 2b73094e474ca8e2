//! Event projection
//!
//! A [`SoundStream`] is the per-sound event sequence handed to the
//! application. Every native event is tagged with the sound id and a state
//! snapshot read at the moment the event is forwarded, so the snapshot
//! reflects the element as the consumer sees it, not as it was when the
//! event fired.

use std::sync::{Arc, Weak};

use serde::Serialize;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, watch};

use crate::command::{Action, Command};
use crate::media::{MediaBackend, MediaElement, MediaError, MediaEventKind, NativeEvent};
use crate::registry::{PlaybackState, SoundHandle, SoundId, SoundRegistry};

/// A native event tagged with its sound and a state snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioEvent {
    #[serde(rename = "type")]
    pub kind: MediaEventKind,
    /// Milliseconds since the element was created
    #[serde(rename = "timeStamp")]
    pub time_stamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MediaError>,
    pub id: SoundId,
    pub state: PlaybackState,
}

impl AudioEvent {
    /// Tag `event` with `handle`'s id and current state
    pub fn project<E: MediaElement>(event: NativeEvent, handle: &SoundHandle<E>) -> Self {
        Self {
            kind: event.kind,
            time_stamp: event.time_stamp,
            error: event.error,
            id: handle.id(),
            state: handle.state(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

enum Next {
    Event(std::result::Result<NativeEvent, RecvError>),
    Released,
}

/// Event sequence of one sound, with command builders bound to its id
///
/// Dropping the stream deletes the sound from the registry unless the
/// driver was configured to keep sounds alive.
pub struct SoundStream<B: MediaBackend> {
    handle: Arc<SoundHandle<B::Element>>,
    events: broadcast::Receiver<NativeEvent>,
    released: watch::Receiver<bool>,
    registry: Weak<SoundRegistry<B>>,
    release_on_drop: bool,
}

impl<B: MediaBackend> SoundStream<B> {
    pub(crate) fn new(
        handle: Arc<SoundHandle<B::Element>>,
        events: broadcast::Receiver<NativeEvent>,
        registry: &Arc<SoundRegistry<B>>,
        release_on_drop: bool,
    ) -> Self {
        let released = handle.released();

        Self {
            handle,
            events,
            released,
            registry: Arc::downgrade(registry),
            release_on_drop,
        }
    }

    pub fn id(&self) -> SoundId {
        self.handle.id()
    }

    /// The underlying sound
    pub fn handle(&self) -> &Arc<SoundHandle<B::Element>> {
        &self.handle
    }

    /// Snapshot the sound's state now
    pub fn state(&self) -> PlaybackState {
        self.handle.state()
    }

    /// Receive the next event
    ///
    /// Returns `None` once the sound has been unloaded and every event
    /// raised before the unload has been delivered.
    pub async fn recv(&mut self) -> Option<AudioEvent> {
        loop {
            // Buffered events win over the release signal
            let next = tokio::select! {
                biased;
                result = self.events.recv() => Next::Event(result),
                _ = self.released.wait_for(|released| *released) => Next::Released,
            };

            match next {
                Next::Event(Ok(event)) => return Some(self.project(event)),
                Next::Event(Err(RecvError::Lagged(skipped))) => {
                    tracing::warn!(
                        sound_id = %self.id(),
                        skipped = skipped,
                        "Event consumer lagging, skipped events"
                    );
                }
                Next::Event(Err(RecvError::Closed)) => return None,
                // The events an unload raises are sent before the flag flips,
                // so they may still be buffered here
                Next::Released => return self.try_recv(),
            }
        }
    }

    /// Receive an already buffered event without waiting
    pub fn try_recv(&mut self) -> Option<AudioEvent> {
        loop {
            match self.events.try_recv() {
                Ok(event) => return Some(self.project(event)),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        sound_id = %self.id(),
                        skipped = skipped,
                        "Event consumer lagging, skipped events"
                    );
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    fn project(&self, event: NativeEvent) -> AudioEvent {
        tracing::trace!(sound_id = %self.id(), event = %event.kind, "Projecting event");
        AudioEvent::project(event, &self.handle)
    }

    pub fn play(&self) -> Command {
        Command::to(self.id(), Action::Play)
    }

    pub fn pause(&self) -> Command {
        Command::to(self.id(), Action::Pause)
    }

    pub fn set_current_time(&self, value: f64) -> Command {
        Command::to(self.id(), Action::SetCurrentTime(value))
    }

    pub fn set_loop(&self, value: bool) -> Command {
        Command::to(self.id(), Action::SetLoop(value))
    }

    pub fn set_muted(&self, value: bool) -> Command {
        Command::to(self.id(), Action::SetMuted(value))
    }

    pub fn set_playback_rate(&self, value: f64) -> Command {
        Command::to(self.id(), Action::SetPlaybackRate(value))
    }

    pub fn set_volume(&self, value: f64) -> Command {
        Command::to(self.id(), Action::SetVolume(value))
    }
}

impl<B: MediaBackend> Drop for SoundStream<B> {
    fn drop(&mut self) {
        if !self.release_on_drop {
            return;
        }

        if let Some(registry) = self.registry.upgrade() {
            tracing::debug!(sound_id = %self.id(), "Sound stream dropped, releasing sound");
            registry.del(self.id());
        }
    }
}

impl<B: MediaBackend> std::fmt::Debug for SoundStream<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundStream")
            .field("id", &self.id())
            .field("release_on_drop", &self.release_on_drop)
            .finish()
    }
}
