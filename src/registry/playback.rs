//! Playback capability set
//!
//! The operations a command can invoke. Implemented by a single
//! [`SoundHandle`](super::SoundHandle) and by the
//! [`SoundRegistry`](super::SoundRegistry), where each call is broadcast to
//! every live sound.

use crate::error::Result;

/// Controls shared by one sound and the whole registry
pub trait Playback {
    /// Seek to a position in seconds
    fn set_current_time(&self, value: f64) -> Result<()>;

    fn set_loop(&self, value: bool) -> Result<()>;

    fn set_muted(&self, value: bool) -> Result<()>;

    fn set_playback_rate(&self, value: f64) -> Result<()>;

    /// Set volume in `[0, 1]`
    fn set_volume(&self, value: f64) -> Result<()>;

    /// Request playback; completion is observed through events
    fn play(&self) -> Result<()>;

    fn pause(&self) -> Result<()>;
}
