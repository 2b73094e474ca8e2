//! Registry error types
//!
//! Error types for sound registry operations.

use crate::media::MediaError;

use super::handle::SoundId;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// No live sound with this id
    SoundNotFound(SoundId),
    /// A broadcast reached every live sound but some rejected it
    BroadcastFailed(Vec<(SoundId, MediaError)>),
    /// Every id has been handed out
    IdsExhausted,
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::SoundNotFound(id) => write!(f, "Sound not found: {}", id),
            RegistryError::BroadcastFailed(failures) => {
                write!(f, "Broadcast failed for {} sound(s)", failures.len())?;
                for (id, err) in failures {
                    write!(f, "; {}: {}", id, err)?;
                }
                Ok(())
            }
            RegistryError::IdsExhausted => write!(f, "Sound ids exhausted"),
        }
    }
}

impl std::error::Error for RegistryError {}
