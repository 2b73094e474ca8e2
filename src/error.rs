//! Crate-level error type
//!
//! Module errors convert into [`Error`] so callers can use `?` across
//! media, registry and command operations.

use crate::command::CommandError;
use crate::media::MediaError;
use crate::registry::RegistryError;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The media element rejected an operation
    Media(MediaError),
    /// Registry operation failed
    Registry(RegistryError),
    /// A command record could not be resolved to an operation
    Command(CommandError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Media(e) => write!(f, "Media error: {}", e),
            Error::Registry(e) => write!(f, "Registry error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Media(e) => Some(e),
            Error::Registry(e) => Some(e),
            Error::Command(e) => Some(e),
        }
    }
}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        Error::Registry(err)
    }
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Error::Command(err)
    }
}
