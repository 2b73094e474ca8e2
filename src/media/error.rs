//! Media element error types
//!
//! Covers both the error codes a media element reports through its `error`
//! event and the exceptions its setters raise synchronously.

use serde::Serialize;

/// Error raised by or reported from a media element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name")]
pub enum MediaError {
    /// Fetching was aborted at the user's request (code 1)
    Aborted,
    /// A network error stopped fetching (code 2)
    Network { message: String },
    /// The resource could not be decoded (code 3)
    Decode { message: String },
    /// The source is missing or unusable (code 4)
    SrcNotSupported { message: String },
    /// A numeric attribute was assigned a value outside its range
    IndexSize { property: &'static str, value: f64 },
    /// The element cannot perform the operation in its current state
    NotSupported { message: String },
    /// The host refused the operation (e.g. autoplay policy)
    NotAllowed { message: String },
}

impl MediaError {
    /// Media error code, for errors delivered through `error` events
    pub fn code(&self) -> Option<u16> {
        match self {
            MediaError::Aborted => Some(1),
            MediaError::Network { .. } => Some(2),
            MediaError::Decode { .. } => Some(3),
            MediaError::SrcNotSupported { .. } => Some(4),
            MediaError::IndexSize { .. }
            | MediaError::NotSupported { .. }
            | MediaError::NotAllowed { .. } => None,
        }
    }
}

impl std::fmt::Display for MediaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaError::Aborted => write!(f, "Fetching aborted"),
            MediaError::Network { message } => write!(f, "Network error: {}", message),
            MediaError::Decode { message } => write!(f, "Decode error: {}", message),
            MediaError::SrcNotSupported { message } => {
                write!(f, "Source not supported: {}", message)
            }
            MediaError::IndexSize { property, value } => {
                write!(f, "{} value {} is out of range", property, value)
            }
            MediaError::NotSupported { message } => write!(f, "Not supported: {}", message),
            MediaError::NotAllowed { message } => write!(f, "Not allowed: {}", message),
        }
    }
}

impl std::error::Error for MediaError {}
