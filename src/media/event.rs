//! Native media events
//!
//! The event vocabulary a media element raises, using the host's event names.

use serde::Serialize;

use super::error::MediaError;

/// Kind of native media event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaEventKind {
    Abort,
    CanPlay,
    CanPlayThrough,
    DurationChange,
    Emptied,
    Ended,
    Error,
    LoadedData,
    LoadedMetadata,
    LoadStart,
    Pause,
    Play,
    Playing,
    Progress,
    RateChange,
    Seeked,
    Seeking,
    Stalled,
    Suspend,
    TimeUpdate,
    VolumeChange,
    Waiting,
}

impl MediaEventKind {
    /// Every event kind, in host documentation order
    pub const ALL: [MediaEventKind; 22] = [
        MediaEventKind::Abort,
        MediaEventKind::CanPlay,
        MediaEventKind::CanPlayThrough,
        MediaEventKind::DurationChange,
        MediaEventKind::Emptied,
        MediaEventKind::Ended,
        MediaEventKind::Error,
        MediaEventKind::LoadedData,
        MediaEventKind::LoadedMetadata,
        MediaEventKind::LoadStart,
        MediaEventKind::Pause,
        MediaEventKind::Play,
        MediaEventKind::Playing,
        MediaEventKind::Progress,
        MediaEventKind::RateChange,
        MediaEventKind::Seeked,
        MediaEventKind::Seeking,
        MediaEventKind::Stalled,
        MediaEventKind::Suspend,
        MediaEventKind::TimeUpdate,
        MediaEventKind::VolumeChange,
        MediaEventKind::Waiting,
    ];

    /// Host event name
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaEventKind::Abort => "abort",
            MediaEventKind::CanPlay => "canplay",
            MediaEventKind::CanPlayThrough => "canplaythrough",
            MediaEventKind::DurationChange => "durationchange",
            MediaEventKind::Emptied => "emptied",
            MediaEventKind::Ended => "ended",
            MediaEventKind::Error => "error",
            MediaEventKind::LoadedData => "loadeddata",
            MediaEventKind::LoadedMetadata => "loadedmetadata",
            MediaEventKind::LoadStart => "loadstart",
            MediaEventKind::Pause => "pause",
            MediaEventKind::Play => "play",
            MediaEventKind::Playing => "playing",
            MediaEventKind::Progress => "progress",
            MediaEventKind::RateChange => "ratechange",
            MediaEventKind::Seeked => "seeked",
            MediaEventKind::Seeking => "seeking",
            MediaEventKind::Stalled => "stalled",
            MediaEventKind::Suspend => "suspend",
            MediaEventKind::TimeUpdate => "timeupdate",
            MediaEventKind::VolumeChange => "volumechange",
            MediaEventKind::Waiting => "waiting",
        }
    }
}

impl std::fmt::Display for MediaEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaEventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaEventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

/// Returned when parsing an event name outside the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(pub String);

impl std::fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown media event: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

/// An event raised by a media element
#[derive(Debug, Clone, PartialEq)]
pub struct NativeEvent {
    /// Event kind
    pub kind: MediaEventKind,
    /// Milliseconds since the element was created
    pub time_stamp: f64,
    /// Error details (only for `error` events)
    pub error: Option<MediaError>,
}

impl NativeEvent {
    /// Create an event without error details
    pub fn new(kind: MediaEventKind, time_stamp: f64) -> Self {
        Self {
            kind,
            time_stamp,
            error: None,
        }
    }

    /// Create an `error` event
    pub fn error(error: MediaError, time_stamp: f64) -> Self {
        Self {
            kind: MediaEventKind::Error,
            time_stamp,
            error: Some(error),
        }
    }
}
