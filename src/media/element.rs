//! Media element abstraction
//!
//! A [`MediaElement`] is the imperative API of one native playback resource.
//! Setters take `&self`: an element is shared between the registry that
//! controls it and the streams that observe it, so implementations use
//! interior mutability the way a host media object does.

use tokio::sync::broadcast;

use super::error::MediaError;
use super::event::NativeEvent;
use super::types::{Preload, ReadyState, TimeRanges};

/// One native playback resource
pub trait MediaElement: Send + Sync + 'static {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Seek to a position in seconds
    fn set_current_time(&self, value: f64) -> Result<(), MediaError>;

    /// Duration in seconds (`NaN` until metadata is known)
    fn duration(&self) -> f64;

    /// Whether playback reached the end
    fn ended(&self) -> bool;

    fn looping(&self) -> bool;

    fn set_loop(&self, value: bool);

    fn muted(&self) -> bool;

    fn set_muted(&self, value: bool);

    fn paused(&self) -> bool;

    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&self, value: f64) -> Result<(), MediaError>;

    /// Ranges of the resource that have been played
    fn played(&self) -> TimeRanges;

    fn preload(&self) -> Preload;

    fn set_preload(&self, value: Preload);

    fn autoplay(&self) -> bool;

    fn set_autoplay(&self, value: bool);

    fn ready_state(&self) -> ReadyState;

    /// Ranges the element can seek to
    fn seekable(&self) -> TimeRanges;

    fn seeking(&self) -> bool;

    /// Source locator (empty when detached)
    fn src(&self) -> String;

    /// Assign a source locator; an empty string detaches the resource
    fn set_src(&self, src: &str);

    fn volume(&self) -> f64;

    fn set_volume(&self, value: f64) -> Result<(), MediaError>;

    /// Request playback
    ///
    /// Playback starts asynchronously; failures after this returns are
    /// reported through `error` events.
    fn play(&self) -> Result<(), MediaError>;

    /// Pause playback
    fn pause(&self);

    /// Subscribe to the element's events
    fn subscribe(&self) -> broadcast::Receiver<NativeEvent>;
}

/// Factory for media elements
pub trait MediaBackend: Send + Sync + 'static {
    type Element: MediaElement;

    /// Create a fresh element with no source
    fn create_element(&self) -> Self::Element;
}

impl<B: MediaBackend> MediaBackend for std::sync::Arc<B> {
    type Element = B::Element;

    fn create_element(&self) -> Self::Element {
        (**self).create_element()
    }
}
