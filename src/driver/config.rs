//! Driver configuration

use crate::media::Preload;
use crate::registry::ElementOptions;

/// Driver configuration options
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Delete a sound from the registry when its event stream is dropped
    pub release_on_drop: bool,

    /// Preload hint for new elements
    pub preload: Preload,

    /// Whether new elements start playing on their own once loaded
    pub autoplay: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            release_on_drop: true,
            preload: Preload::Auto, // Eager, so sounds are ready when played
            autoplay: false,
        }
    }
}

impl DriverConfig {
    /// Keep sounds alive after their streams are dropped
    pub fn keep_on_drop(mut self) -> Self {
        self.release_on_drop = false;
        self
    }

    /// Set the preload hint
    pub fn preload(mut self, preload: Preload) -> Self {
        self.preload = preload;
        self
    }

    /// Set autoplay
    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Options the registry applies to each new element
    pub fn element_options(&self) -> ElementOptions {
        ElementOptions {
            preload: self.preload,
            autoplay: self.autoplay,
        }
    }
}
