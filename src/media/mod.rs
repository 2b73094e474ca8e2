//! Native media resources
//!
//! This module provides:
//! - The [`MediaElement`] and [`MediaBackend`] traits the driver controls
//! - The native event vocabulary and attribute types
//! - A simulated backend for headless playback

pub mod element;
pub mod error;
pub mod event;
pub mod simulated;
pub mod types;

pub use element::{MediaBackend, MediaElement};
pub use error::MediaError;
pub use event::{MediaEventKind, NativeEvent, UnknownEventKind};
pub use simulated::{SimulatedBackend, SimulatedConfig, SimulatedElement};
pub use types::{Preload, ReadyState, TimeRanges};
