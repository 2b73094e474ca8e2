//! Stream-driven audio playback
//!
//! The application controls a set of sounds by sending commands into a
//! single sink and observes each sound through its own event stream.
//!
//! - [`command`]: the `{ id?, cmd, data? }` command records and their typed form
//! - [`registry`]: live sounds, id assignment and broadcast controls
//! - [`media`]: the media element seam and a simulated backend
//! - [`driver`]: the dispatcher and per-sound event streams
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use audio_driver::media::{MediaEventKind, SimulatedBackend, SimulatedConfig};
//! use audio_driver::{audio_driver, Command};
//! use tokio::sync::mpsc;
//!
//! # async fn example() {
//! let config = SimulatedConfig::default().source("intro.mp3", Duration::from_secs(12));
//! let backend = Arc::new(SimulatedBackend::new(config));
//! let _clock = backend.spawn_clock();
//!
//! let (commands, sink) = mpsc::channel::<Command>(32);
//! let source = audio_driver(sink, Arc::clone(&backend));
//!
//! let mut sound = source.sound("intro.mp3").unwrap();
//! commands.send(sound.play()).await.unwrap();
//!
//! while let Some(event) = sound.recv().await {
//!     if event.kind == MediaEventKind::TimeUpdate {
//!         println!("{} at {:.2}s", event.id, event.state.current_time);
//!     }
//! }
//! # }
//! ```

pub mod command;
pub mod driver;
pub mod error;
pub mod media;
pub mod registry;

pub use command::{Action, Command, CommandRecord, Datum};
pub use driver::{audio_driver, AudioDriver, AudioEvent, AudioSource, DriverConfig, SoundStream};
pub use error::{Error, Result};
pub use registry::{Playback, PlaybackState, SoundId, SoundRegistry};
