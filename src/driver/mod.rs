//! Audio driver
//!
//! Connects the application's command sink to the sound registry and hands
//! out per-sound event streams.
//!
//! ```text
//!   mpsc::Sender<Command> ──► [CommandDispatcher] ──► SoundRegistry ──► elements
//!                                                                        │
//!   SoundStream::recv() ◄── AudioEvent { id, state } ◄── NativeEvent ◄───┘
//! ```
//!
//! Closing the sink unloads every sound. Dropping a [`SoundStream`] deletes
//! its sound unless [`DriverConfig::keep_on_drop`] is set.

pub mod config;
pub mod dispatcher;
pub mod projector;
pub mod source;

pub use config::DriverConfig;
pub use dispatcher::{CommandDispatcher, Outcome};
pub use projector::{AudioEvent, SoundStream};
pub use source::{audio_driver, AudioDriver, AudioSource};
