//! Sound registry
//!
//! The registry owns every live sound handle, assigns ids, and applies
//! controls either to one sound or to all of them.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<SoundRegistry>
//!                   ┌──────────────────────────┐
//!                   │ sounds: BTreeMap<Id,     │
//!                   │   SoundHandle {          │
//!                   │     element,             │
//!                   │     released: watch::Tx, │
//!                   │   }                      │
//!                   │ >                        │
//!                   │ next_id: AtomicU32       │
//!                   └────────────┬─────────────┘
//!                                │
//!         ┌──────────────────────┼──────────────────────┐
//!         │                      │                      │
//!         ▼                      ▼                      ▼
//!   [Dispatcher]           [SoundStream]          [SoundStream]
//!   get(id) / broadcast    events.recv()          events.recv()
//!                          del(id) on drop        del(id) on drop
//! ```
//!
//! Ids are never reused: deleting a sound leaves a hole, and the next
//! `add` still takes the next counter value.

pub mod error;
pub mod handle;
pub mod playback;
pub mod state;
pub mod store;

pub use error::RegistryError;
pub use handle::{SoundHandle, SoundId};
pub use playback::Playback;
pub use state::PlaybackState;
pub use store::{ElementOptions, SoundRegistry};
