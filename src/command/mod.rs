//! Commands
//!
//! Commands arrive as [`CommandRecord`]s (`{ id?, cmd, data? }`) and are
//! resolved to a typed [`Command`] before dispatch. Resolution fails for
//! names outside the vocabulary and for missing or mistyped data.

pub mod action;
pub mod error;
pub mod record;

pub use action::{Action, Command, IntoCommand};
pub use error::CommandError;
pub use record::{CommandRecord, Datum};
