//! Wire form of commands
//!
//! A record is `{ id?, cmd, data? }`: without `id` it addresses every
//! sound, with `id` a single one.

use serde::{Deserialize, Serialize};

use crate::registry::SoundId;

use super::error::CommandError;

/// Command payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Bool(bool),
    Number(f64),
}

impl From<bool> for Datum {
    fn from(value: bool) -> Self {
        Datum::Bool(value)
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::Number(value)
    }
}

/// Untyped command record as exchanged with the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Target sound; absent for a broadcast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SoundId>,

    /// Operation name
    pub cmd: String,

    /// Operation argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Datum>,
}

impl CommandRecord {
    /// Create a record
    pub fn new(id: Option<SoundId>, cmd: impl Into<String>, data: Option<Datum>) -> Self {
        Self {
            id,
            cmd: cmd.into(),
            data,
        }
    }

    /// Decode a record from JSON
    pub fn from_json(json: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the record as JSON
    pub fn to_json(&self) -> Result<String, CommandError> {
        Ok(serde_json::to_string(self)?)
    }
}
