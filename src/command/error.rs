//! Command error types

/// Error resolving a command record to an operation
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// `cmd` names no operation in the vocabulary
    UnknownCommand(String),
    /// The operation takes a datum but none was given
    MissingData { cmd: &'static str },
    /// The datum has the wrong type for the operation
    InvalidData {
        cmd: &'static str,
        expected: &'static str,
    },
    /// The record could not be decoded at all
    Malformed(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::UnknownCommand(cmd) => write!(f, "Unknown command: {}", cmd),
            CommandError::MissingData { cmd } => write!(f, "Command {} requires data", cmd),
            CommandError::InvalidData { cmd, expected } => {
                write!(f, "Command {} expects {} data", cmd, expected)
            }
            CommandError::Malformed(msg) => write!(f, "Malformed command record: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::Malformed(err.to_string())
    }
}
