//! Typed command vocabulary

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{Playback, SoundId};

use super::error::CommandError;
use super::record::{CommandRecord, Datum};

/// An operation from the playback capability set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SetCurrentTime(f64),
    SetLoop(bool),
    SetMuted(bool),
    SetPlaybackRate(f64),
    SetVolume(f64),
    Play,
    Pause,
}

impl Action {
    /// Every operation name in the vocabulary
    pub const NAMES: [&'static str; 7] = [
        "setCurrentTime",
        "setLoop",
        "setMuted",
        "setPlaybackRate",
        "setVolume",
        "play",
        "pause",
    ];

    /// Wire name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCurrentTime(_) => "setCurrentTime",
            Action::SetLoop(_) => "setLoop",
            Action::SetMuted(_) => "setMuted",
            Action::SetPlaybackRate(_) => "setPlaybackRate",
            Action::SetVolume(_) => "setVolume",
            Action::Play => "play",
            Action::Pause => "pause",
        }
    }

    /// Argument carried on the wire, if any
    pub fn data(&self) -> Option<Datum> {
        match *self {
            Action::SetCurrentTime(v) | Action::SetPlaybackRate(v) | Action::SetVolume(v) => {
                Some(Datum::Number(v))
            }
            Action::SetLoop(v) | Action::SetMuted(v) => Some(Datum::Bool(v)),
            Action::Play | Action::Pause => None,
        }
    }

    /// Resolve an operation name and datum
    ///
    /// Operations without an argument ignore `data`.
    pub fn parse(cmd: &str, data: Option<Datum>) -> std::result::Result<Self, CommandError> {
        match cmd {
            "setCurrentTime" => number("setCurrentTime", data).map(Action::SetCurrentTime),
            "setLoop" => flag("setLoop", data).map(Action::SetLoop),
            "setMuted" => flag("setMuted", data).map(Action::SetMuted),
            "setPlaybackRate" => number("setPlaybackRate", data).map(Action::SetPlaybackRate),
            "setVolume" => number("setVolume", data).map(Action::SetVolume),
            "play" => Ok(Action::Play),
            "pause" => Ok(Action::Pause),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Invoke the operation on `target`
    pub fn apply<P: Playback + ?Sized>(&self, target: &P) -> Result<()> {
        match *self {
            Action::SetCurrentTime(v) => target.set_current_time(v),
            Action::SetLoop(v) => target.set_loop(v),
            Action::SetMuted(v) => target.set_muted(v),
            Action::SetPlaybackRate(v) => target.set_playback_rate(v),
            Action::SetVolume(v) => target.set_volume(v),
            Action::Play => target.play(),
            Action::Pause => target.pause(),
        }
    }
}

fn number(cmd: &'static str, data: Option<Datum>) -> std::result::Result<f64, CommandError> {
    match data {
        Some(Datum::Number(v)) => Ok(v),
        Some(Datum::Bool(_)) => Err(CommandError::InvalidData {
            cmd,
            expected: "number",
        }),
        None => Err(CommandError::MissingData { cmd }),
    }
}

fn flag(cmd: &'static str, data: Option<Datum>) -> std::result::Result<bool, CommandError> {
    match data {
        Some(Datum::Bool(v)) => Ok(v),
        Some(Datum::Number(_)) => Err(CommandError::InvalidData {
            cmd,
            expected: "boolean",
        }),
        None => Err(CommandError::MissingData { cmd }),
    }
}

/// An action addressed to one sound or to all of them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CommandRecord", into = "CommandRecord")]
pub struct Command {
    /// Target sound; `None` broadcasts to every live sound
    pub target: Option<SoundId>,
    pub action: Action,
}

impl Command {
    /// Address every live sound
    pub fn broadcast(action: Action) -> Self {
        Self {
            target: None,
            action,
        }
    }

    /// Address one sound
    pub fn to(id: SoundId, action: Action) -> Self {
        Self {
            target: Some(id),
            action,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.target.is_none()
    }
}

impl TryFrom<CommandRecord> for Command {
    type Error = CommandError;

    fn try_from(record: CommandRecord) -> std::result::Result<Self, Self::Error> {
        let action = Action::parse(&record.cmd, record.data)?;
        Ok(Self {
            target: record.id,
            action,
        })
    }
}

impl From<Command> for CommandRecord {
    fn from(command: Command) -> Self {
        CommandRecord::new(
            command.target,
            command.action.name(),
            command.action.data(),
        )
    }
}

/// Anything the dispatcher can resolve to a [`Command`]
///
/// Implemented for typed commands, wire records and JSON text.
pub trait IntoCommand {
    fn into_command(self) -> std::result::Result<Command, CommandError>;
}

impl IntoCommand for Command {
    fn into_command(self) -> std::result::Result<Command, CommandError> {
        Ok(self)
    }
}

impl IntoCommand for CommandRecord {
    fn into_command(self) -> std::result::Result<Command, CommandError> {
        Command::try_from(self)
    }
}

impl IntoCommand for String {
    fn into_command(self) -> std::result::Result<Command, CommandError> {
        CommandRecord::from_json(&self)?.into_command()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records the operations it receives
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn log(&self, call: String) -> Result<()> {
            self.calls.borrow_mut().push(call);
            Ok(())
        }
    }

    impl Playback for Recorder {
        fn set_current_time(&self, value: f64) -> Result<()> {
            self.log(format!("setCurrentTime({})", value))
        }
        fn set_loop(&self, value: bool) -> Result<()> {
            self.log(format!("setLoop({})", value))
        }
        fn set_muted(&self, value: bool) -> Result<()> {
            self.log(format!("setMuted({})", value))
        }
        fn set_playback_rate(&self, value: f64) -> Result<()> {
            self.log(format!("setPlaybackRate({})", value))
        }
        fn set_volume(&self, value: f64) -> Result<()> {
            self.log(format!("setVolume({})", value))
        }
        fn play(&self) -> Result<()> {
            self.log("play".into())
        }
        fn pause(&self) -> Result<()> {
            self.log("pause".into())
        }
    }

    #[test]
    fn test_parse_every_name() {
        for name in Action::NAMES {
            let data = match name {
                "setLoop" | "setMuted" => Some(Datum::Bool(true)),
                _ => Some(Datum::Number(1.0)),
            };
            let action = Action::parse(name, data).unwrap();
            assert_eq!(action.name(), name);
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        assert_eq!(
            Action::parse("explode", None),
            Err(CommandError::UnknownCommand("explode".into()))
        );
        // Names are case sensitive
        assert!(Action::parse("Play", None).is_err());
    }

    #[test]
    fn test_parse_data_checks() {
        assert_eq!(
            Action::parse("setVolume", None),
            Err(CommandError::MissingData { cmd: "setVolume" })
        );
        assert_eq!(
            Action::parse("setLoop", Some(Datum::Number(1.0))),
            Err(CommandError::InvalidData {
                cmd: "setLoop",
                expected: "boolean"
            })
        );
        // Argument-free operations ignore data
        assert_eq!(
            Action::parse("play", Some(Datum::Number(3.0))),
            Ok(Action::Play)
        );
    }

    #[test]
    fn test_apply_dispatches_by_variant() {
        let recorder = Recorder::default();

        Action::SetVolume(0.5).apply(&recorder).unwrap();
        Action::SetLoop(false).apply(&recorder).unwrap();
        Action::Play.apply(&recorder).unwrap();
        Action::Pause.apply(&recorder).unwrap();

        assert_eq!(
            *recorder.calls.borrow(),
            vec!["setVolume(0.5)", "setLoop(false)", "play", "pause"]
        );
    }

    #[test]
    fn test_command_from_record() {
        let record = CommandRecord::new(Some(SoundId::new(2)), "pause", None);
        let command = Command::try_from(record).unwrap();

        assert_eq!(command, Command::to(SoundId::new(2), Action::Pause));
        assert!(!command.is_broadcast());
    }

    #[test]
    fn test_command_json() {
        let command: Command = serde_json::from_str(r#"{"cmd":"setMuted","data":true}"#).unwrap();
        assert_eq!(command, Command::broadcast(Action::SetMuted(true)));

        let json = serde_json::to_string(&Command::to(SoundId::new(1), Action::SetVolume(0.5)))
            .unwrap();
        assert_eq!(json, r#"{"id":1,"cmd":"setVolume","data":0.5}"#);

        assert!(serde_json::from_str::<Command>(r#"{"id":0,"cmd":"explode"}"#).is_err());
    }

    #[test]
    fn test_into_command_from_json_text() {
        let command = String::from(r#"{"id":4,"cmd":"setPlaybackRate","data":2}"#)
            .into_command()
            .unwrap();
        assert_eq!(command, Command::to(SoundId::new(4), Action::SetPlaybackRate(2.0)));

        let err = String::from("{").into_command().unwrap_err();
        assert!(matches!(err, CommandError::Malformed(_)));
    }
}
