//! Command dispatcher
//!
//! The single consumer of the command sink. Each command is resolved to a
//! target (one sound, or the whole registry) and an operation, then applied.
//! Nothing a command does is reported back to the sender: stale ids,
//! unknown names and rejected values are logged and dropped.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::command::{Command, CommandError, IntoCommand};
use crate::error::Error;
use crate::media::MediaBackend;
use crate::registry::{SoundId, SoundRegistry};

/// What happened to one dispatched command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The operation ran on its target
    Applied,
    /// The operation ran but the target rejected it
    Rejected(Error),
    /// The command addressed a sound that is not live
    TargetMissing(SoundId),
    /// The command could not be resolved to an operation
    Invalid(CommandError),
}

/// Routes commands to the registry or to individual sounds
pub struct CommandDispatcher<B: MediaBackend> {
    registry: Arc<SoundRegistry<B>>,
}

impl<B: MediaBackend> CommandDispatcher<B> {
    /// Create a dispatcher over `registry`
    pub fn new(registry: Arc<SoundRegistry<B>>) -> Self {
        Self { registry }
    }

    /// Get the registry commands are applied to
    pub fn registry(&self) -> &Arc<SoundRegistry<B>> {
        &self.registry
    }

    /// Resolve and apply one sink item
    pub fn dispatch_item<T: IntoCommand>(&self, item: T) -> Outcome {
        match item.into_command() {
            Ok(command) => self.dispatch(command),
            Err(e) => {
                tracing::debug!(error = %e, "Dropping unresolvable command");
                Outcome::Invalid(e)
            }
        }
    }

    /// Apply one command
    pub fn dispatch(&self, command: Command) -> Outcome {
        let action = command.action;

        let result = match command.target {
            Some(id) => {
                let Some(handle) = self.registry.get(id) else {
                    tracing::debug!(
                        sound_id = %id,
                        cmd = action.name(),
                        "Dropping command for unknown sound"
                    );
                    return Outcome::TargetMissing(id);
                };
                tracing::debug!(sound_id = %id, cmd = action.name(), "Dispatching command");
                action.apply(handle.as_ref())
            }
            None => {
                tracing::debug!(cmd = action.name(), "Dispatching broadcast command");
                action.apply(self.registry.as_ref())
            }
        };

        match result {
            Ok(()) => Outcome::Applied,
            Err(e) => {
                tracing::debug!(cmd = action.name(), error = %e, "Command rejected");
                Outcome::Rejected(e)
            }
        }
    }

    /// Terminal cleanup once the sink has completed
    pub fn complete(&self) {
        tracing::info!(sounds = self.registry.len(), "Command sink completed, unloading");
        self.registry.unload();
    }

    /// Consume the sink until it closes, then unload every sound
    pub async fn run<T: IntoCommand>(self, mut sink: mpsc::Receiver<T>) {
        tracing::info!("Command dispatcher started");

        while let Some(item) = sink.recv().await {
            self.dispatch_item(item);
        }

        self.complete();
        tracing::info!("Command dispatcher stopped");
    }
}
