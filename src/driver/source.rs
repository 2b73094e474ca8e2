//! Driver entry points
//!
//! [`AudioDriver::run`] wires a command sink to a fresh registry and returns
//! the [`AudioSource`] factory the application creates sounds from.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::command::IntoCommand;
use crate::error::Result;
use crate::media::MediaBackend;
use crate::registry::SoundRegistry;

use super::config::DriverConfig;
use super::dispatcher::CommandDispatcher;
use super::projector::SoundStream;

/// Audio driver
pub struct AudioDriver<B: MediaBackend> {
    backend: B,
    config: DriverConfig,
}

impl<B: MediaBackend> AudioDriver<B> {
    /// Create a driver with the default configuration
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: DriverConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Start consuming `sink` and return the sound factory
    ///
    /// The dispatcher runs on the current tokio runtime until the sink's
    /// senders are all dropped, then unloads every sound.
    pub fn run<T>(self, sink: mpsc::Receiver<T>) -> AudioSource<B>
    where
        T: IntoCommand + Send + 'static,
    {
        let registry = Arc::new(SoundRegistry::with_options(
            self.backend,
            self.config.element_options(),
        ));

        let dispatcher = CommandDispatcher::new(Arc::clone(&registry));
        let task = tokio::spawn(dispatcher.run(sink));

        AudioSource {
            registry,
            config: self.config,
            dispatcher: Some(task),
        }
    }
}

/// Run a driver with the default configuration
pub fn audio_driver<B, T>(sink: mpsc::Receiver<T>, backend: B) -> AudioSource<B>
where
    B: MediaBackend,
    T: IntoCommand + Send + 'static,
{
    AudioDriver::new(backend).run(sink)
}

/// Factory for sounds controlled by a running driver
pub struct AudioSource<B: MediaBackend> {
    registry: Arc<SoundRegistry<B>>,
    config: DriverConfig,
    dispatcher: Option<JoinHandle<()>>,
}

impl<B: MediaBackend> AudioSource<B> {
    /// Create a sound for `src` and return its event stream
    pub fn sound(&self, src: &str) -> Result<SoundStream<B>> {
        let (handle, events) = self.registry.add_subscribed(src)?;
        Ok(SoundStream::new(
            handle,
            events,
            &self.registry,
            self.config.release_on_drop,
        ))
    }

    pub fn registry(&self) -> &Arc<SoundRegistry<B>> {
        &self.registry
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Wait until the sink has completed and every sound is unloaded
    pub async fn closed(&mut self) {
        let Some(task) = self.dispatcher.take() else {
            return;
        };

        if let Err(e) = task.await {
            tracing::error!(error = %e, "Command dispatcher task failed");
        }
    }
}

impl<B: MediaBackend> std::fmt::Debug for AudioSource<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSource")
            .field("sounds", &self.registry.len())
            .field("config", &self.config)
            .finish()
    }
}
