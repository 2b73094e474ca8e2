//! Two sounds driven by one command sink
//!
//! Run with: cargo run --example two_sounds
//!
//! Starts both sounds, prints their progress as `timeupdate` events arrive,
//! pauses the first one halfway through and lets the second one play to the
//! end. Closing the command sink afterwards unloads both sounds.
//!
//! Set `RUST_LOG=audio_driver=debug` to see every dispatched command.

use std::sync::Arc;
use std::time::Duration;

use audio_driver::media::{MediaEventKind, SimulatedBackend, SimulatedConfig};
use audio_driver::{Action, AudioDriver, AudioEvent, Command, DriverConfig};
use tokio::sync::mpsc;

fn progress(event: &AudioEvent) -> String {
    let state = &event.state;
    let percent = if state.duration.is_finite() && state.duration > 0.0 {
        state.current_time / state.duration * 100.0
    } else {
        0.0
    };
    format!(
        "sound {} [{}] {:>5.2}s / {:>5.2}s ({:>3.0}%)",
        event.id,
        if state.paused { "paused" } else { "playing" },
        state.current_time,
        state.duration,
        percent
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("audio_driver=info".parse()?)
                .add_directive("two_sounds=info".parse()?),
        )
        .init();

    let backend = Arc::new(SimulatedBackend::new(
        SimulatedConfig::default()
            .tick_interval(Duration::from_millis(100))
            .source("ambient.ogg", Duration::from_secs(4))
            .source("chime.ogg", Duration::from_millis(1500)),
    ));
    let clock = backend.spawn_clock();

    let (commands, sink) = mpsc::channel::<Command>(32);
    let mut source = AudioDriver::new(Arc::clone(&backend))
        .with_config(DriverConfig::default())
        .run(sink);

    let mut ambient = source.sound("ambient.ogg")?;
    let mut chime = source.sound("chime.ogg")?;

    commands.send(ambient.set_volume(0.6)).await?;
    commands.send(Command::broadcast(Action::Play)).await?;

    let mut ambient_paused = false;
    let mut chime_ended = false;

    while !(ambient_paused && chime_ended) {
        let event = tokio::select! {
            Some(event) = ambient.recv() => event,
            Some(event) = chime.recv() => event,
            else => break,
        };

        match event.kind {
            MediaEventKind::TimeUpdate => {
                println!("{}", progress(&event));
                let halfway = event.state.current_time >= 2.0;
                if event.id == ambient.id() && halfway && !event.state.paused {
                    commands.send(ambient.pause()).await?;
                }
            }
            MediaEventKind::Pause if event.id == ambient.id() => {
                println!("sound {} paused", event.id);
                ambient_paused = true;
            }
            MediaEventKind::Ended => {
                println!("sound {} ended", event.id);
                chime_ended = true;
            }
            MediaEventKind::Error => {
                println!("sound {} failed: {:?}", event.id, event.error);
                break;
            }
            _ => {}
        }
    }

    drop(commands);
    source.closed().await;
    println!("all sounds unloaded: {}", source.registry().is_empty());

    clock.abort();
    Ok(())
}
