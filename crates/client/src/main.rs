//! World hopper console client.
//!
//! Composition root that wires the runtime to a simulated game session and
//! drives it from stdin. Each line is one command; `help` lists them.
mod config;
mod console;
mod logging;
mod sim;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use config::ClientConfig;
use console::ConsoleCommand;
use runtime::{ChatChannel, Event, ExternalEvent, Runtime, Topic};
use sim::{ConsoleDisplay, ConsoleNotifier, SimSession, SimSwitcher, SimWorlds};
use world_core::{SessionGate, SessionState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config)?;

    tracing::info!("Starting world hopper");
    tracing::info!("Start world: {}", config.start_world);
    tracing::info!("Hopping enabled: {}", config.enable_hop);

    let session = Arc::new(SimSession::new(config.start_world, config.enable_hop));
    let display = Arc::new(ConsoleDisplay::default());

    let runtime = Runtime::builder()
        .config(config.runtime_config())
        .world_list(Arc::new(SimWorlds::new()))
        .session_gate(session.clone())
        .transfer_resource(SimSwitcher::new(Arc::clone(&session), config.ready_after))
        .display_sink(display.clone())
        .notifier(Arc::new(ConsoleNotifier))
        .build()
        .await?;

    for topic in [Topic::Eligibility, Topic::Transfer, Topic::Display] {
        spawn_event_logger(&runtime, topic);
    }

    runtime
        .ingest(ExternalEvent::SessionStateChanged(session.session_state()))
        .await?;

    println!("{}", console::help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match console::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };

        if command == ConsoleCommand::Quit {
            break;
        }

        execute(command, &runtime, &session, &display, &config).await?;
    }

    runtime.shutdown().await?;
    tracing::info!("World hopper shutdown complete");

    Ok(())
}

async fn execute(
    command: ConsoleCommand,
    runtime: &Runtime,
    session: &SimSession,
    display: &ConsoleDisplay,
    config: &ClientConfig,
) -> Result<()> {
    let handle = runtime.handle();

    match command {
        ConsoleCommand::Hop { world } => {
            handle.request_transfer(world).await?;
        }
        ConsoleCommand::Spawn => {
            runtime
                .ingest(ExternalEvent::ChatMessage {
                    channel: ChatChannel::GameMessage,
                    text: config.tracker.spawn_announcement.clone(),
                })
                .await?;
        }
        ConsoleCommand::Timer { world, minutes } => {
            let entry = handle.set_manual_timer(world, minutes);
            if let Some(at) = entry.opens_at() {
                println!("World {world} opens at {}", at.format("%H:%M:%S UTC"));
            }
        }
        ConsoleCommand::List => {
            for status in handle.world_statuses() {
                println!(
                    "{:>5}  {:<15} {}",
                    status.world.to_string(),
                    status.tier.to_string(),
                    status.text
                );
            }
        }
        ConsoleCommand::State => {
            let transfer = handle.transfer_state().await?;
            println!(
                "World {} ({}), transfer: {transfer:?}",
                session.current_world(),
                session.session_state()
            );
        }
        ConsoleCommand::Login { world } => {
            if let Some(world) = world {
                session.set_world(world);
            }
            change_state(runtime, session, SessionState::LoggedIn).await?;
        }
        ConsoleCommand::Logout => {
            change_state(runtime, session, SessionState::LoginScreen).await?;
        }
        ConsoleCommand::Block => {
            runtime
                .ingest(ExternalEvent::ChatMessage {
                    channel: ChatChannel::GameMessage,
                    text: config.tracker.hop_blocked_message.clone(),
                })
                .await?;
        }
        ConsoleCommand::Show => display.set_visible(true),
        ConsoleCommand::Hide => display.set_visible(false),
        ConsoleCommand::Quit => {}
    }

    Ok(())
}

async fn change_state(runtime: &Runtime, session: &SimSession, state: SessionState) -> Result<()> {
    session.set_state(state);
    runtime
        .ingest(ExternalEvent::SessionStateChanged(state))
        .await?;
    Ok(())
}

/// Mirrors one event topic into the log as JSON.
fn spawn_event_logger(runtime: &Runtime, topic: Topic) {
    let mut rx = runtime.subscribe(topic);

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        target: "hopper::events",
                        ?topic,
                        skipped,
                        "Event logger lagged"
                    );
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn log_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => tracing::debug!(target: "hopper::events", topic = ?event.topic(), "{json}"),
        Err(error) => tracing::warn!(target: "hopper::events", %error, "Failed to encode event"),
    }
}
