//! Entry point for external events.
//!
//! [`EventIngestor`] is a stateless router: each [`ExternalEvent`] maps to
//! exactly one registry or session-worker call. It is cheap to clone and can
//! be handed to whatever delivers events (a client event loop, the built-in
//! ticker, tests).
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use world_core::{
    AdvanceOutcome, SessionGate, SessionState, TrackerConfig, WorldEntry, WorldListProvider,
};

use crate::api::{Result, TrackerHandle};
use crate::events::{EligibilityEvent, EligibilitySource, Event, TransferEvent};
use crate::notice::Notices;

const HOP_BLOCKED_NOTICE: &str =
    "Hop blocked by game: Please stop what you are doing (e.g. combat, skilling) and try again.";

/// Message channel a chat line arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatChannel {
    /// Server broadcasts to the local player (spawn and hop-blocked notices).
    GameMessage,
    Public,
    Private,
    Clan,
    Broadcast,
    Console,
}

/// Events delivered by the host client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalEvent {
    ChatMessage { channel: ChatChannel, text: String },
    SessionStateChanged(SessionState),
    /// The world-list provider finished loading.
    WorldListReady,
    /// Periodic tick.
    Tick,
}

/// What an event was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// A spawn announcement updated the current world.
    EligibilityRecorded(WorldEntry),
    /// A spawn announcement arrived while not logged in.
    SpawnDropped { state: SessionState },
    /// The game refused to open the world switcher.
    HopBlocked,
    /// Bulk discovery ran and inserted `added` worlds.
    Discovered { added: usize },
    /// Bulk discovery was due but the world list is not loaded yet.
    DiscoverySkipped,
    /// The tick advanced the transfer and refreshed the display.
    Ticked(AdvanceOutcome),
    /// Nothing to do for this event.
    Ignored,
}

/// Stateless router from external events to the registry and session worker.
#[derive(Clone)]
pub struct EventIngestor {
    handle: TrackerHandle,
    session: Arc<dyn SessionGate>,
    worlds: Arc<dyn WorldListProvider>,
    notices: Notices,
    config: Arc<TrackerConfig>,
}

impl EventIngestor {
    pub(crate) fn new(
        handle: TrackerHandle,
        session: Arc<dyn SessionGate>,
        worlds: Arc<dyn WorldListProvider>,
        notices: Notices,
        config: Arc<TrackerConfig>,
    ) -> Self {
        Self {
            handle,
            session,
            worlds,
            notices,
            config,
        }
    }

    pub async fn ingest(&self, event: ExternalEvent) -> Result<Routed> {
        match event {
            ExternalEvent::ChatMessage { channel, text } => {
                Ok(self.on_chat_message(channel, &text))
            }
            ExternalEvent::SessionStateChanged(state) => Ok(self.on_session_state(state)),
            ExternalEvent::WorldListReady => Ok(self.discover()),
            ExternalEvent::Tick => self.on_tick().await,
        }
    }

    fn on_chat_message(&self, channel: ChatChannel, text: &str) -> Routed {
        if channel != ChatChannel::GameMessage {
            return Routed::Ignored;
        }

        if text.contains(self.config.spawn_announcement.as_str()) {
            return self.on_spawn_announcement();
        }

        if text == self.config.hop_blocked_message {
            debug!(target: "runtime::ingest", "World switcher blocked by game");
            self.notices.send(HOP_BLOCKED_NOTICE);
            self.handle
                .event_bus()
                .publish(Event::Transfer(TransferEvent::Blocked));
            return Routed::HopBlocked;
        }

        Routed::Ignored
    }

    fn on_spawn_announcement(&self) -> Routed {
        let state = self.session.session_state();
        if !state.is_logged_in() {
            debug!(
                target: "runtime::ingest",
                state = %state,
                "Spawn announcement dropped; not logged in"
            );
            return Routed::SpawnDropped { state };
        }

        let world = self.session.current_world();
        let entry = self.handle.registry().record_eligibility_from(
            world,
            self.handle.now(),
            self.config.eligibility_window,
        );

        info!(
            target: "runtime::ingest",
            world = %world,
            opens_at = ?entry.opens_at(),
            "Spawn observed; next eligibility recorded"
        );

        self.handle
            .event_bus()
            .publish(Event::Eligibility(EligibilityEvent::Recorded {
                entry,
                source: EligibilitySource::Spawn,
            }));

        Routed::EligibilityRecorded(entry)
    }

    fn on_session_state(&self, state: SessionState) -> Routed {
        if self.handle.registry().is_empty() && state.can_discover_worlds() {
            return self.discover();
        }

        Routed::Ignored
    }

    fn discover(&self) -> Routed {
        let registry = self.handle.registry();

        match registry.discover(self.worlds.as_ref()) {
            Some(added) => {
                if added > 0 {
                    self.handle
                        .event_bus()
                        .publish(Event::Eligibility(EligibilityEvent::WorldsDiscovered {
                            added,
                            total: registry.len(),
                        }));
                }
                Routed::Discovered { added }
            }
            None => {
                debug!(
                    target: "runtime::ingest",
                    "World list not loaded yet; discovery deferred"
                );
                Routed::DiscoverySkipped
            }
        }
    }

    async fn on_tick(&self) -> Result<Routed> {
        let outcome = self.handle.advance().await?;
        self.handle.display().refresh();
        Ok(Routed::Ticked(outcome))
    }
}
