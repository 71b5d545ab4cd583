//! Cloneable façade for issuing commands to the runtime.
//!
//! [`TrackerHandle`] hides channel plumbing. Hop requests and ticks are
//! marshalled onto the session worker; registry reads and manual overrides go
//! straight to the shared [`WorldRegistry`].
use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::info;

use world_core::{AdvanceOutcome, RequestOutcome, TransferState, WorldEntry, WorldId, WorldStatus};

use super::errors::{Result, RuntimeError};
use crate::display::DisplayPublisher;
use crate::events::{EligibilityEvent, EligibilitySource, Event, EventBus, Topic};
use crate::registry::WorldRegistry;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct TrackerHandle {
    command_tx: mpsc::Sender<Command>,
    registry: WorldRegistry,
    display: DisplayPublisher,
    event_bus: EventBus,
}

impl TrackerHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        registry: WorldRegistry,
        display: DisplayPublisher,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            registry,
            display,
            event_bus,
        }
    }

    /// Request a hop to `target`.
    ///
    /// The request is queued to the session worker and takes effect there;
    /// the returned outcome reflects the worker's decision.
    pub async fn request_transfer(&self, target: WorldId) -> Result<RequestOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::RequestTransfer {
                target,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Run one probe step of the in-flight transfer, if any.
    pub async fn advance(&self) -> Result<AdvanceOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Advance { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the transfer state (read-only snapshot)
    pub async fn transfer_state(&self) -> Result<TransferState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryTransfer { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Out-of-band correction: the window of `world` opens `minutes` from now.
    ///
    /// Bypasses the configured eligibility window and redraws the display
    /// immediately.
    pub fn set_manual_timer(&self, world: WorldId, minutes: i32) -> WorldEntry {
        let entry = self.registry.record_eligibility_from(
            world,
            self.now(),
            TimeDelta::minutes(i64::from(minutes)),
        );

        info!(
            target: "runtime::registry",
            world = %world,
            minutes,
            "Manual timer set"
        );

        self.event_bus
            .publish(Event::Eligibility(EligibilityEvent::Recorded {
                entry,
                source: EligibilitySource::Manual,
            }));
        self.display.refresh();

        entry
    }

    /// Derived status of every tracked world, ordered by world id.
    pub fn world_statuses(&self) -> Vec<WorldStatus> {
        self.display.statuses()
    }

    /// Derived status of one world. See [`WorldRegistry::get`] for the role
    /// of `context_world`.
    pub fn world_status(
        &self,
        world: WorldId,
        context_world: Option<WorldId>,
    ) -> Option<WorldStatus> {
        self.display.status_of(world, context_world)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.display.now()
    }

    pub fn registry(&self) -> &WorldRegistry {
        &self.registry
    }

    pub fn display(&self) -> &DisplayPublisher {
        &self.display
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Eligibility` - Spawn observations, manual timers, discovery
    /// - `Topic::Transfer` - Hop requests, probes, and their results
    /// - `Topic::Display` - Status snapshots published every tick
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
