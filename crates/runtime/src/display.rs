//! Display domain: derives per-world status and publishes it.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::trace;

use world_core::{Clock, DisplaySink, EligibilityClock, WorldId, WorldStatus};

use crate::events::{DisplayEvent, Event, EventBus};
use crate::registry::WorldRegistry;

/// Sink used when no panel or overlay is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn is_visible(&self) -> bool {
        false
    }

    fn refresh(&self, _statuses: &[WorldStatus]) {}
}

/// Recomputes statuses from a registry snapshot and pushes them out.
///
/// Nothing is cached: every call reads the registry and the clock afresh.
#[derive(Clone)]
pub struct DisplayPublisher {
    registry: WorldRegistry,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DisplaySink>,
    eligibility: EligibilityClock,
    event_bus: EventBus,
}

impl DisplayPublisher {
    pub fn new(
        registry: WorldRegistry,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn DisplaySink>,
        eligibility: EligibilityClock,
        event_bus: EventBus,
    ) -> Self {
        Self {
            registry,
            clock,
            sink,
            eligibility,
            event_bus,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn statuses(&self) -> Vec<WorldStatus> {
        self.statuses_at(self.now())
    }

    pub fn status_of(&self, world: WorldId, context_world: Option<WorldId>) -> Option<WorldStatus> {
        let entry = self.registry.get(world, context_world)?;
        Some(self.eligibility.status(&entry, self.now()))
    }

    /// Publishes a fresh snapshot and redraws the sink if it is visible.
    ///
    /// Returns whether the sink was redrawn.
    pub fn refresh(&self) -> bool {
        let at = self.now();
        let statuses = self.statuses_at(at);

        let visible = self.sink.is_visible();
        if visible {
            self.sink.refresh(&statuses);
        }

        trace!(
            target: "runtime::display",
            worlds = statuses.len(),
            visible,
            "Display refreshed"
        );

        self.event_bus
            .publish(Event::Display(DisplayEvent::Refreshed { at, statuses }));

        visible
    }

    fn statuses_at(&self, now: DateTime<Utc>) -> Vec<WorldStatus> {
        self.registry
            .all()
            .iter()
            .map(|entry| self.eligibility.status(entry, now))
            .collect()
    }
}
