//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to plug in their collaborators.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use world_core::{
    Clock, DisplaySink, EligibilityClock, Notifier, SessionGate, SystemClock, TrackerConfig,
    TransferOrchestrator, TransferResource, WorldListProvider,
};

use crate::api::{CollaboratorKind, Result, RuntimeError, TrackerHandle};
use crate::display::{DisplayPublisher, NullDisplay};
use crate::events::{Event, EventBus, Topic};
use crate::ingest::{EventIngestor, ExternalEvent, Routed};
use crate::notice::{LogNotifier, Notices};
use crate::registry::WorldRegistry;
use crate::workers::{Command, SessionWorker, TickerWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tracker: TrackerConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Cadence of the built-in ticker. `None` leaves ticking to the caller,
    /// who then feeds [`ExternalEvent::Tick`] through the ingestor.
    pub tick_interval: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: Some(Duration::from_secs(1)),
        }
    }
}

/// Main runtime that tracks eligibility and orchestrates world hops
///
/// Design: Runtime owns workers and coordinates shutdown.
/// [`TrackerHandle`] and [`EventIngestor`] are cloneable façades for clients.
pub struct Runtime {
    handle: TrackerHandle,
    ingestor: EventIngestor,
    shutdown_tx: watch::Sender<bool>,

    // Background workers
    session_worker_handle: JoinHandle<()>,
    ticker_worker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> TrackerHandle {
        self.handle.clone()
    }

    /// Get a cloneable event router
    pub fn ingestor(&self) -> EventIngestor {
        self.ingestor.clone()
    }

    pub fn registry(&self) -> &WorldRegistry {
        self.handle.registry()
    }

    /// Route one external event.
    pub async fn ingest(&self, event: ExternalEvent) -> Result<Routed> {
        self.ingestor.ingest(event).await
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Stops the ticker, lets the session worker drop any in-flight transfer,
    /// and clears the registry.
    pub async fn shutdown(self) -> Result<()> {
        if self.shutdown_tx.send(true).is_err() {
            debug!("All workers already stopped");
        }

        if let Some(ticker_handle) = self.ticker_worker_handle {
            ticker_handle
                .await
                .map_err(|source| RuntimeError::WorkerJoin {
                    worker: "ticker",
                    source,
                })?;
        }

        self.session_worker_handle
            .await
            .map_err(|source| RuntimeError::WorkerJoin {
                worker: "session",
                source,
            })?;

        self.handle.registry().clear();
        info!("World hopper runtime stopped");

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    worlds: Option<Arc<dyn WorldListProvider>>,
    session: Option<Arc<dyn SessionGate>>,
    resource: Option<Box<dyn TransferResource>>,
    display: Option<Arc<dyn DisplaySink>>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            worlds: None,
            session: None,
            resource: None,
            display: None,
            notifier: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the world-list provider (required)
    pub fn world_list(mut self, worlds: Arc<dyn WorldListProvider>) -> Self {
        self.worlds = Some(worlds);
        self
    }

    /// Set the session gate (required)
    pub fn session_gate(mut self, session: Arc<dyn SessionGate>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the transfer resource (required)
    ///
    /// The resource moves into the session worker and is never touched from
    /// anywhere else.
    pub fn transfer_resource(mut self, resource: impl TransferResource + 'static) -> Self {
        self.resource = Some(Box::new(resource));
        self
    }

    /// Set the display sink (optional, defaults to [`NullDisplay`])
    pub fn display_sink(mut self, display: Arc<dyn DisplaySink>) -> Self {
        self.display = Some(display);
        self
    }

    /// Set the notifier (optional, defaults to [`LogNotifier`])
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the clock (optional, defaults to [`SystemClock`])
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Disable the built-in ticker; ticks must be fed through the ingestor.
    pub fn manual_ticks(mut self) -> Self {
        self.config.tick_interval = None;
        self
    }

    /// Build the runtime
    ///
    /// Must be called from within a Tokio runtime; workers are spawned here.
    pub async fn build(self) -> Result<Runtime> {
        let worlds = self.worlds.ok_or(RuntimeError::MissingCollaborator {
            kind: CollaboratorKind::WorldList,
        })?;
        let session = self.session.ok_or(RuntimeError::MissingCollaborator {
            kind: CollaboratorKind::SessionGate,
        })?;
        let resource = self.resource.ok_or(RuntimeError::MissingCollaborator {
            kind: CollaboratorKind::TransferResource,
        })?;

        let display_sink = self.display.unwrap_or_else(|| Arc::new(NullDisplay));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let tracker = Arc::new(self.config.tracker);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let registry = WorldRegistry::new();
        let notices = Notices::new(notifier);

        match registry.discover(worlds.as_ref()) {
            Some(added) => info!(added, "Initial world discovery complete"),
            None => debug!("World list not loaded yet; discovery deferred"),
        }

        let display = DisplayPublisher::new(
            registry.clone(),
            clock,
            display_sink,
            EligibilityClock::from_config(&tracker),
            event_bus.clone(),
        );

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = TrackerHandle::new(command_tx, registry, display, event_bus.clone());

        let session_worker = SessionWorker::new(
            TransferOrchestrator::from_config(&tracker),
            resource,
            Arc::clone(&session),
            Arc::clone(&worlds),
            notices.clone(),
            command_rx,
            shutdown_rx.clone(),
            event_bus,
        );

        let session_worker_handle = tokio::spawn(async move {
            session_worker.run().await;
        });

        let ingestor = EventIngestor::new(handle.clone(), session, worlds, notices, tracker);

        let ticker_worker_handle = self.config.tick_interval.map(|period| {
            let ticker = TickerWorker::new(ingestor.clone(), period, shutdown_rx);
            tokio::spawn(async move {
                ticker.run().await;
            })
        });

        info!(
            ticker = ?self.config.tick_interval,
            "World hopper runtime started"
        );

        Ok(Runtime {
            handle,
            ingestor,
            shutdown_tx,
            session_worker_handle,
            ticker_worker_handle,
        })
    }
}
