//! Runtime orchestration for eligibility tracking and world hopping.
//!
//! This crate wires the pure `world-core` pieces into two execution domains:
//! a display domain that recomputes per-world status on every tick, and a
//! session domain where a single worker task owns the transfer orchestrator
//! and the transfer resource. Consumers embed [`Runtime`], feed it external
//! events through [`EventIngestor`], and talk to it through [`TrackerHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the handle and error types
//! - [`events`] provides the topic-based event bus
//! - [`registry`] holds the shared world map
//! - [`ingest`] routes external events
//! - [`display`] derives and publishes display state
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod display;
pub mod events;
pub mod ingest;
pub mod notice;
pub mod registry;
pub mod runtime;

mod workers;

pub use api::{CollaboratorKind, Result, RuntimeError, TrackerHandle};
pub use display::{DisplayPublisher, NullDisplay};
pub use events::{
    DisplayEvent, EligibilityEvent, EligibilitySource, Event, EventBus, Topic, TransferEvent,
};
pub use ingest::{ChatChannel, EventIngestor, ExternalEvent, Routed};
pub use notice::LogNotifier;
pub use registry::WorldRegistry;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
