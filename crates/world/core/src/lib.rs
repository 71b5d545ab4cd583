//! Domain logic for per-world eligibility tracking and world transfers.
//!
//! `world-core` holds the pure pieces of the hopper: world identifiers and
//! flags, eligibility entries, the stateless [`EligibilityClock`], and the
//! [`TransferOrchestrator`] state machine. Everything the core needs from the
//! outside world is expressed through the collaborator traits in [`env`], so
//! the runtime can wire real implementations while tests plug in fakes.
pub mod config;
pub mod eligibility;
pub mod env;
pub mod transfer;
pub mod world;

pub use config::TrackerConfig;
pub use eligibility::{
    Eligibility, EligibilityClock, Remaining, StatusTier, WorldEntry, WorldStatus,
    format_remaining,
};
pub use env::{
    Clock, DisplaySink, ManualClock, Notifier, SessionGate, SessionState, SystemClock,
    TransferEnv, TransferResource, WorldListProvider,
};
pub use transfer::{
    AdvanceOutcome, RequestOutcome, RequestRejection, TransferOrchestrator, TransferState,
};
pub use world::{WorldFlags, WorldId, WorldInfo};
