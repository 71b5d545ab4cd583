//! Traits describing the collaborators the core depends on.
//!
//! The core never talks to the game client, the world-list service, or the UI
//! directly. It sees them through these traits, and [`TransferEnv`] bundles
//! the read-only ones the transfer orchestrator consults before accepting a
//! request.
mod clock;
mod display;
mod session;
mod transfer;
mod worlds;

pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{DisplaySink, Notifier};
pub use session::{SessionGate, SessionState};
pub use transfer::TransferResource;
pub use worlds::WorldListProvider;

/// Read-only collaborators consulted when a transfer is requested.
#[derive(Clone, Copy)]
pub struct TransferEnv<'a> {
    pub session: &'a dyn SessionGate,
    pub worlds: &'a dyn WorldListProvider,
}

impl<'a> TransferEnv<'a> {
    pub fn new(session: &'a dyn SessionGate, worlds: &'a dyn WorldListProvider) -> Self {
        Self { session, worlds }
    }
}
