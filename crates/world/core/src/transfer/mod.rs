//! Bounded-retry world transfer state machine.
//!
//! [`TransferOrchestrator`] holds the single in-flight hop. It is a pure
//! reducer over [`TransferState`]: callers hand it the collaborators for the
//! duration of one call, and it reports what happened as an outcome value.
//! Serializing calls onto one execution context is the runtime's job.
mod orchestrator;
mod outcome;
mod state;

pub use orchestrator::TransferOrchestrator;
pub use outcome::{AdvanceOutcome, RequestOutcome, RequestRejection};
pub use state::TransferState;
