//! Unified error types surfaced by the runtime API.
//!
//! Only plumbing failures are errors. Rejected hop requests and aborted
//! transfers are ordinary outcomes carried by `world_core` types.
use std::fmt;

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("{worker} worker join failed")]
    WorkerJoin {
        worker: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("runtime requires a {kind} before building")]
    MissingCollaborator { kind: CollaboratorKind },
}

/// Collaborators the builder cannot default.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollaboratorKind {
    WorldList,
    SessionGate,
    TransferResource,
}

impl fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CollaboratorKind::WorldList => "world list provider",
            CollaboratorKind::SessionGate => "session gate",
            CollaboratorKind::TransferResource => "transfer resource",
        };
        write!(f, "{}", label)
    }
}
