use serde::{Deserialize, Serialize};

use crate::world::WorldId;

/// The orchestrator's state. Terminal results are reported as outcomes and
/// never linger here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferState {
    #[default]
    Idle,
    /// Waiting for the transfer resource to become ready.
    Probing {
        target: WorldId,
        /// Failed readiness probes since `target` was set.
        attempts: u32,
    },
}

impl TransferState {
    pub const fn is_idle(&self) -> bool {
        matches!(self, TransferState::Idle)
    }

    pub const fn target(&self) -> Option<WorldId> {
        match self {
            TransferState::Idle => None,
            TransferState::Probing { target, .. } => Some(*target),
        }
    }

    /// Probe failures so far; zero while idle.
    pub const fn attempts(&self) -> u32 {
        match self {
            TransferState::Idle => 0,
            TransferState::Probing { attempts, .. } => *attempts,
        }
    }
}
