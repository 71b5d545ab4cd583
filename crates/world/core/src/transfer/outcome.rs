use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::WorldId;

/// Why a transfer request was refused. The display text is the user notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RequestRejection {
    #[error("You are already on World {0}")]
    AlreadyOnWorld(WorldId),

    #[error("Cannot quick-hop while not logged in or at login screen.")]
    NotLoggedIn,

    #[error("World hopping is disabled in the configuration.")]
    FeatureDisabled,

    #[error("Failed to fetch the world list. Cannot hop.")]
    WorldListUnavailable,

    #[error("World {0} not found in the world list. Cannot hop.")]
    UnknownWorld(WorldId),
}

/// Result of `request_transfer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestOutcome {
    /// Probing toward `target` starts on the next advance.
    Accepted {
        target: WorldId,
        /// Target whose progress was discarded, if one was in flight.
        replaced: Option<WorldId>,
    },
    /// Already probing `target`; nothing changed.
    AlreadyInProgress { target: WorldId, attempts: u32 },
    /// At the login screen the world is switched immediately.
    SwitchedAtLogin {
        target: WorldId,
        /// Target dropped by the switch, if one was in flight.
        replaced: Option<WorldId>,
    },
    /// Refused; state is unchanged.
    Rejected(RequestRejection),
}

impl RequestOutcome {
    pub const fn is_rejected(&self) -> bool {
        matches!(self, RequestOutcome::Rejected(_))
    }
}

/// Result of one `advance` step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvanceOutcome {
    /// Nothing in flight.
    Idle,
    /// Resource not ready; it was prepared and the attempt counted.
    Probed { target: WorldId, attempts: u32 },
    /// The transfer was executed.
    Succeeded { target: WorldId, attempts: u32 },
    /// The attempt ceiling was reached; the target was dropped.
    Aborted { target: WorldId, attempts: u32 },
}

impl AdvanceOutcome {
    /// Whether this step ended the transfer.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            AdvanceOutcome::Succeeded { .. } | AdvanceOutcome::Aborted { .. }
        )
    }
}
