//! Event types for different topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use world_core::{RequestRejection, WorldEntry, WorldId, WorldStatus};

/// What produced an eligibility update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilitySource {
    /// A spawn announcement observed in game.
    Spawn,
    /// A user-entered correction.
    Manual,
}

/// Changes to the world registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityEvent {
    /// A world's eligibility timestamp was overwritten.
    Recorded {
        entry: WorldEntry,
        source: EligibilitySource,
    },

    /// Bulk discovery inserted previously unknown worlds.
    WorldsDiscovered { added: usize, total: usize },
}

/// Progress of hop requests through the session worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferEvent {
    /// A request was accepted and probing begins on the next tick.
    Requested {
        target: WorldId,
        replaced: Option<WorldId>,
    },

    /// A request was refused before touching any state.
    Rejected {
        target: WorldId,
        reason: RequestRejection,
    },

    /// The world was switched from the login screen without probing.
    SwitchedAtLogin {
        target: WorldId,
        replaced: Option<WorldId>,
    },

    /// The resource was not ready and has been prepared.
    Probed { target: WorldId, attempts: u32 },

    Succeeded { target: WorldId, attempts: u32 },

    /// The attempt ceiling was reached and the target dropped.
    Aborted { target: WorldId, attempts: u32 },

    /// The game refused to open the world switcher; the next tick retries.
    Blocked,

    /// An in-flight target was discarded on shutdown.
    Cleared { target: WorldId },
}

/// Display snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayEvent {
    Refreshed {
        at: DateTime<Utc>,
        statuses: Vec<WorldStatus>,
    },
}
