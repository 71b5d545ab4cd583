use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::world::WorldId;

/// When a world's eligibility window opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    /// The world has never been observed.
    #[default]
    Unknown,
    /// The window opens at this instant.
    At(DateTime<Utc>),
}

/// Tracked eligibility for a single world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldEntry {
    pub world: WorldId,
    pub eligibility: Eligibility,
}

impl WorldEntry {
    /// Entry for a world that has been discovered but never observed.
    pub const fn unknown(world: WorldId) -> Self {
        Self {
            world,
            eligibility: Eligibility::Unknown,
        }
    }

    pub const fn eligible_at(world: WorldId, at: DateTime<Utc>) -> Self {
        Self {
            world,
            eligibility: Eligibility::At(at),
        }
    }

    /// Entry for a world whose event was observed at `observed_at`; the
    /// window reopens `window` later.
    pub fn observed(world: WorldId, observed_at: DateTime<Utc>, window: TimeDelta) -> Self {
        Self::eligible_at(world, observed_at + window)
    }

    pub const fn opens_at(&self) -> Option<DateTime<Utc>> {
        match self.eligibility {
            Eligibility::Unknown => None,
            Eligibility::At(at) => Some(at),
        }
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self.eligibility, Eligibility::Unknown)
    }
}
