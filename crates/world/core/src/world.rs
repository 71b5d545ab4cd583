//! World identifiers and the metadata reported by world-list providers.
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Numeric identifier of a world (an interchangeable server shard).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldId(pub u32);

impl WorldId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WorldId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for WorldId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

bitflags! {
    /// World type flags as published by the world list.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WorldFlags: u32 {
        const MEMBERS            = 1 << 0;
        const PVP                = 1 << 1;
        const SKILL_TOTAL        = 1 << 2;
        const HIGH_RISK          = 1 << 3;
        const BOUNTY             = 1 << 4;
        const DEADMAN            = 1 << 5;
        const QUEST_SPEEDRUNNING = 1 << 6;
        const PVP_ARENA          = 1 << 7;
        const NOSAVE_MODE        = 1 << 8;
        const TOURNAMENT         = 1 << 9;
        const FRESH_START        = 1 << 10;
    }
}

impl WorldFlags {
    /// Temporary or special game modes that never share the tracked event.
    pub const TRANSIENT: Self = Self::QUEST_SPEEDRUNNING
        .union(Self::PVP_ARENA)
        .union(Self::NOSAVE_MODE)
        .union(Self::TOURNAMENT)
        .union(Self::FRESH_START);

    /// Members worlds outside every transient mode are tracked.
    pub const fn is_trackable(self) -> bool {
        self.contains(Self::MEMBERS) && !self.intersects(Self::TRANSIENT)
    }
}

/// One row of the world list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldInfo {
    pub id: WorldId,
    pub flags: WorldFlags,
}

impl WorldInfo {
    pub const fn new(id: WorldId, flags: WorldFlags) -> Self {
        Self { id, flags }
    }

    pub const fn is_trackable(&self) -> bool {
        self.flags.is_trackable()
    }
}
