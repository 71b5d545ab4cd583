use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::{Eligibility, WorldEntry};
use crate::config::TrackerConfig;
use crate::world::WorldId;

/// Seconds until a window opens, or `Unknown` for unobserved worlds.
///
/// Negative values mean the window is already open and time is accumulating
/// past it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Remaining {
    Unknown,
    Seconds(i64),
}

impl Remaining {
    /// Flattened value used for `Unknown`; sorts after every real duration.
    pub const UNKNOWN_SECS: i64 = i64::MAX;

    pub const fn as_secs(self) -> i64 {
        match self {
            Remaining::Unknown => Self::UNKNOWN_SECS,
            Remaining::Seconds(secs) => secs,
        }
    }

    pub const fn is_unknown(self) -> bool {
        matches!(self, Remaining::Unknown)
    }
}

/// Coarse status bucket derived from remaining time.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum StatusTier {
    /// No observation for this world.
    Unknown,
    /// More than the near threshold remains.
    CountdownFar,
    /// The window opens within the near threshold.
    CountdownNear,
    /// The window is open (remaining ≤ 0).
    Open,
}

/// Everything a display consumer needs for one world, computed at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStatus {
    pub world: WorldId,
    pub remaining: Remaining,
    pub tier: StatusTier,
    pub text: String,
}

/// Stateless derivation of remaining time, tier, and display text.
///
/// Holds only the near threshold, so it is `Copy` and safe to call from any
/// number of readers without synchronization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EligibilityClock {
    near_threshold_secs: i64,
}

impl EligibilityClock {
    pub const NO_DATA: &'static str = "No Data";

    pub const fn new(near_threshold_secs: i64) -> Self {
        Self {
            near_threshold_secs,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.near_threshold_secs)
    }

    pub const fn near_threshold_secs(&self) -> i64 {
        self.near_threshold_secs
    }

    /// Whole seconds from `now` until the window opens, truncated toward zero.
    pub fn remaining_seconds(&self, entry: &WorldEntry, now: DateTime<Utc>) -> Remaining {
        match entry.eligibility {
            Eligibility::Unknown => Remaining::Unknown,
            Eligibility::At(at) => Remaining::Seconds((at - now).num_seconds()),
        }
    }

    pub fn status_tier(&self, entry: &WorldEntry, now: DateTime<Utc>) -> StatusTier {
        self.tier_for(self.remaining_seconds(entry, now))
    }

    pub const fn tier_for(&self, remaining: Remaining) -> StatusTier {
        match remaining {
            Remaining::Unknown => StatusTier::Unknown,
            Remaining::Seconds(secs) if secs <= 0 => StatusTier::Open,
            Remaining::Seconds(secs) if secs <= self.near_threshold_secs => {
                StatusTier::CountdownNear
            }
            Remaining::Seconds(_) => StatusTier::CountdownFar,
        }
    }

    pub fn display_text(&self, entry: &WorldEntry, now: DateTime<Utc>) -> String {
        format_remaining(self.remaining_seconds(entry, now))
    }

    pub fn status(&self, entry: &WorldEntry, now: DateTime<Utc>) -> WorldStatus {
        let remaining = self.remaining_seconds(entry, now);
        WorldStatus {
            world: entry.world,
            remaining,
            tier: self.tier_for(remaining),
            text: format_remaining(remaining),
        }
    }
}

impl Default for EligibilityClock {
    fn default() -> Self {
        Self::new(TrackerConfig::DEFAULT_NEAR_THRESHOLD_SECS)
    }
}

/// Formats remaining time as `MM:SS`, or `H:MM:SS` from one hour up.
///
/// Elapsed time (remaining ≤ 0) is prefixed with `+`.
pub fn format_remaining(remaining: Remaining) -> String {
    let secs = match remaining {
        Remaining::Unknown => return EligibilityClock::NO_DATA.to_owned(),
        Remaining::Seconds(secs) => secs,
    };

    let abs = secs.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    let seconds = abs % 60;

    let time = if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    };

    if secs <= 0 { format!("+{time}") } else { time }
}
