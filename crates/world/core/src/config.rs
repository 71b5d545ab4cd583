//! Tunable parameters for eligibility tracking and world transfers.
use chrono::TimeDelta;

/// Tracker configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Time after a spawn announcement before the event can occur again.
    pub eligibility_window: TimeDelta,
    /// Remaining seconds at or below which a countdown is considered near.
    pub near_threshold_secs: i64,
    /// Failed readiness probes tolerated before a transfer is aborted.
    pub max_transfer_attempts: u32,
    /// Substring identifying a spawn announcement on the game-message channel.
    pub spawn_announcement: String,
    /// Exact game message sent when the game refuses to open the world switcher.
    pub hop_blocked_message: String,
}

impl TrackerConfig {
    pub const DEFAULT_WINDOW_MINUTES: i64 = 45;
    pub const DEFAULT_NEAR_THRESHOLD_SECS: i64 = 15 * 60;
    pub const DEFAULT_MAX_TRANSFER_ATTEMPTS: u32 = 10;
    pub const DEFAULT_SPAWN_ANNOUNCEMENT: &'static str = "A superior revenant has been awoken";
    pub const DEFAULT_HOP_BLOCKED_MESSAGE: &'static str =
        "Please finish what you're doing before using the World Switcher.";

    pub fn new() -> Self {
        Self {
            eligibility_window: TimeDelta::minutes(Self::DEFAULT_WINDOW_MINUTES),
            near_threshold_secs: Self::DEFAULT_NEAR_THRESHOLD_SECS,
            max_transfer_attempts: Self::DEFAULT_MAX_TRANSFER_ATTEMPTS,
            spawn_announcement: Self::DEFAULT_SPAWN_ANNOUNCEMENT.to_owned(),
            hop_blocked_message: Self::DEFAULT_HOP_BLOCKED_MESSAGE.to_owned(),
        }
    }

    pub fn with_eligibility_window(mut self, window: TimeDelta) -> Self {
        self.eligibility_window = window;
        self
    }

    pub fn with_near_threshold_secs(mut self, secs: i64) -> Self {
        self.near_threshold_secs = secs;
        self
    }

    /// Sets the probe ceiling. Values below one are raised to one.
    pub fn with_max_transfer_attempts(mut self, attempts: u32) -> Self {
        self.max_transfer_attempts = attempts.max(1);
        self
    }

    pub fn with_spawn_announcement(mut self, text: impl Into<String>) -> Self {
        self.spawn_announcement = text.into();
        self
    }

    pub fn with_hop_blocked_message(mut self, text: impl Into<String>) -> Self {
        self.hop_blocked_message = text.into();
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}
