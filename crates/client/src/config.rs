//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use runtime::RuntimeConfig;
use world_core::{TrackerConfig, WorldId};

/// Settings for the console client and its simulated game session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub tick_interval: Duration,
    pub enable_hop: bool,
    pub start_world: WorldId,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// Prepares the simulated world switcher needs before it opens.
    pub ready_after: u32,
    pub tracker: TrackerConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(600),
            enable_hop: true,
            start_world: WorldId(301),
            session_id: None,
            log_dir: None,
            ready_after: 2,
            tracker: TrackerConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `HOPPER_TICK_MS` - Tick period in milliseconds (default: 600)
    /// - `HOPPER_ENABLE_HOP` - Allow world hopping (default: true)
    /// - `HOPPER_START_WORLD` - World the simulated session starts on (default: 301)
    /// - `HOPPER_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `HOPPER_LOG_DIR` - Log directory (default: platform-specific)
    /// - `HOPPER_READY_AFTER` - Prepares before the switcher opens (default: 2)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    /// Unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_var::<u64>(&lookup, "HOPPER_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }

        if let Some(enable) = read_var::<bool>(&lookup, "HOPPER_ENABLE_HOP") {
            config.enable_hop = enable;
        }

        if let Some(world) = read_var::<WorldId>(&lookup, "HOPPER_START_WORLD") {
            config.start_world = world;
        }

        config.session_id = lookup("HOPPER_SESSION_ID").filter(|id| !id.trim().is_empty());
        config.log_dir = lookup("HOPPER_LOG_DIR").map(PathBuf::from);

        if let Some(count) = read_var::<u32>(&lookup, "HOPPER_READY_AFTER") {
            config.ready_after = count;
        }

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            tracker: self.tracker.clone(),
            tick_interval: Some(self.tick_interval),
            ..RuntimeConfig::default()
        }
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
