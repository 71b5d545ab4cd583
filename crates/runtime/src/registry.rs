//! Shared map of known worlds and their eligibility timestamps.
//!
//! [`WorldRegistry`] is cloned into every task that needs it. All access goes
//! through short lock scopes and reads hand out copies, so no caller ever
//! holds a live reference into the map.
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use world_core::{WorldEntry, WorldId, WorldListProvider};

/// Concurrency-safe world map with snapshot-on-read semantics.
#[derive(Clone, Default)]
pub struct WorldRegistry {
    entries: Arc<RwLock<HashMap<WorldId, WorldEntry>>>,
}

impl WorldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an `Unknown` entry for `world` unless one exists.
    ///
    /// Returns whether an insertion happened. Existing observations, manual
    /// ones included, are never touched.
    pub fn upsert_if_absent(&self, world: WorldId) -> bool {
        match self.write().entry(world) {
            Entry::Vacant(slot) => {
                slot.insert(WorldEntry::unknown(world));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Sets the window of `world` to open `window` after `observed_at`.
    ///
    /// Always overwrites: the latest call wins, even if its timestamp is
    /// earlier than the stored one.
    pub fn record_eligibility_from(
        &self,
        world: WorldId,
        observed_at: DateTime<Utc>,
        window: TimeDelta,
    ) -> WorldEntry {
        let entry = WorldEntry::observed(world, observed_at, window);
        self.write().insert(world, entry);

        debug!(
            target: "runtime::registry",
            world = %world,
            opens_at = ?entry.opens_at(),
            "Eligibility recorded"
        );

        entry
    }

    /// Returns a copy of the entry for `world`.
    ///
    /// When nothing is tracked for `world` but it is the caller's
    /// `context_world` (typically the world the client is on), a synthesized
    /// `Unknown` entry is returned without being stored.
    pub fn get(&self, world: WorldId, context_world: Option<WorldId>) -> Option<WorldEntry> {
        if let Some(entry) = self.read().get(&world) {
            return Some(*entry);
        }

        (context_world == Some(world)).then(|| WorldEntry::unknown(world))
    }

    /// Snapshot of every entry, ordered by world id.
    pub fn all(&self) -> Vec<WorldEntry> {
        let mut entries: Vec<WorldEntry> = self.read().values().copied().collect();
        entries.sort_unstable_by_key(|entry| entry.world);
        entries
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// Adds every trackable world from `provider` that is not yet known.
    ///
    /// Returns the number of inserted worlds, or `None` when the provider has
    /// no list yet; the caller retries on a later trigger.
    pub fn discover(&self, provider: &dyn WorldListProvider) -> Option<usize> {
        let worlds = provider.list_worlds()?;

        let added = worlds
            .iter()
            .filter(|info| info.is_trackable())
            .filter(|info| self.upsert_if_absent(info.id))
            .count();

        if added > 0 {
            debug!(target: "runtime::registry", added, "Loaded new member worlds");
        }

        Some(added)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<WorldId, WorldEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            warn!(target: "runtime::registry", "World registry lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<WorldId, WorldEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!(target: "runtime::registry", "World registry lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}
