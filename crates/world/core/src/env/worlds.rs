//! Source of the world list.
use crate::world::WorldInfo;

/// Provides the current world list.
pub trait WorldListProvider: Send + Sync {
    /// All worlds, or `None` while the list has not been loaded yet.
    fn list_worlds(&self) -> Option<Vec<WorldInfo>>;
}
