//! Outbound, fire-and-forget presentation collaborators.
use crate::eligibility::WorldStatus;

/// Panel or overlay that renders per-world status.
pub trait DisplaySink: Send + Sync {
    /// Whether anything is currently showing the statuses.
    fn is_visible(&self) -> bool;

    /// Redraws with freshly derived statuses. Only called while visible.
    fn refresh(&self, statuses: &[WorldStatus]);
}

/// User-visible status messages (chat/console lines).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
