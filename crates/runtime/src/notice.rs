//! User-visible notices.
use std::fmt::Display;
use std::sync::Arc;

use tracing::info;

use world_core::Notifier;

/// Notifier that writes notices to the log. Used when no UI is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "runtime::notice", "{message}");
    }
}

/// Prefixes and forwards notices to the configured [`Notifier`].
#[derive(Clone)]
pub(crate) struct Notices {
    sink: Arc<dyn Notifier>,
}

impl Notices {
    pub(crate) const PREFIX: &'static str = "World Hopper: ";

    pub(crate) fn new(sink: Arc<dyn Notifier>) -> Self {
        Self { sink }
    }

    pub(crate) fn send(&self, message: impl Display) {
        self.sink.notify(&format!("{}{message}", Self::PREFIX));
    }
}
