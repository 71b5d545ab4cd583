//! Periodic tick source.
//!
//! Feeds [`ExternalEvent::Tick`] into the ingestor at a fixed cadence, which
//! both advances the transfer and republishes display state.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::api::RuntimeError;
use crate::ingest::{EventIngestor, ExternalEvent};

pub struct TickerWorker {
    ingestor: EventIngestor,
    period: Duration,
    shutdown_rx: watch::Receiver<bool>,
}

impl TickerWorker {
    const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub(crate) fn new(
        ingestor: EventIngestor,
        period: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            ingestor,
            period: period.max(Self::MIN_PERIOD),
            shutdown_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.changed() => break,
                _ = interval.tick() => {
                    match self.ingestor.ingest(ExternalEvent::Tick).await {
                        Ok(_) => {}
                        Err(
                            RuntimeError::CommandChannelClosed
                            | RuntimeError::ReplyChannelClosed(_),
                        ) => break,
                        Err(error) => {
                            warn!(target: "runtime::ticker", error = %error, "Tick failed");
                        }
                    }
                }
            }
        }

        debug!(target: "runtime::ticker", "TickerWorker stopped");
    }
}
