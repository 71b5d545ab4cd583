//! Session worker that owns the [`TransferOrchestrator`] and the transfer
//! resource.
//!
//! Every orchestrator transition and every call into the resource happens on
//! this task. Other contexts reach it only through [`Command`] messages sent
//! by [`TrackerHandle`](crate::TrackerHandle).

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use world_core::{
    AdvanceOutcome, RequestOutcome, SessionGate, TransferEnv, TransferOrchestrator,
    TransferResource, TransferState, WorldId, WorldListProvider,
};

use crate::events::{Event, EventBus, TransferEvent};
use crate::notice::Notices;

/// Commands that can be sent to the session worker
pub enum Command {
    /// Request a hop to `target`.
    RequestTransfer {
        target: WorldId,
        reply: oneshot::Sender<RequestOutcome>,
    },
    /// Run one probe step (one per tick).
    Advance {
        reply: oneshot::Sender<AdvanceOutcome>,
    },
    /// Query the transfer state (read-only).
    QueryTransfer {
        reply: oneshot::Sender<TransferState>,
    },
}

/// Background task that serializes all transfer work.
pub struct SessionWorker {
    orchestrator: TransferOrchestrator,
    resource: Box<dyn TransferResource>,
    session: Arc<dyn SessionGate>,
    worlds: Arc<dyn WorldListProvider>,
    notices: Notices,
    command_rx: mpsc::Receiver<Command>,
    shutdown_rx: watch::Receiver<bool>,
    event_bus: EventBus,
}

impl SessionWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        orchestrator: TransferOrchestrator,
        resource: Box<dyn TransferResource>,
        session: Arc<dyn SessionGate>,
        worlds: Arc<dyn WorldListProvider>,
        notices: Notices,
        command_rx: mpsc::Receiver<Command>,
        shutdown_rx: watch::Receiver<bool>,
        event_bus: EventBus,
    ) -> Self {
        tracing::info!(
            "SessionWorker initialized with max_attempts: {}",
            orchestrator.max_attempts()
        );

        Self {
            orchestrator,
            resource,
            session,
            worlds,
            notices,
            command_rx,
            shutdown_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.changed() => break,
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
            }
        }

        self.clear();
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::RequestTransfer { target, reply } => {
                let outcome = self.handle_request(target);
                if reply.send(outcome).is_err() {
                    debug!("RequestTransfer reply channel closed (caller dropped)");
                }
            }
            Command::Advance { reply } => {
                let outcome = self.handle_advance();
                if reply.send(outcome).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::QueryTransfer { reply } => {
                if reply.send(self.orchestrator.state()).is_err() {
                    debug!("QueryTransfer reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_request(&mut self, target: WorldId) -> RequestOutcome {
        let env = TransferEnv::new(self.session.as_ref(), self.worlds.as_ref());
        let outcome = self
            .orchestrator
            .request_transfer(target, env, self.resource.as_mut());

        match outcome {
            RequestOutcome::Accepted { target, replaced } => {
                info!(
                    target: "runtime::session",
                    world = %target,
                    replaced = ?replaced,
                    "Transfer requested"
                );
                self.notices
                    .send(format_args!("Quick-hopping to World {target}..."));
                self.publish(TransferEvent::Requested { target, replaced });
            }
            RequestOutcome::AlreadyInProgress { target, attempts } => {
                debug!(
                    target: "runtime::session",
                    world = %target,
                    attempts,
                    "Transfer already in progress"
                );
            }
            RequestOutcome::SwitchedAtLogin { target, replaced } => {
                info!(
                    target: "runtime::session",
                    world = %target,
                    replaced = ?replaced,
                    "World switched at login screen"
                );
                self.notices
                    .send(format_args!("Quick-hopping to World {target}..."));
                self.publish(TransferEvent::SwitchedAtLogin { target, replaced });
            }
            RequestOutcome::Rejected(reason) => {
                debug!(
                    target: "runtime::session",
                    world = %target,
                    reason = %reason,
                    "Transfer request rejected"
                );
                self.notices.send(reason);
                self.publish(TransferEvent::Rejected { target, reason });
            }
        }

        outcome
    }

    fn handle_advance(&mut self) -> AdvanceOutcome {
        let outcome = self.orchestrator.advance(self.resource.as_mut());

        match outcome {
            AdvanceOutcome::Idle => {}
            AdvanceOutcome::Probed { target, attempts } => {
                debug!(
                    target: "runtime::session",
                    world = %target,
                    attempts,
                    "World switcher not ready; prepared"
                );
                self.publish(TransferEvent::Probed { target, attempts });
            }
            AdvanceOutcome::Succeeded { target, attempts } => {
                info!(
                    target: "runtime::session",
                    world = %target,
                    attempts,
                    "Transfer executed"
                );
                self.publish(TransferEvent::Succeeded { target, attempts });
            }
            AdvanceOutcome::Aborted { target, attempts } => {
                warn!(
                    target: "runtime::session",
                    world = %target,
                    attempts,
                    "Transfer aborted after reaching the attempt ceiling"
                );
                self.notices.send(format_args!(
                    "Failed to quick-hop after {attempts} attempts. Aborting hop target. (Game likely blocking the hop)"
                ));
                self.publish(TransferEvent::Aborted { target, attempts });
            }
        }

        outcome
    }

    fn clear(&mut self) {
        if let Some(target) = self.orchestrator.reset() {
            info!(
                target: "runtime::session",
                world = %target,
                "Cleared in-flight transfer on shutdown"
            );
            self.publish(TransferEvent::Cleared { target });
        }

        debug!(target: "runtime::session", "SessionWorker stopped");
    }

    fn publish(&self, event: TransferEvent) {
        self.event_bus.publish(Event::Transfer(event));
    }
}
