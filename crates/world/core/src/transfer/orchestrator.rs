use super::outcome::{AdvanceOutcome, RequestOutcome, RequestRejection};
use super::state::TransferState;
use crate::config::TrackerConfig;
use crate::env::{SessionState, TransferEnv, TransferResource};
use crate::world::WorldId;

/// Owns the single in-flight transfer and its attempt counter.
///
/// Transitions:
/// - `Idle` + accepted request → `Probing { attempts: 0 }`
/// - `Probing` + request for another world → `Probing` toward the new world,
///   attempts reset
/// - `Probing` + advance, resource ready → execute, `Idle`
/// - `Probing` + advance, not ready → prepare, attempts + 1, `Idle` once the
///   ceiling is reached
#[derive(Clone, Debug)]
pub struct TransferOrchestrator {
    state: TransferState,
    max_attempts: u32,
}

impl TransferOrchestrator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: TransferState::Idle,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.max_transfer_attempts)
    }

    pub const fn state(&self) -> TransferState {
        self.state
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Requests a hop to `target`.
    ///
    /// Preconditions are checked in order: not already there, session able to
    /// hop, feature enabled, world list loaded and containing the target. A
    /// rejected request leaves the state untouched.
    pub fn request_transfer(
        &mut self,
        target: WorldId,
        env: TransferEnv<'_>,
        resource: &mut dyn TransferResource,
    ) -> RequestOutcome {
        if let Err(rejection) = Self::check_preconditions(target, env) {
            return RequestOutcome::Rejected(rejection);
        }

        if env.session.session_state() == SessionState::LoginScreen {
            let replaced = std::mem::take(&mut self.state).target();
            resource.change_world(target);
            return RequestOutcome::SwitchedAtLogin { target, replaced };
        }

        match self.state {
            TransferState::Probing {
                target: current,
                attempts,
            } if current == target => RequestOutcome::AlreadyInProgress { target, attempts },
            previous => {
                self.state = TransferState::Probing {
                    target,
                    attempts: 0,
                };
                RequestOutcome::Accepted {
                    target,
                    replaced: previous.target(),
                }
            }
        }
    }

    /// Runs one probe step. A no-op while idle.
    pub fn advance(&mut self, resource: &mut dyn TransferResource) -> AdvanceOutcome {
        let TransferState::Probing { target, attempts } = self.state else {
            return AdvanceOutcome::Idle;
        };

        if resource.is_ready() {
            resource.execute(target);
            self.state = TransferState::Idle;
            return AdvanceOutcome::Succeeded { target, attempts };
        }

        resource.prepare();
        let attempts = attempts.saturating_add(1);

        if attempts >= self.max_attempts {
            self.state = TransferState::Idle;
            AdvanceOutcome::Aborted { target, attempts }
        } else {
            self.state = TransferState::Probing { target, attempts };
            AdvanceOutcome::Probed { target, attempts }
        }
    }

    /// Drops any in-flight target, returning it.
    pub fn reset(&mut self) -> Option<WorldId> {
        std::mem::take(&mut self.state).target()
    }

    fn check_preconditions(
        target: WorldId,
        env: TransferEnv<'_>,
    ) -> Result<(), RequestRejection> {
        if env.session.current_world() == target {
            return Err(RequestRejection::AlreadyOnWorld(target));
        }

        if !env.session.session_state().can_request_hop() {
            return Err(RequestRejection::NotLoggedIn);
        }

        if !env.session.is_transfer_feature_enabled() {
            return Err(RequestRejection::FeatureDisabled);
        }

        let worlds = env
            .worlds
            .list_worlds()
            .ok_or(RequestRejection::WorldListUnavailable)?;

        if !worlds.iter().any(|world| world.id == target) {
            return Err(RequestRejection::UnknownWorld(target));
        }

        Ok(())
    }
}

impl Default for TransferOrchestrator {
    fn default() -> Self {
        Self::new(TrackerConfig::DEFAULT_MAX_TRANSFER_ATTEMPTS)
    }
}
