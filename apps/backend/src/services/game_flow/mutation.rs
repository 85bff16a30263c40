use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::state::VersionedState;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::room_state::StateMutation;

/// Checks the gate runs before comparing versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationGuard {
    /// Version first; the mutation reports every other rejection.
    VersionOnly,
    /// Reject with `GameEnded` once the game is over, whatever the version.
    TerminalFirst,
}

impl GameFlowService {
    /// Apply `mutation` iff `expected_version` is current.
    ///
    /// Accepted mutations bump the version by exactly one. Rejected ones,
    /// whether stale or invalid, write nothing.
    pub async fn run_mutation(
        &self,
        room_id: &str,
        expected_version: u32,
        guard: MutationGuard,
        op: &'static str,
        mutation: StateMutation<'_>,
    ) -> Result<VersionedState, AppError> {
        if guard == MutationGuard::TerminalFirst {
            let current = self.store.get_state(room_id).await?;
            if current.state.is_ended() {
                debug!(room_id, op, version = current.version, "rejected: game ended");
                return Err(
                    DomainError::validation(ValidationKind::GameEnded, "The game has ended").into(),
                );
            }
        }

        match self.store.apply(room_id, expected_version, mutation).await {
            Ok(state) => {
                info!(room_id, op, expected_version, version = state.version, "mutation applied");
                Ok(state)
            }
            Err(err) if err.is_version_conflict() => {
                info!(room_id, op, expected_version, "version conflict");
                Err(err.into())
            }
            Err(err) => {
                debug!(room_id, op, expected_version, error = %err, "mutation rejected");
                Err(err.into())
            }
        }
    }
}
