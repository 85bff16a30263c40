use time::OffsetDateTime;
use tracing::debug;

use super::mutation::MutationGuard;
use super::GameFlowService;
use crate::domain::matching;
use crate::domain::state::VersionedState;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

impl GameFlowService {
    /// Latest versioned state of a room's game.
    pub async fn get_state(&self, room_id: &str) -> Result<VersionedState, AppError> {
        Ok(self.store.get_state(room_id).await?)
    }

    /// Reveal a card for `actor`, gated on `expected_version`.
    ///
    /// Once the game has ended this fails with `GameEnded` even when the
    /// supplied version is stale.
    pub async fn flip(
        &self,
        room_id: &str,
        actor: &str,
        index: usize,
        expected_version: u32,
    ) -> Result<VersionedState, AppError> {
        debug!(room_id, actor, index, expected_version, "flip requested");

        let delay = time::Duration::try_from(self.config.resolve_delay)
            .map_err(|e| AppError::config(format!("resolve delay out of range: {e}")))?;
        let now = OffsetDateTime::now_utc();
        let actor_id = actor.to_string();

        let state = self
            .run_mutation(
                room_id,
                expected_version,
                MutationGuard::TerminalFirst,
                "flip",
                Box::new(move |state| {
                    matching::flip(state, index, &actor_id, now, delay).map(|_| ())
                }),
            )
            .await?;

        self.after_mutation(room_id, &state).await;
        Ok(state)
    }

    /// Apply the pending pair on behalf of a room member.
    pub async fn resolve_pending(
        &self,
        room_id: &str,
        actor: &str,
        expected_version: u32,
    ) -> Result<VersionedState, AppError> {
        let actor_id = actor.to_string();
        self.resolve_with(room_id, expected_version, Some(actor_id))
            .await
    }

    /// Shared by member requests (`member = Some`) and the server's
    /// deferred resolver (`member = None`).
    pub(super) async fn resolve_with(
        &self,
        room_id: &str,
        expected_version: u32,
        member: Option<String>,
    ) -> Result<VersionedState, AppError> {
        let now = OffsetDateTime::now_utc();
        let state = self
            .run_mutation(
                room_id,
                expected_version,
                MutationGuard::VersionOnly,
                "resolve_pending",
                Box::new(move |state| {
                    if let Some(member) = member.as_deref() {
                        if !state.is_member(member) {
                            return Err(DomainError::validation(
                                ValidationKind::NotAMember,
                                format!("{member} is not playing in this room"),
                            ));
                        }
                    }
                    let resolution = matching::resolve_pending(state, now)?;
                    debug!(
                        kind = ?resolution.kind,
                        player = %resolution.player,
                        game_ended = resolution.game_ended,
                        "pair resolved"
                    );
                    Ok(())
                }),
            )
            .await?;

        self.after_mutation(room_id, &state).await;
        Ok(state)
    }
}
