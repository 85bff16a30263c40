use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::ai_coordinator::AiSeat;
use super::timers::TimerSlot;
use super::GameFlowService;
use crate::ai::{create_ai, AiConfig};
use crate::domain::dealing::deal_board;
use crate::domain::seed_derivation::{derive_ai_seed, derive_deal_seed};
use crate::domain::state::{CanonicalState, VersionedState};
use crate::domain::summary::summarize;
use crate::error::AppError;
use crate::repos::rooms::{RoomRecord, RoomStatus};

impl GameFlowService {
    /// Deal and install a fresh game for a room that has just entered
    /// `Playing`. Seats new AI planners and kicks off the first turn.
    pub async fn begin_game(&self, record: &RoomRecord) -> Result<VersionedState, AppError> {
        let room = &record.room;
        let room_id = room.room_id.as_str();
        let board = room.board_size.config();
        let deal_seed = derive_deal_seed(room.seed, room.game_no);

        let state = CanonicalState::new(
            board,
            deal_board(&board, deal_seed),
            record.turn_order(),
            room.game_no,
            deal_seed,
            OffsetDateTime::now_utc(),
        )?;

        self.timers.cancel_room(room_id);
        let seats = record
            .ai_seats()
            .into_iter()
            .map(|(seat, player_id, difficulty)| {
                let seed = derive_ai_seed(room.seed, room.game_no, seat);
                AiSeat {
                    player_id,
                    ai: Arc::from(create_ai(AiConfig::new(difficulty, Some(seed)))),
                }
            })
            .collect();
        self.ai.install(room_id, seats);

        let installed = self.store.put_initial(room_id, state).await?;
        info!(
            room_id,
            game_no = room.game_no,
            deal_seed,
            first = %installed.state.current_player,
            "game started"
        );
        self.after_mutation(room_id, &installed).await;
        Ok(installed)
    }

    /// Drop a room's game: timers, AI seats and stored state.
    pub async fn discard_game(&self, room_id: &str) -> Result<(), AppError> {
        self.timers.cancel_room(room_id);
        self.ai.clear(room_id);
        self.store.remove(room_id).await?;
        Ok(())
    }

    /// Follow-up after every accepted mutation: notify, let AI seats watch,
    /// then schedule whatever the new state is waiting on.
    pub(super) async fn after_mutation(&self, room_id: &str, current: &VersionedState) {
        let state = &current.state;
        self.notifier.publish_state(room_id, current.version);
        self.ai.observe_all(room_id, state);

        if state.is_ended() {
            let summary = summarize(state);
            info!(
                room_id,
                game_no = state.game_no,
                winner = ?summary.winner,
                attempts = summary.attempts,
                accuracy = summary.accuracy,
                "game ended"
            );
            self.mark_room_ended(room_id, state.game_no).await;
            self.timers.cancel_room(room_id);
            return;
        }

        if let Some(pending) = &state.pending {
            if self.config.auto_resolve {
                let wait: std::time::Duration = (pending.resolve_after - OffsetDateTime::now_utc())
                    .try_into()
                    .unwrap_or_default();
                self.schedule_resolve(room_id, state.game_no, current.version, wait);
            }
            return;
        }

        if state.selected.is_empty() && self.ai.is_ai(room_id, &state.current_player) {
            self.schedule_ai_turn(
                room_id,
                state.game_no,
                state.current_player.clone(),
                self.config.ai_first_flip_delay,
            );
        }
    }

    fn schedule_resolve(
        &self,
        room_id: &str,
        game_no: u32,
        version: u32,
        wait: std::time::Duration,
    ) {
        let svc = self.clone();
        let room = room_id.to_string();
        self.timers
            .schedule(room_id, game_no, TimerSlot::Resolve, wait, async move {
                svc.resolve_due(&room, game_no, version).await;
            });
    }

    /// Deferred resolver body. A no-op when the game it was scheduled for
    /// has been replaced or has already moved on.
    async fn resolve_due(&self, room_id: &str, game_no: u32, version: u32) {
        let current = match self.store.get_state(room_id).await {
            Ok(current) => current,
            Err(_) => {
                debug!(room_id, game_no, "stale resolve timer: no state");
                return;
            }
        };
        if current.state.game_no != game_no || current.version != version {
            debug!(
                room_id,
                game_no,
                version,
                current_game = current.state.game_no,
                current_version = current.version,
                "stale resolve timer"
            );
            return;
        }
        if let Err(err) = self.resolve_with(room_id, version, None).await {
            debug!(room_id, game_no, version, error = %err, "deferred resolve skipped");
        }
    }

    async fn mark_room_ended(&self, room_id: &str, game_no: u32) {
        let result = self
            .rooms
            .update(
                room_id,
                Box::new(move |record| {
                    if record.room.status == RoomStatus::Playing && record.room.game_no == game_no
                    {
                        record.room.status = RoomStatus::Ended;
                    }
                    Ok(())
                }),
            )
            .await;
        match result {
            Ok(_) => self.notifier.publish_room(room_id),
            Err(err) => warn!(room_id, game_no, error = %err, "could not mark room ended"),
        }
    }
}
