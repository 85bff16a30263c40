use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use super::timers::TimerSlot;
use super::GameFlowService;
use crate::ai::AiPlayer;
use crate::domain::state::{CanonicalState, PlayerId};
use crate::error::AppError;
use crate::errors::ErrorCode;

/// One AI participant of a running game.
#[derive(Clone)]
pub struct AiSeat {
    pub player_id: PlayerId,
    pub ai: Arc<dyn AiPlayer>,
}

/// AI participants per room, replaced wholesale on every new game.
#[derive(Default)]
pub struct AiSeats {
    rooms: DashMap<String, Vec<AiSeat>>,
}

impl AiSeats {
    pub fn install(&self, room_id: &str, seats: Vec<AiSeat>) {
        if seats.is_empty() {
            self.rooms.remove(room_id);
        } else {
            self.rooms.insert(room_id.to_string(), seats);
        }
    }

    pub fn clear(&self, room_id: &str) {
        self.rooms.remove(room_id);
    }

    pub fn player(&self, room_id: &str, player_id: &str) -> Option<Arc<dyn AiPlayer>> {
        self.rooms.get(room_id).and_then(|seats| {
            seats
                .iter()
                .find(|s| s.player_id == player_id)
                .map(|s| Arc::clone(&s.ai))
        })
    }

    pub fn is_ai(&self, room_id: &str, player_id: &str) -> bool {
        self.player(room_id, player_id).is_some()
    }

    /// Let every AI in the room see the latest snapshot.
    pub fn observe_all(&self, room_id: &str, state: &CanonicalState) {
        let seats = match self.rooms.get(room_id) {
            Some(seats) => seats.clone(),
            None => return,
        };
        for seat in seats {
            seat.ai.observe(state);
        }
    }
}

/// Whether an AI turn scheduled for `game_no` may still start.
fn turn_is_current(state: &CanonicalState, game_no: u32, ai_id: &str) -> bool {
    state.game_no == game_no
        && !state.is_ended()
        && !state.input_locked
        && state.current_player == ai_id
        && state.selected.is_empty()
}

impl GameFlowService {
    pub(super) fn schedule_ai_turn(
        &self,
        room_id: &str,
        game_no: u32,
        ai_id: PlayerId,
        delay: std::time::Duration,
    ) {
        let svc = self.clone();
        let room = room_id.to_string();
        self.timers
            .schedule(room_id, game_no, TimerSlot::AiTurn, delay, async move {
                svc.play_ai_turn(&room, game_no, &ai_id).await;
            });
    }

    /// Play both flips of an AI turn through the regular gated path.
    ///
    /// Losing a race to another caller is expected and ends the turn
    /// quietly; the winner's follow-up reschedules the AI if needed.
    pub(super) async fn play_ai_turn(&self, room_id: &str, game_no: u32, ai_id: &str) {
        match self.try_ai_turn(room_id, game_no, ai_id).await {
            Ok(()) => {}
            Err(err) if err.code() == ErrorCode::OptimisticLock => {
                debug!(room_id, game_no, ai_id, "AI lost a version race");
            }
            Err(err) => {
                warn!(room_id, game_no, ai_id, error = %err, "AI turn aborted");
            }
        }
    }

    async fn try_ai_turn(&self, room_id: &str, game_no: u32, ai_id: &str) -> Result<(), AppError> {
        let Some(ai) = self.ai.player(room_id, ai_id) else {
            debug!(room_id, ai_id, "AI seat gone");
            return Ok(());
        };

        let current = self.store.get_state(room_id).await?;
        if !turn_is_current(&current.state, game_no, ai_id) {
            debug!(room_id, game_no, ai_id, "stale AI timer");
            return Ok(());
        }

        ai.observe(&current.state);
        let first = ai.choose_first(&current.state)?;
        let after_first = self.flip(room_id, ai_id, first, current.version).await?;

        tokio::time::sleep(self.config.ai_second_flip_delay).await;

        let fresh = self.store.get_state(room_id).await?;
        if fresh.version != after_first.version || fresh.state.game_no != game_no {
            debug!(room_id, game_no, ai_id, "state moved during AI think time");
            return Ok(());
        }

        let second = ai.choose_second(&fresh.state, first)?;
        let done = self.flip(room_id, ai_id, second, fresh.version).await?;
        info!(room_id, ai_id, first, second, version = done.version, "AI turn played");
        Ok(())
    }
}
