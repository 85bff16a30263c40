//! Cancellable deferred work per room.
//!
//! Each room has one slot per kind of deferred work. Scheduling into an
//! occupied slot cancels the previous task. Cancellation drops the task at
//! its next await point, so a cancelled AI turn stops between its two flips.
//! Tasks still re-check `game_no` and version before acting, since a task
//! that already passed its last await cannot be recalled.

use std::future::Future;
use std::time::Duration;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Server-side `resolve_pending` at `resolve_after`.
    Resolve,
    /// AI thinking time followed by its flips.
    AiTurn,
}

#[derive(Debug)]
struct ScheduledTask {
    game_no: u32,
    token: CancellationToken,
}

#[derive(Debug, Default)]
pub struct SessionTimers {
    slots: DashMap<(String, TimerSlot), ScheduledTask>,
}

impl SessionTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` unless cancelled first. Must be called from
    /// within a tokio runtime.
    pub fn schedule<F>(&self, room_id: &str, game_no: u32, slot: TimerSlot, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let previous = self.slots.insert(
            (room_id.to_string(), slot),
            ScheduledTask {
                game_no,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
        }

        let room = room_id.to_string();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(room_id = %room, game_no, ?slot, "timer cancelled");
                }
                _ = async {
                    tokio::time::sleep(delay).await;
                    task.await;
                } => {
                    trace!(room_id = %room, game_no, ?slot, "timer finished");
                }
            }
        });
    }

    /// Cancel every task for the room.
    pub fn cancel_room(&self, room_id: &str) {
        for slot in [TimerSlot::Resolve, TimerSlot::AiTurn] {
            if let Some((_, task)) = self.slots.remove(&(room_id.to_string(), slot)) {
                task.token.cancel();
                debug!(room_id, game_no = task.game_no, ?slot, "timer cleared");
            }
        }
    }

    /// Whether a task in `slot` is scheduled and not yet cancelled.
    pub fn is_scheduled(&self, room_id: &str, slot: TimerSlot) -> bool {
        self.slots
            .get(&(room_id.to_string(), slot))
            .is_some_and(|t| !t.token.is_cancelled())
    }
}
