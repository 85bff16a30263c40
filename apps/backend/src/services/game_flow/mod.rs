//! Game flow service - bridges the pure match engine with the state store.
//!
//! Every mutation of a room's canonical state goes through
//! [`GameFlowService::run_mutation`], the optimistic compare-and-swap gate.
//! Humans, the server's deferred resolver and AI seats all use the same path.

mod ai_coordinator;
mod mutation;
mod orchestration;
mod player_actions;
pub mod timers;

use std::sync::Arc;

pub use ai_coordinator::{AiSeat, AiSeats};
pub use mutation::MutationGuard;
pub use timers::{SessionTimers, TimerSlot};

use crate::config::AppConfig;
use crate::repos::room_state::StateStore;
use crate::repos::rooms::RoomRepo;
use crate::ws::broker::ChangeNotifier;

/// Game flow service. Cheap to clone; all fields are shared handles.
#[derive(Clone)]
pub struct GameFlowService {
    store: Arc<dyn StateStore>,
    rooms: Arc<dyn RoomRepo>,
    notifier: ChangeNotifier,
    timers: Arc<SessionTimers>,
    ai: Arc<AiSeats>,
    config: Arc<AppConfig>,
}

impl GameFlowService {
    pub fn new(
        store: Arc<dyn StateStore>,
        rooms: Arc<dyn RoomRepo>,
        notifier: ChangeNotifier,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            rooms,
            notifier,
            timers: Arc::new(SessionTimers::new()),
            ai: Arc::new(AiSeats::default()),
            config,
        }
    }

    pub fn timers(&self) -> &SessionTimers {
        &self.timers
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Cancel all deferred work for a room without touching stored state.
    pub fn close_session(&self, room_id: &str) {
        self.timers.cancel_room(room_id);
    }
}
