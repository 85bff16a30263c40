use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::game_flow::GameFlowService;
use crate::services::rooms::RoomService;
use crate::ws::broker::ChangeNotifier;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomService,
    pub game_flow: GameFlowService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(rooms: RoomService, game_flow: GameFlowService, config: Arc<AppConfig>) -> Self {
        Self {
            rooms,
            game_flow,
            config,
        }
    }

    /// Change feed for room and state updates.
    pub fn notifier(&self) -> &ChangeNotifier {
        self.game_flow.notifier()
    }
}
