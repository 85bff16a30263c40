use std::sync::Arc;

use crate::adapters::{InMemoryRoomRepo, InMemoryStateStore};
use crate::config::AppConfig;
use crate::repos::room_state::StateStore;
use crate::repos::rooms::RoomRepo;
use crate::services::game_flow::GameFlowService;
use crate::services::rooms::RoomService;
use crate::state::app_state::AppState;
use crate::ws::broker::ChangeNotifier;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: AppConfig,
    store: Option<Arc<dyn StateStore>>,
    rooms: Option<Arc<dyn RoomRepo>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
            rooms: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the state store, e.g. for a failure-injecting one in tests.
    pub fn with_store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_rooms(mut self, rooms: Arc<dyn RoomRepo>) -> Self {
        self.rooms = Some(rooms);
        self
    }

    pub fn build(self) -> AppState {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryStateStore::new()));
        let rooms = self
            .rooms
            .unwrap_or_else(|| Arc::new(InMemoryRoomRepo::new()));
        let config = Arc::new(self.config);

        let game_flow = GameFlowService::new(
            store,
            Arc::clone(&rooms),
            ChangeNotifier::new(),
            Arc::clone(&config),
        );
        let room_service = RoomService::new(rooms, game_flow.clone());
        AppState::new(room_service, game_flow, config)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
