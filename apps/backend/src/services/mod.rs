//! Application services: room lifecycle and game flow.

pub mod game_flow;
pub mod rooms;

pub use game_flow::GameFlowService;
pub use rooms::{CreateRoom, RoomService};
