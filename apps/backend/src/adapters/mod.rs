//! In-memory implementations of the repository traits.

pub mod room_state_mem;
pub mod rooms_mem;

pub use room_state_mem::InMemoryStateStore;
pub use rooms_mem::InMemoryRoomRepo;
