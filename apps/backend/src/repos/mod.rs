//! Repository traits for rooms and their canonical game state.

pub mod room_state;
pub mod rooms;
