//! RNG seed derivation utilities for deterministic game behavior.
//!
//! A room carries one base seed; every game played in it and every AI seat
//! gets its own stream derived from that base, so rematches deal a fresh
//! board while replays of the same room seed stay identical.

/// Derive the dealing seed for game `game_no` of a room.
///
/// # Arguments
///
/// * `room_seed` - Base seed chosen when the room was created
/// * `game_no` - 1-based game counter, bumped on every rematch
pub fn derive_deal_seed(room_seed: u64, game_no: u32) -> u64 {
    room_seed
        .wrapping_add((game_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive the planner seed for an AI seat within one game.
///
/// Same room + game + seat gives the same forgetting pattern; distinct seats
/// forget different cards even at the same difficulty.
pub fn derive_ai_seed(room_seed: u64, game_no: u32, seat: usize) -> u64 {
    room_seed
        .wrapping_add((game_no as u64).wrapping_mul(10_000))
        .wrapping_add((seat as u64).wrapping_mul(100))
        .wrapping_add(1)
}
