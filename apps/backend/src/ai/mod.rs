//! AI player module - automated opponents.
//!
//! This module provides:
//! - AI trait for opponent implementations
//! - OpponentPlanner: memory-bounded probabilistic player (seedable for tests)
//! - Difficulty tiers and their tuning parameters

pub mod config;
pub mod memory;
mod planner;
mod trait_def;

pub use config::{AiConfig, DifficultyTier, PlannerParams};
pub use memory::AiMemory;
pub use planner::OpponentPlanner;
pub use trait_def::{AiError, AiPlayer};

/// Create the AI for a seat.
pub fn create_ai(config: AiConfig) -> Box<dyn AiPlayer> {
    Box::new(OpponentPlanner::new(config))
}
