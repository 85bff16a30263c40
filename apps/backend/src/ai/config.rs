//! AI configuration handling.
//!
//! A seat is configured by a difficulty tier and an optional seed. The tier
//! expands into the planner's tuning parameters.

use serde::{Deserialize, Serialize};

/// Difficulty tiers offered when seating an AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Tuning knobs for the opponent planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerParams {
    /// Chance a newly revealed card is retained in memory.
    pub p_remember: f64,
    /// Chance a known completing card is chosen over a random guess.
    pub p_recall: f64,
    /// Memory size; `None` is unbounded.
    pub capacity: Option<usize>,
}

impl DifficultyTier {
    pub const fn params(self) -> PlannerParams {
        match self {
            DifficultyTier::Easy => PlannerParams {
                p_remember: 0.32,
                p_recall: 0.20,
                capacity: Some(10),
            },
            DifficultyTier::Medium => PlannerParams {
                p_remember: 0.78,
                p_recall: 0.65,
                capacity: Some(24),
            },
            DifficultyTier::Hard => PlannerParams {
                p_remember: 1.0,
                p_recall: 1.0,
                capacity: None,
            },
        }
    }
}

/// Configuration for one AI seat.
///
/// ```json
/// {"difficulty": "hard", "seed": 12345}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub difficulty: DifficultyTier,

    /// Optional RNG seed for reproducible decisions. Without it the planner
    /// draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn new(difficulty: DifficultyTier, seed: Option<u64>) -> Self {
        Self { difficulty, seed }
    }

    pub fn params(&self) -> PlannerParams {
        self.difficulty.params()
    }
}
