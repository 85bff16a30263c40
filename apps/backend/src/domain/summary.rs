//! End-of-game summary handed to external persistence.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::state::{CanonicalState, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    /// `None` on a tie for the top score.
    pub winner: Option<PlayerId>,
    pub scores: BTreeMap<PlayerId, u32>,
    pub moves: u32,
    pub attempts: u32,
    pub matched_pairs: usize,
    /// `matched_pairs / attempts`, or 0.0 before the first attempt.
    pub accuracy: f64,
    /// Milliseconds from start to end; `None` while still playing.
    pub duration_ms: Option<i64>,
}

pub fn summarize(state: &CanonicalState) -> MatchSummary {
    let top = state.scores.values().copied().max().unwrap_or(0);
    let mut leaders = state.scores.iter().filter(|(_, s)| **s == top);
    let winner = match (leaders.next(), leaders.next()) {
        (Some((id, _)), None) => Some(id.clone()),
        _ => None,
    };

    let accuracy = if state.attempts == 0 {
        0.0
    } else {
        state.matched_pairs as f64 / state.attempts as f64
    };

    MatchSummary {
        winner,
        scores: state.scores.clone(),
        moves: state.moves,
        attempts: state.attempts,
        matched_pairs: state.matched_pairs,
        accuracy,
        duration_ms: state
            .ended_at
            .map(|end| (end - state.started_at).whole_milliseconds() as i64),
    }
}
