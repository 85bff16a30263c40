//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod dealing;
pub mod matching;
pub mod seed_derivation;
pub mod state;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_state_helpers;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_engine;
#[cfg(test)]
mod tests_scenarios;

// Re-exports for ergonomics
pub use board::{BoardConfig, BoardSize, Card, CardState};
pub use dealing::deal_board;
pub use matching::{flip, resolve_pending, FlipOutcome, Resolution};
pub use seed_derivation::{derive_ai_seed, derive_deal_seed};
pub use state::{
    CanonicalState, GameStatus, PendingAction, PendingKind, PlayerId, VersionedState,
};
pub use summary::{summarize, MatchSummary};
