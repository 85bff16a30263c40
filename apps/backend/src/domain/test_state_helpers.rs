//! Test-only state builders shared by domain and service unit tests.

#[cfg(test)]
pub use state_helpers::{scenario_cards, scenario_state, SCENARIO_T0};

#[cfg(test)]
mod state_helpers {
    use time::macros::datetime;
    use time::OffsetDateTime;

    use crate::domain::board::{BoardSize, Card, CardState};
    use crate::domain::state::CanonicalState;

    pub const SCENARIO_T0: OffsetDateTime = datetime!(2025-02-01 09:00 UTC);

    /// Fixed 4x4 layout: 0 and 5 are "sun", 1 and 2 are "moon", the rest
    /// are laid out in adjacent pairs from index 3.
    pub fn scenario_cards() -> Vec<Card> {
        let layout: [&str; 16] = [
            "sun", "moon", "moon", "star", "star", "sun", "bolt", "bolt", "leaf", "leaf", "gem",
            "gem", "bell", "bell", "key", "key",
        ];
        layout
            .iter()
            .enumerate()
            .map(|(index, face)| Card {
                index,
                pair_id: format!("{face}-0"),
                face_id: face.to_string(),
                visual_tint: "#22d3ee".to_string(),
                state: CardState::Hidden,
                owner: None,
            })
            .collect()
    }

    /// Two-player game on the fixed layout, "A" to move.
    pub fn scenario_state() -> CanonicalState {
        CanonicalState::new(
            BoardSize::Small.config(),
            scenario_cards(),
            vec!["A".to_string(), "B".to_string()],
            1,
            0,
            SCENARIO_T0,
        )
        .expect("scenario state is valid")
    }
}
