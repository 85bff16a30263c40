// Proptest generators for domain types.
// Boards are always valid presets; action scripts are raw indices that the
// harness feeds to the engine whether or not they are legal.

use proptest::prelude::*;
use time::macros::datetime;
use time::OffsetDateTime;

use crate::domain::board::BoardSize;
use crate::domain::dealing::deal_board;
use crate::domain::state::{CanonicalState, PlayerId};

pub const T0: OffsetDateTime = datetime!(2025-06-01 12:00 UTC);

pub fn board_size() -> impl Strategy<Value = BoardSize> {
    prop_oneof![
        Just(BoardSize::Small),
        Just(BoardSize::Medium),
        Just(BoardSize::Large),
    ]
}

/// Two to four distinct player ids.
pub fn turn_order() -> impl Strategy<Value = Vec<PlayerId>> {
    (2usize..=4).prop_map(|n| (0..n).map(|i| format!("p{i}")).collect())
}

/// A freshly dealt game.
pub fn fresh_state() -> impl Strategy<Value = CanonicalState> {
    (board_size(), any::<u64>(), turn_order()).prop_map(|(size, seed, order)| {
        let cfg = size.config();
        CanonicalState::new(cfg, deal_board(&cfg, seed), order, 1, seed, T0)
            .expect("generated state is valid")
    })
}

/// One scripted step against the engine.
#[derive(Debug, Clone)]
pub enum Step {
    /// Current player flips this index; values past the board are kept.
    Flip(usize),
    /// Someone other than the current player tries to flip.
    ImpostorFlip(usize),
    Resolve,
}

pub fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (0usize..70).prop_map(Step::Flip),
        1 => (0usize..70).prop_map(Step::ImpostorFlip),
        3 => Just(Step::Resolve),
    ]
}

pub fn script() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step(), 1..200)
}
