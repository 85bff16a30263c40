//! Scripted games on a fixed 4x4 layout.

use time::Duration;

use crate::domain::board::CardState;
use crate::domain::matching::{flip, resolve_pending, FlipOutcome};
use crate::domain::state::{GameStatus, PendingKind};
use crate::domain::summary::summarize;
use crate::domain::test_state_helpers::{scenario_state, SCENARIO_T0};
use crate::errors::domain::ValidationKind;

const DELAY: Duration = Duration::SECOND;

#[test]
fn mismatch_then_match_follows_turn_rule() {
    let mut s = scenario_state();

    flip(&mut s, 0, "A", SCENARIO_T0, DELAY).unwrap();
    let out = flip(&mut s, 1, "A", SCENARIO_T0, DELAY).unwrap();
    assert_eq!(out, FlipOutcome::PairPending(PendingKind::Mismatch));
    resolve_pending(&mut s, SCENARIO_T0).unwrap();

    assert_eq!(s.current_player, "B");
    assert_eq!(s.cards[0].state, CardState::Hidden);
    assert_eq!(s.cards[1].state, CardState::Hidden);

    flip(&mut s, 0, "B", SCENARIO_T0, DELAY).unwrap();
    let out = flip(&mut s, 5, "B", SCENARIO_T0, DELAY).unwrap();
    assert_eq!(out, FlipOutcome::PairPending(PendingKind::Match));
    resolve_pending(&mut s, SCENARIO_T0).unwrap();

    assert_eq!(s.scores["B"], 1);
    assert_eq!(s.matched_pairs, 1);
    assert_eq!(s.current_player, "B");
    assert_eq!(s.cards[0].state, CardState::Matched);
    assert_eq!(s.cards[5].state, CardState::Matched);
    assert_eq!(s.cards[5].owner.as_deref(), Some("B"));
    assert_eq!(s.attempts, 2);
    assert_eq!(s.moves, 4);
}

#[test]
fn opponent_cannot_flip_during_pending_window() {
    let mut s = scenario_state();
    flip(&mut s, 3, "A", SCENARIO_T0, DELAY).unwrap();
    flip(&mut s, 4, "A", SCENARIO_T0, DELAY).unwrap();

    let err = flip(&mut s, 6, "B", SCENARIO_T0, DELAY).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InputLocked));
    let err = flip(&mut s, 6, "A", SCENARIO_T0, DELAY).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InputLocked));
}

#[test]
fn full_game_ends_with_summary() {
    let mut s = scenario_state();
    let pairs = [(0, 5), (1, 2), (3, 4), (6, 7), (8, 9), (10, 11), (12, 13), (14, 15)];
    let end = SCENARIO_T0 + Duration::minutes(2);
    for (x, y) in pairs {
        flip(&mut s, x, "A", SCENARIO_T0, DELAY).unwrap();
        flip(&mut s, y, "A", SCENARIO_T0, DELAY).unwrap();
        resolve_pending(&mut s, end).unwrap();
    }
    assert_eq!(s.status, GameStatus::Ended);

    let summary = summarize(&s);
    assert_eq!(summary.winner.as_deref(), Some("A"));
    assert_eq!(summary.scores["B"], 0);
    assert!((summary.accuracy - 1.0).abs() < f64::EPSILON);
    assert_eq!(summary.duration_ms, Some(120_000));
}
