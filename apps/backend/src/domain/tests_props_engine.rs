//! Property-based tests for the flip/resolve engine.
//! Random scripts of legal and illegal actions are replayed against fresh
//! deals; invariants are checked after every step.

use proptest::prelude::*;
use time::Duration;

use crate::domain::board::CardState;
use crate::domain::matching::{flip, resolve_pending};
use crate::domain::state::{CanonicalState, PendingKind};
use crate::domain::test_gens::{self, Step, T0};
use crate::domain::test_prelude;

fn count(state: &CanonicalState, wanted: CardState) -> usize {
    state.cards.iter().filter(|c| c.state == wanted).count()
}

fn check_invariants(state: &CanonicalState) -> Result<(), TestCaseError> {
    let hidden = count(state, CardState::Hidden);
    let revealed = count(state, CardState::Revealed);
    let matched = count(state, CardState::Matched);

    prop_assert_eq!(revealed, state.selected.len());
    prop_assert_eq!(matched, state.matched_pairs * 2);
    prop_assert_eq!(
        state.matched_pairs + (hidden + revealed) / 2,
        state.board.total_pairs
    );
    if state.selected.is_empty() {
        prop_assert_eq!(state.matched_pairs + hidden / 2, state.board.total_pairs);
    }
    prop_assert_eq!(state.pending.is_some(), state.selected.len() == 2);
    prop_assert_eq!(state.input_locked, state.pending.is_some());
    prop_assert_eq!(
        state.scores.values().map(|&s| s as usize).sum::<usize>(),
        state.matched_pairs
    );
    for card in &state.cards {
        prop_assert_eq!(card.owner.is_some(), card.state == CardState::Matched);
    }
    Ok(())
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: Conservation and bookkeeping
    /// No card is ever lost; revealed cards are exactly the selection.
    #[test]
    fn prop_conservation_holds_for_any_script(
        mut state in test_gens::fresh_state(),
        script in test_gens::script(),
    ) {
        check_invariants(&state)?;
        for step in script {
            let actor = state.current_player.clone();
            let _ = match step {
                Step::Flip(i) => flip(&mut state, i, &actor, T0, Duration::SECOND).map(|_| ()),
                Step::ImpostorFlip(i) => {
                    let other = state.next_player(&actor).unwrap();
                    flip(&mut state, i, &other, T0, Duration::SECOND).map(|_| ())
                }
                Step::Resolve => resolve_pending(&mut state, T0).map(|_| ()),
            };
            check_invariants(&state)?;
        }
    }

    /// Property: Rejected mutations are side-effect free
    #[test]
    fn prop_rejected_steps_leave_state_untouched(
        mut state in test_gens::fresh_state(),
        script in test_gens::script(),
    ) {
        for step in script {
            let before = state.clone();
            let actor = state.current_player.clone();
            let result = match step {
                Step::Flip(i) => flip(&mut state, i, &actor, T0, Duration::SECOND).map(|_| ()),
                Step::ImpostorFlip(i) => {
                    let other = state.next_player(&actor).unwrap();
                    flip(&mut state, i, &other, T0, Duration::SECOND).map(|_| ())
                }
                Step::Resolve => resolve_pending(&mut state, T0).map(|_| ()),
            };
            if result.is_err() {
                prop_assert_eq!(&state, &before);
            }
        }
    }

    /// Property: Turn rule
    /// Mismatch always passes the turn; match never does.
    #[test]
    fn prop_turn_rule(
        mut state in test_gens::fresh_state(),
        script in test_gens::script(),
    ) {
        for step in script {
            let actor = state.current_player.clone();
            match step {
                Step::Resolve => {
                    if let Ok(res) = resolve_pending(&mut state, T0) {
                        prop_assert_eq!(&res.player, &actor);
                        match res.kind {
                            PendingKind::Match => prop_assert_eq!(&state.current_player, &actor),
                            PendingKind::Mismatch => prop_assert_ne!(&state.current_player, &actor),
                        }
                    }
                }
                Step::Flip(i) | Step::ImpostorFlip(i) => {
                    let _ = flip(&mut state, i, &actor, T0, Duration::SECOND);
                }
            }
        }
    }

    /// Property: Dealing is a permutation of pairs
    #[test]
    fn prop_deal_pairs_every_id_twice(state in test_gens::fresh_state()) {
        let mut ids: Vec<&str> = state.cards.iter().map(|c| c.pair_id.as_str()).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids.len(), state.board.total_pairs * 2);
        for chunk in ids.chunks(2) {
            prop_assert_eq!(chunk[0], chunk[1]);
        }
        ids.dedup();
        prop_assert_eq!(ids.len(), state.board.total_pairs);
    }
}
