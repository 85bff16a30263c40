//! Flip/resolve state machine.
//!
//! Both operations validate every precondition before touching `state`, so a
//! rejected call leaves it byte-for-byte unchanged.

use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::domain::board::CardState;
use crate::domain::state::{
    require_pending, CanonicalState, GameStatus, PendingAction, PendingKind, PlayerId,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Outcome of a successful flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of the turn is face up.
    Revealed,
    /// Second card is face up; resolution is pending.
    PairPending(PendingKind),
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: PendingKind,
    /// Player who owned the turn being resolved.
    pub player: PlayerId,
    pub game_ended: bool,
}

/// Reveal card `index` on behalf of `actor`.
///
/// Preconditions are checked in order: game still playing, input not locked,
/// actor owns the turn, card is hidden. An out-of-range index counts as an
/// unavailable card.
pub fn flip(
    state: &mut CanonicalState,
    index: usize,
    actor: &str,
    now: OffsetDateTime,
    resolve_delay: Duration,
) -> Result<FlipOutcome, DomainError> {
    if state.status == GameStatus::Ended {
        return Err(DomainError::validation(
            ValidationKind::GameEnded,
            "The game has ended",
        ));
    }
    if state.input_locked {
        return Err(DomainError::validation(
            ValidationKind::InputLocked,
            "A revealed pair is still resolving",
        ));
    }
    if state.current_player != actor {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("It is {}'s turn", state.current_player),
        ));
    }
    match state.cards.get(index) {
        Some(card) if card.state == CardState::Hidden => {}
        Some(_) => {
            return Err(DomainError::validation(
                ValidationKind::CardUnavailable,
                format!("Card {index} is already face up"),
            ))
        }
        None => {
            return Err(DomainError::validation(
                ValidationKind::CardUnavailable,
                format!("Card {index} is not on this board"),
            ))
        }
    }

    state.cards[index].state = CardState::Revealed;
    state.selected.push(index);
    state.moves += 1;

    if let &[first, second] = state.selected.as_slice() {
        let kind = if state.cards[first].pair_id == state.cards[second].pair_id {
            PendingKind::Match
        } else {
            PendingKind::Mismatch
        };
        state.input_locked = true;
        state.pending = Some(PendingAction {
            kind,
            indices: (first, second),
            resolve_after: now + resolve_delay,
        });
        debug!(first, second, ?kind, "pair revealed");
        return Ok(FlipOutcome::PairPending(kind));
    }

    Ok(FlipOutcome::Revealed)
}

/// Apply the pending pair's outcome.
///
/// A match scores for the current player, who keeps the turn; a mismatch
/// hides both cards and passes the turn round-robin. Either way the attempt
/// counter advances and the selection is cleared.
pub fn resolve_pending(
    state: &mut CanonicalState,
    now: OffsetDateTime,
) -> Result<Resolution, DomainError> {
    let pending = require_pending(state, "resolve_pending")?.clone();
    let (a, b) = pending.indices;
    let player = state.current_player.clone();

    // Must fail before any card moves.
    let next = match pending.kind {
        PendingKind::Match => player.clone(),
        PendingKind::Mismatch => state.next_player(&player)?,
    };

    match pending.kind {
        PendingKind::Match => {
            for i in [a, b] {
                state.cards[i].state = CardState::Matched;
                state.cards[i].owner = Some(player.clone());
            }
            *state.scores.entry(player.clone()).or_insert(0) += 1;
            state.matched_pairs += 1;
        }
        PendingKind::Mismatch => {
            for i in [a, b] {
                state.cards[i].state = CardState::Hidden;
            }
        }
    }

    state.current_player = next;
    state.attempts += 1;
    state.selected.clear();
    state.pending = None;
    state.input_locked = false;

    let game_ended = state.matched_pairs == state.board.total_pairs;
    if game_ended {
        state.status = GameStatus::Ended;
        state.ended_at = Some(now);
    }

    Ok(Resolution {
        kind: pending.kind,
        player,
        game_ended,
    })
}
