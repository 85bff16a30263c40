use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::board::{BoardConfig, Card, CardState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Opaque player identity supplied by the identity collaborator.
pub type PlayerId = String;

/// Engine-level progression. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingKind {
    Match,
    Mismatch,
}

/// Two revealed cards waiting for their outcome to be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: PendingKind,
    pub indices: (usize, usize),
    #[serde(with = "time::serde::rfc3339")]
    pub resolve_after: OffsetDateTime,
}

/// Authoritative snapshot of one game in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalState {
    pub board: BoardConfig,
    pub cards: Vec<Card>,
    /// Indices revealed this turn (0..=2).
    pub selected: Vec<usize>,
    pub current_player: PlayerId,
    /// Round-robin order; the first entry starts.
    pub turn_order: Vec<PlayerId>,
    pub scores: BTreeMap<PlayerId, u32>,
    pub input_locked: bool,
    pub pending: Option<PendingAction>,
    pub matched_pairs: usize,
    pub attempts: u32,
    pub moves: u32,
    pub status: GameStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    /// Per-room game counter; scheduled work captures it to detect staleness.
    pub game_no: u32,
    /// Seed the board was dealt from.
    pub deal_seed: u64,
}

impl CanonicalState {
    /// Fresh game over an already-dealt board.
    ///
    /// `turn_order` must be non-empty and free of duplicates.
    pub fn new(
        board: BoardConfig,
        cards: Vec<Card>,
        turn_order: Vec<PlayerId>,
        game_no: u32,
        deal_seed: u64,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let Some(first) = turn_order.first().cloned() else {
            return Err(DomainError::validation_other(
                "A game needs at least one player",
            ));
        };
        let scores: BTreeMap<PlayerId, u32> =
            turn_order.iter().map(|p| (p.clone(), 0)).collect();
        if scores.len() != turn_order.len() {
            return Err(DomainError::validation_other(
                "Turn order contains the same player twice",
            ));
        }
        if cards.len() != board.card_count() {
            return Err(DomainError::validation_other(format!(
                "Board expects {} cards, got {}",
                board.card_count(),
                cards.len()
            )));
        }

        Ok(Self {
            board,
            cards,
            selected: Vec::with_capacity(2),
            current_player: first,
            turn_order,
            scores,
            input_locked: false,
            pending: None,
            matched_pairs: 0,
            attempts: 0,
            moves: 0,
            status: GameStatus::Playing,
            started_at: now,
            ended_at: None,
            game_no,
            deal_seed,
        })
    }

    pub fn is_ended(&self) -> bool {
        self.status == GameStatus::Ended
    }

    pub fn hidden_count(&self) -> usize {
        self.cards.iter().filter(|c| c.state == CardState::Hidden).count()
    }

    pub fn hidden_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .filter(|c| c.state == CardState::Hidden)
            .map(|c| c.index)
            .collect()
    }

    pub fn is_member(&self, player: &str) -> bool {
        self.turn_order.iter().any(|p| p == player)
    }

    /// The player after `current` in turn order, wrapping around.
    pub fn next_player(&self, current: &str) -> Result<PlayerId, DomainError> {
        let pos = self
            .turn_order
            .iter()
            .position(|p| p == current)
            .ok_or_else(|| {
                DomainError::validation_other(format!(
                    "Invariant violated: current player {current} is not in turn order"
                ))
            })?;
        Ok(self.turn_order[(pos + 1) % self.turn_order.len()].clone())
    }
}

/// A canonical state paired with its compare-and-swap version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedState {
    pub state: CanonicalState,
    pub version: u32,
}

pub fn require_pending<'a>(
    state: &'a CanonicalState,
    ctx: &'static str,
) -> Result<&'a PendingAction, DomainError> {
    state.pending.as_ref().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NothingToResolve,
            format!("No pending pair to resolve ({ctx})"),
        )
    })
}
