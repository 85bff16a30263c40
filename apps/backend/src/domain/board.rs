//! Board and card model: pure data plus the invariants construction must keep.

use serde::{Deserialize, Serialize};

use crate::domain::state::PlayerId;
use crate::errors::domain::{DomainError, ValidationKind};

/// Face state of a single card.
///
/// Legal transitions: `Hidden → Revealed`, `Revealed → Hidden` (mismatch
/// rollback) and `Revealed → Matched` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Final board position.
    pub index: usize,
    /// Shared by exactly the two cards of a pair.
    pub pair_id: String,
    /// Icon shown on the face; may repeat across pairs on large boards.
    pub face_id: String,
    pub visual_tint: String,
    pub state: CardState,
    /// Set only on `Matched`, to the player who completed the match.
    pub owner: Option<PlayerId>,
}

impl Card {
    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }
}

/// Named board presets offered to players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    #[default]
    #[serde(rename = "4x4")]
    Small,
    #[serde(rename = "6x6")]
    Medium,
    #[serde(rename = "8x8")]
    Large,
}

impl BoardSize {
    pub const fn dims(self) -> (u8, u8) {
        match self {
            BoardSize::Small => (4, 4),
            BoardSize::Medium => (6, 6),
            BoardSize::Large => (8, 8),
        }
    }

    pub fn config(self) -> BoardConfig {
        let (rows, cols) = self.dims();
        BoardConfig {
            rows,
            cols,
            total_pairs: (rows as usize * cols as usize) / 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BoardSize::Small => "4x4",
            BoardSize::Medium => "6x6",
            BoardSize::Large => "8x8",
        }
    }
}

/// Board dimensions. The card count is always even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: u8,
    pub cols: u8,
    pub total_pairs: usize,
}

impl BoardConfig {
    /// Validate custom dimensions; presets go through [`BoardSize::config`].
    pub fn new(rows: u8, cols: u8) -> Result<Self, DomainError> {
        let cells = rows as usize * cols as usize;
        if cells == 0 || cells % 2 != 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidBoardSize,
                format!("A {rows}x{cols} board must have a positive, even number of cards"),
            ));
        }
        Ok(Self {
            rows,
            cols,
            total_pairs: cells / 2,
        })
    }

    pub fn card_count(&self) -> usize {
        self.total_pairs * 2
    }
}
