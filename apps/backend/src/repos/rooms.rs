//! Room repository contract and room domain models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ai::config::DifficultyTier;
use crate::domain::board::BoardSize;
use crate::domain::state::PlayerId;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Lobby,
    Playing,
    Ended,
}

/// Seat count of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomMode {
    /// Head-to-head.
    #[default]
    Duel,
    Squad,
}

impl RoomMode {
    pub const fn capacity(self) -> usize {
        match self {
            RoomMode::Duel => 2,
            RoomMode::Squad => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Ai { difficulty: DifficultyTier },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: String,
    pub host_id: PlayerId,
    pub status: RoomStatus,
    pub board_size: BoardSize,
    pub theme: String,
    pub mode: RoomMode,
    /// Base seed; each game derives its deal from this and `game_no`.
    pub seed: u64,
    /// Number of games started in this room so far.
    pub game_no: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPlayer {
    pub room_id: String,
    pub user_id: PlayerId,
    pub is_ready: bool,
    pub is_host: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    #[serde(flatten)]
    pub kind: PlayerKind,
}

/// A room together with its seated players, in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub room: Room,
    pub players: Vec<RoomPlayer>,
}

impl RoomRecord {
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.room.mode.capacity()
    }

    pub fn player(&self, user_id: &str) -> Option<&RoomPlayer> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn player_mut(&mut self, user_id: &str) -> Option<&mut RoomPlayer> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    /// Host first, then everyone else in join order.
    pub fn turn_order(&self) -> Vec<PlayerId> {
        let host = self.players.iter().filter(|p| p.is_host);
        let rest = self.players.iter().filter(|p| !p.is_host);
        host.chain(rest).map(|p| p.user_id.clone()).collect()
    }

    /// Seat index (in turn order) and difficulty of every AI player.
    pub fn ai_seats(&self) -> Vec<(usize, PlayerId, DifficultyTier)> {
        self.turn_order()
            .into_iter()
            .enumerate()
            .filter_map(|(seat, id)| match self.player(&id)?.kind {
                PlayerKind::Ai { difficulty } => Some((seat, id, difficulty)),
                PlayerKind::Human => None,
            })
            .collect()
    }
}

pub type RoomUpdate<'a> =
    Box<dyn FnOnce(&mut RoomRecord) -> Result<(), DomainError> + Send + 'a>;

/// Storage for room records. `update` is atomic per room: the closure runs
/// against a copy that is committed only on success.
#[async_trait]
pub trait RoomRepo: Send + Sync {
    async fn insert(&self, record: RoomRecord) -> Result<(), DomainError>;

    /// `NotFound(Room)` when absent.
    async fn find(&self, room_id: &str) -> Result<RoomRecord, DomainError>;

    async fn update(
        &self,
        room_id: &str,
        update: RoomUpdate<'_>,
    ) -> Result<RoomRecord, DomainError>;
}
