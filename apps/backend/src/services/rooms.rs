//! Room lifecycle: `Lobby -> Playing -> Ended -> (rematch) -> Lobby`.
//!
//! Owns membership and readiness; hands off to [`GameFlowService`] when a
//! game starts and when it is torn down.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};
use ulid::Ulid;

use crate::ai::DifficultyTier;
use crate::domain::board::BoardSize;
use crate::domain::dealing::resolve_seed;
use crate::domain::state::{PlayerId, VersionedState};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::rooms::{
    PlayerKind, Room, RoomMode, RoomPlayer, RoomRecord, RoomRepo, RoomStatus,
};
use crate::services::game_flow::GameFlowService;

/// Parameters for a new room.
#[derive(Debug, Clone, Default)]
pub struct CreateRoom {
    pub board_size: BoardSize,
    pub theme: String,
    pub mode: RoomMode,
    /// Replay a specific deal sequence; random when absent.
    pub seed: Option<u64>,
}

fn require_lobby(record: &RoomRecord, action: &str) -> Result<(), DomainError> {
    if record.room.status != RoomStatus::Lobby {
        return Err(DomainError::validation(
            ValidationKind::RoomNotInLobby,
            format!("Cannot {action} while the room is {:?}", record.room.status),
        ));
    }
    Ok(())
}

fn require_member<'a>(
    record: &'a RoomRecord,
    user_id: &str,
) -> Result<&'a RoomPlayer, DomainError> {
    record.player(user_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotAMember,
            format!("{user_id} is not a member of room {}", record.room.room_id),
        )
    })
}

fn seat(record: &mut RoomRecord, user_id: &str, kind: PlayerKind) -> Result<(), DomainError> {
    if record.is_full() {
        return Err(DomainError::conflict(
            ConflictKind::RoomFull,
            format!(
                "Room {} already has {} players",
                record.room.room_id,
                record.room.mode.capacity()
            ),
        ));
    }
    let is_host = record.room.host_id == user_id;
    record.players.push(RoomPlayer {
        room_id: record.room.room_id.clone(),
        user_id: user_id.to_string(),
        is_ready: matches!(kind, PlayerKind::Ai { .. }),
        is_host,
        joined_at: OffsetDateTime::now_utc(),
        kind,
    });
    Ok(())
}

#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomRepo>,
    game_flow: GameFlowService,
}

impl RoomService {
    pub fn new(rooms: Arc<dyn RoomRepo>, game_flow: GameFlowService) -> Self {
        Self { rooms, game_flow }
    }

    /// Allocate a room in `Lobby` with `host_id` as host. The host still has
    /// to `join` like everyone else.
    pub async fn create(&self, host_id: &str, params: CreateRoom) -> Result<RoomRecord, AppError> {
        let room_id = Ulid::new().to_string();
        let record = RoomRecord {
            room: Room {
                room_id: room_id.clone(),
                host_id: host_id.to_string(),
                status: RoomStatus::Lobby,
                board_size: params.board_size,
                theme: params.theme,
                mode: params.mode,
                seed: resolve_seed(params.seed),
                game_no: 0,
                created_at: OffsetDateTime::now_utc(),
            },
            players: Vec::new(),
        };
        self.rooms.insert(record.clone()).await?;
        info!(room_id, host_id, board = record.room.board_size.as_str(), "room created");
        Ok(record)
    }

    pub async fn get_room(&self, room_id: &str) -> Result<RoomRecord, AppError> {
        Ok(self.rooms.find(room_id).await?)
    }

    /// Take a seat. Joining a room you already sit in is a no-op.
    pub async fn join(&self, room_id: &str, user_id: &str) -> Result<RoomRecord, AppError> {
        let user = user_id.to_string();
        let record = self
            .rooms
            .update(
                room_id,
                Box::new(move |record| {
                    if record.player(&user).is_some() {
                        return Ok(());
                    }
                    require_lobby(record, "join")?;
                    seat(record, &user, PlayerKind::Human)
                }),
            )
            .await?;
        info!(room_id, user_id, players = record.players.len(), "player joined");
        self.game_flow.notifier().publish_room(room_id);
        Ok(record)
    }

    pub async fn set_ready(
        &self,
        room_id: &str,
        user_id: &str,
        ready: bool,
    ) -> Result<RoomRecord, AppError> {
        let user = user_id.to_string();
        let record = self
            .rooms
            .update(
                room_id,
                Box::new(move |record| {
                    require_lobby(record, "change readiness")?;
                    require_member(record, &user)?;
                    if let Some(player) = record.player_mut(&user) {
                        player.is_ready = ready;
                    }
                    Ok(())
                }),
            )
            .await?;
        info!(room_id, user_id, ready, "readiness changed");
        self.game_flow.notifier().publish_room(room_id);
        Ok(record)
    }

    /// Seat an AI opponent. Only the host may do this; the AI is ready at once.
    pub async fn add_ai_player(
        &self,
        room_id: &str,
        requested_by: &str,
        difficulty: DifficultyTier,
    ) -> Result<RoomRecord, AppError> {
        let requester = requested_by.to_string();
        let ai_id: PlayerId = format!("ai-{}", Ulid::new());
        let seat_id = ai_id.clone();
        let record = self
            .rooms
            .update(
                room_id,
                Box::new(move |record| {
                    require_lobby(record, "add an AI player")?;
                    require_member(record, &requester)?;
                    if record.room.host_id != requester {
                        return Err(DomainError::validation_other(
                            "Only the host can seat an AI player",
                        ));
                    }
                    seat(record, &seat_id, PlayerKind::Ai { difficulty })
                }),
            )
            .await?;
        info!(room_id, ai_id, ?difficulty, "AI player seated");
        self.game_flow.notifier().publish_room(room_id);
        Ok(record)
    }

    /// Start a game once every seat is taken and every player is ready.
    pub async fn start_if_ready(
        &self,
        room_id: &str,
        requested_by: &str,
    ) -> Result<VersionedState, AppError> {
        let requester = requested_by.to_string();
        let record = self
            .rooms
            .update(
                room_id,
                Box::new(move |record| {
                    require_lobby(record, "start")?;
                    require_member(record, &requester)?;
                    let capacity = record.room.mode.capacity();
                    if record.players.len() != capacity {
                        return Err(DomainError::validation(
                            ValidationKind::NotReady,
                            format!("{} of {capacity} seats taken", record.players.len()),
                        ));
                    }
                    if let Some(waiting) = record.players.iter().find(|p| !p.is_ready) {
                        return Err(DomainError::validation(
                            ValidationKind::NotReady,
                            format!("{} is not ready", waiting.user_id),
                        ));
                    }
                    record.room.status = RoomStatus::Playing;
                    record.room.game_no += 1;
                    Ok(())
                }),
            )
            .await?;

        match self.game_flow.begin_game(&record).await {
            Ok(state) => {
                self.game_flow.notifier().publish_room(room_id);
                Ok(state)
            }
            Err(err) => {
                warn!(room_id, error = %err, "game start failed; back to lobby");
                let game_no = record.room.game_no;
                self.rooms
                    .update(
                        room_id,
                        Box::new(move |record| {
                            if record.room.game_no == game_no {
                                record.room.status = RoomStatus::Lobby;
                            }
                            Ok(())
                        }),
                    )
                    .await?;
                Err(err)
            }
        }
    }

    /// Send an ended room back to the lobby for another game. Human players
    /// must ready up again; AI players stay ready.
    pub async fn rematch(&self, room_id: &str, requested_by: &str) -> Result<RoomRecord, AppError> {
        let requester = requested_by.to_string();
        let record = self
            .rooms
            .update(
                room_id,
                Box::new(move |record| {
                    require_member(record, &requester)?;
                    if record.room.status != RoomStatus::Ended {
                        return Err(DomainError::validation(
                            ValidationKind::RematchNotAllowed,
                            "A rematch is only possible after the game has ended",
                        ));
                    }
                    record.room.status = RoomStatus::Lobby;
                    for player in &mut record.players {
                        player.is_ready = matches!(player.kind, PlayerKind::Ai { .. });
                    }
                    Ok(())
                }),
            )
            .await?;

        self.game_flow.discard_game(room_id).await?;
        info!(room_id, game_no = record.room.game_no, "room back in lobby");
        self.game_flow.notifier().publish_room(room_id);
        Ok(record)
    }

    /// Leave the room's session: cancels pending timers and AI moves.
    pub async fn close_session(&self, room_id: &str) -> Result<(), AppError> {
        self.rooms.find(room_id).await?;
        self.game_flow.close_session(room_id);
        Ok(())
    }
}
