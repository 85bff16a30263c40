//! Error codes for the pairflip backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the pairflip backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Identity & membership
    /// Acting user is missing from the request
    Unauthorized,
    /// User is not a member of the room
    NotAMember,

    // Match validation
    /// Actor is not the current turn owner
    NotYourTurn,
    /// Card is out of range or not face-down
    CardUnavailable,
    /// A revealed pair is still awaiting resolution
    InputLocked,
    /// The game has ended
    GameEnded,
    /// There is no pending pair to resolve
    NothingToResolve,

    // Lobby validation
    /// Room is not full or not every player is ready
    NotReady,
    /// Operation requires the room to be in its lobby
    RoomNotInLobby,
    /// Rematch requested before the game ended
    RematchNotAllowed,
    /// Board dimensions are unusable
    InvalidBoardSize,
    /// General validation error
    ValidationError,

    // Request shape
    /// General bad request error
    BadRequest,
    /// Invalid room ID provided
    InvalidRoomId,
    /// Invalid or malformed HTTP header
    InvalidHeader,
    /// Precondition (If-Match) required for this operation
    PreconditionRequired,

    // Resource Not Found
    /// Room not found
    RoomNotFound,
    /// Room has no game state
    StateNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Version mismatch on compare-and-swap
    OptimisticLock,
    /// Room already holds its maximum number of players
    RoomFull,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
    /// Store failure or timeout
    StoreUnavailable,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotAMember => "NOT_A_MEMBER",

            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::CardUnavailable => "CARD_UNAVAILABLE",
            Self::InputLocked => "INPUT_LOCKED",
            Self::GameEnded => "GAME_ENDED",
            Self::NothingToResolve => "NOTHING_TO_RESOLVE",

            Self::NotReady => "NOT_READY",
            Self::RoomNotInLobby => "ROOM_NOT_IN_LOBBY",
            Self::RematchNotAllowed => "REMATCH_NOT_ALLOWED",
            Self::InvalidBoardSize => "INVALID_BOARD_SIZE",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidRoomId => "INVALID_ROOM_ID",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::PreconditionRequired => "PRECONDITION_REQUIRED",

            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::StateNotFound => "STATE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::RoomFull => "ROOM_FULL",
            Self::Conflict => "CONFLICT",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::NotAMember,
        Self::NotYourTurn,
        Self::CardUnavailable,
        Self::InputLocked,
        Self::GameEnded,
        Self::NothingToResolve,
        Self::NotReady,
        Self::RoomNotInLobby,
        Self::RematchNotAllowed,
        Self::InvalidBoardSize,
        Self::ValidationError,
        Self::BadRequest,
        Self::InvalidRoomId,
        Self::InvalidHeader,
        Self::PreconditionRequired,
        Self::RoomNotFound,
        Self::StateNotFound,
        Self::NotFound,
        Self::OptimisticLock,
        Self::RoomFull,
        Self::Conflict,
        Self::InternalError,
        Self::ConfigError,
        Self::StoreUnavailable,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
