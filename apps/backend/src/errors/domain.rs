//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through the provided `From<DomainError> for AppError` implementation.
//!
//! Every rejection leaves the canonical state exactly as it was; none of
//! these errors is fatal to the process.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rejections of a request against current state. Safe to show to the
/// acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    NotYourTurn,
    CardUnavailable,
    InputLocked,
    GameEnded,
    NothingToResolve,
    /// Room is below capacity or someone has not readied up.
    NotReady,
    NotAMember,
    RoomNotInLobby,
    RematchNotAllowed,
    InvalidBoardSize,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    State,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The supplied version does not match the stored one. Recoverable by
    /// re-reading state; never retried blindly.
    OptimisticLock,
    /// The room already holds its maximum number of players.
    RoomFull,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or game rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Version mismatch on a compare-and-swap.
    pub fn version_conflict(expected: u32, actual: u32) -> Self {
        Self::conflict(
            ConflictKind::OptimisticLock,
            format!(
                "State was modified concurrently (expected version {expected}, actual version {actual}). Refresh and retry."
            ),
        )
    }

    pub fn is_version_conflict(&self) -> bool {
        matches!(self, DomainError::Conflict(ConflictKind::OptimisticLock, _))
    }

    /// The validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}
