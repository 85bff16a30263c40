//! AI player trait definition.

use std::fmt;

use crate::domain::state::CanonicalState;
use crate::error::AppError;

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI encountered an internal error
    Internal(String),
    /// No legal flip exists for the AI in this state
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// Trait for AI players.
///
/// Implementations only ever see the public canonical state and learn card
/// identities by watching them get revealed. Every choice they make is
/// submitted through the same gated `flip` path a human uses.
pub trait AiPlayer: Send + Sync {
    /// Feed the latest snapshot so newly revealed cards can be remembered.
    fn observe(&self, state: &CanonicalState);

    /// Pick the first card of a turn.
    fn choose_first(&self, state: &CanonicalState) -> Result<usize, AiError>;

    /// Pick the second card after `first` has been revealed.
    fn choose_second(&self, state: &CanonicalState, first: usize) -> Result<usize, AiError>;
}
