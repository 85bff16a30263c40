//! State Store contract: versioned read and compare-and-swap write of a
//! room's canonical state.
//!
//! The engine never edits stored state in place. Every change is a mutation
//! closure handed to [`StateStore::apply`], which runs it against a copy and
//! commits `(new_state, version + 1)` only when the closure succeeds and the
//! caller's expected version still matches.

use async_trait::async_trait;

use crate::domain::state::{CanonicalState, VersionedState};
use crate::errors::domain::DomainError;

/// A transition applied atomically by the store.
pub type StateMutation<'a> =
    Box<dyn FnOnce(&mut CanonicalState) -> Result<(), DomainError> + Send + 'a>;

#[async_trait]
pub trait StateStore: Send + Sync {
    /// Latest `(state, version)`; `NotFound(State)` when the room has no game.
    async fn get_state(&self, room_id: &str) -> Result<VersionedState, DomainError>;

    /// Install a fresh state at version 0, replacing any previous game.
    async fn put_initial(
        &self,
        room_id: &str,
        state: CanonicalState,
    ) -> Result<VersionedState, DomainError>;

    /// Compare-and-swap. Rejects with `Conflict(OptimisticLock)` when
    /// `expected_version` is stale; propagates the mutation's own error
    /// otherwise. In both cases nothing is written.
    async fn apply(
        &self,
        room_id: &str,
        expected_version: u32,
        mutation: StateMutation<'_>,
    ) -> Result<VersionedState, DomainError>;

    /// Discard the room's state. Missing state is not an error.
    async fn remove(&self, room_id: &str) -> Result<(), DomainError>;
}
