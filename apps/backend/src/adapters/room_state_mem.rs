//! In-process State Store backed by `DashMap`.
//!
//! The compare-and-swap runs entirely under the row's shard lock; nothing is
//! held across an `.await`.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::state::{CanonicalState, VersionedState};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::room_state::{StateMutation, StateStore};

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    rows: DashMap<String, VersionedState>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn missing(room_id: &str) -> DomainError {
        DomainError::not_found(
            NotFoundKind::State,
            format!("Room {room_id} has no game in progress"),
        )
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get_state(&self, room_id: &str) -> Result<VersionedState, DomainError> {
        self.rows
            .get(room_id)
            .map(|row| row.value().clone())
            .ok_or_else(|| Self::missing(room_id))
    }

    async fn put_initial(
        &self,
        room_id: &str,
        state: CanonicalState,
    ) -> Result<VersionedState, DomainError> {
        let row = VersionedState { state, version: 0 };
        self.rows.insert(room_id.to_string(), row.clone());
        Ok(row)
    }

    async fn apply(
        &self,
        room_id: &str,
        expected_version: u32,
        mutation: StateMutation<'_>,
    ) -> Result<VersionedState, DomainError> {
        let mut row = self
            .rows
            .get_mut(room_id)
            .ok_or_else(|| Self::missing(room_id))?;

        if row.version != expected_version {
            debug!(room_id, expected_version, actual = row.version, "stale version");
            return Err(DomainError::version_conflict(expected_version, row.version));
        }

        let mut next = row.state.clone();
        mutation(&mut next)?;

        row.state = next;
        row.version += 1;
        Ok(row.value().clone())
    }

    async fn remove(&self, room_id: &str) -> Result<(), DomainError> {
        self.rows.remove(room_id);
        Ok(())
    }
}
