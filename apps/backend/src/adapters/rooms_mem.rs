//! In-process room repository backed by `DashMap`.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::rooms::{RoomRecord, RoomRepo, RoomUpdate};

#[derive(Debug, Default)]
pub struct InMemoryRoomRepo {
    rows: DashMap<String, RoomRecord>,
}

impl InMemoryRoomRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing(room_id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
}

#[async_trait]
impl RoomRepo for InMemoryRoomRepo {
    async fn insert(&self, record: RoomRecord) -> Result<(), DomainError> {
        self.rows.insert(record.room.room_id.clone(), record);
        Ok(())
    }

    async fn find(&self, room_id: &str) -> Result<RoomRecord, DomainError> {
        self.rows
            .get(room_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| missing(room_id))
    }

    async fn update(
        &self,
        room_id: &str,
        update: RoomUpdate<'_>,
    ) -> Result<RoomRecord, DomainError> {
        let mut row = self.rows.get_mut(room_id).ok_or_else(|| missing(room_id))?;
        let mut next = row.value().clone();
        update(&mut next)?;
        *row = next;
        Ok(row.value().clone())
    }
}
