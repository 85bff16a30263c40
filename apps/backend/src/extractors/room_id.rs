use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use ulid::Ulid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Room id from the `{room_id}` path segment. Only checks the shape; whether
/// the room exists is up to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse(raw: Option<&str>) -> Result<RoomId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidRoomId, "Missing room_id parameter")
    })?;
    Ulid::from_string(raw)
        .map(|id| RoomId(id.to_string()))
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidRoomId, format!("Invalid room id: {raw}")))
}

impl FromRequest for RoomId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req.match_info().get("room_id")))
    }
}
