use actix_web::dev::Payload;
use actix_web::http::header::IF_MATCH;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::etag::parse_room_etag;

/// State version the client last saw, taken from `If-Match`.
///
/// Missing header is `428 Precondition Required`. A malformed one, or one
/// issued for a room other than the `{room_id}` path segment, is `400`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedVersion(pub u32);

fn extract(req: &HttpRequest) -> Result<ExpectedVersion, AppError> {
    let raw = req.headers().get(IF_MATCH).ok_or_else(|| {
        AppError::precondition_required("If-Match header with the current state ETag is required")
    })?;
    let raw = raw.to_str().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidHeader, "If-Match header is not valid ASCII")
    })?;
    let tag = parse_room_etag(raw)?;
    if let Some(path_room) = req.match_info().get("room_id") {
        if tag.room_id != path_room {
            return Err(AppError::bad_request(
                ErrorCode::InvalidHeader,
                format!("If-Match names room {}, not {path_room}", tag.room_id),
            ));
        }
    }
    Ok(ExpectedVersion(tag.version))
}

impl FromRequest for ExpectedVersion {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
