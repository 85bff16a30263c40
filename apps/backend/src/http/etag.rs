//! ETag helpers for optimistic concurrency control.
//!
//! A room's state version travels as an ETag so clients can use
//! `If-Match` / `If-None-Match` instead of a version field in the body.

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Generate an ETag for a room's game state.
///
/// Format: `"room-{id}-v{version}"` (quoted, as HTTP requires).
///
/// # Example
/// ```
/// # use pairflip_backend::http::etag::room_etag;
/// assert_eq!(room_etag("01J", 5), r#""room-01J-v5""#);
/// ```
pub fn room_etag(room_id: &str, version: u32) -> String {
    format!(r#""room-{room_id}-v{version}""#)
}

/// A room ETag split into the room it was issued for and its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTag {
    pub room_id: String,
    pub version: u32,
}

fn invalid(detail: String) -> AppError {
    AppError::bad_request(ErrorCode::InvalidHeader, detail)
}

/// Parse a room ETag.
///
/// Weak validators (`W/"..."`) are accepted. The version is read after the
/// last `-v`; everything between `room-` and that marker is the room id.
///
/// # Errors
/// `AppError::bad_request` with `ErrorCode::InvalidHeader` when the prefix or
/// marker is missing, the room id is empty, or the version is not a
/// non-negative integer.
///
/// # Example
/// ```
/// # use pairflip_backend::http::etag::parse_room_etag;
/// let tag = parse_room_etag(r#""room-01J-v5""#).unwrap();
/// assert_eq!((tag.room_id.as_str(), tag.version), ("01J", 5));
/// ```
pub fn parse_room_etag(s: &str) -> Result<RoomTag, AppError> {
    let s = s.trim();
    let s = s.strip_prefix("W/").unwrap_or(s).trim_matches('"');
    let expected = || {
        invalid(format!(
            "Invalid ETag format: expected \"room-{{id}}-v{{version}}\", got: \"{s}\""
        ))
    };

    let body = s.strip_prefix("room-").ok_or_else(expected)?;
    let marker = body.rfind("-v").ok_or_else(expected)?;
    let (room_id, version_str) = (&body[..marker], &body[marker + 2..]);
    if room_id.is_empty() {
        return Err(expected());
    }

    let version = version_str.parse::<u32>().map_err(|_| {
        invalid(format!(
            "Invalid ETag format: version must be a valid integer, got: \"{version_str}\""
        ))
    })?;
    Ok(RoomTag {
        room_id: room_id.to_string(),
        version,
    })
}

/// Whether an `If-None-Match` value names the current ETag.
pub fn if_none_match_hits(header: &str, current: &str) -> bool {
    header
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || tag == current || tag.strip_prefix("W/") == Some(current))
}
