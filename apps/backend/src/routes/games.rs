//! Match routes: read state, flip, resolve.
//!
//! State versions travel as ETags. Mutations require `If-Match`; reads
//! honour `If-None-Match`.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::domain::state::VersionedState;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ExpectedVersion, RoomId, ValidatedJson};
use crate::http::etag::{if_none_match_hits, room_etag};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct FlipRequest {
    index: usize,
}

fn with_etag(room_id: &RoomId, current: VersionedState) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((ETAG, room_etag(room_id.as_str(), current.version)))
        .json(current)
}

/// GET /api/rooms/{room_id}/state
///
/// Returns `304 Not Modified` when `If-None-Match` names the current version.
async fn get_state(
    http_req: HttpRequest,
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let current = app_state.game_flow.get_state(room_id.as_str()).await?;
    let etag_value = room_etag(room_id.as_str(), current.version);

    let not_modified = http_req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|client| if_none_match_hits(client, &etag_value));
    if not_modified {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag_value))
            .finish());
    }

    Ok(with_etag(&room_id, current))
}

/// POST /api/rooms/{room_id}/flip
async fn flip(
    room_id: RoomId,
    user: CurrentUser,
    expected: ExpectedVersion,
    body: ValidatedJson<FlipRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let next = app_state
        .game_flow
        .flip(room_id.as_str(), user.id(), body.index, expected.0)
        .await?;
    Ok(with_etag(&room_id, next))
}

/// POST /api/rooms/{room_id}/resolve
async fn resolve(
    room_id: RoomId,
    user: CurrentUser,
    expected: ExpectedVersion,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let next = app_state
        .game_flow
        .resolve_pending(room_id.as_str(), user.id(), expected.0)
        .await?;
    Ok(with_etag(&room_id, next))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{room_id}/state").route(web::get().to(get_state)));
    cfg.service(web::resource("/{room_id}/flip").route(web::post().to(flip)));
    cfg.service(web::resource("/{room_id}/resolve").route(web::post().to(resolve)));
}
