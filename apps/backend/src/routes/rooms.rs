//! Room lifecycle routes: create, join, ready, seat AI, start, rematch.

use actix_web::http::header::ETAG;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::ai::DifficultyTier;
use crate::domain::board::BoardSize;
use crate::error::AppError;
use crate::extractors::{CurrentUser, RoomId, ValidatedJson};
use crate::http::etag::room_etag;
use crate::repos::rooms::RoomMode;
use crate::services::rooms::CreateRoom;
use crate::state::app_state::AppState;

fn default_theme() -> String {
    "classic".to_string()
}

#[derive(Debug, Deserialize)]
struct CreateRoomRequest {
    #[serde(default)]
    board_size: BoardSize,
    #[serde(default = "default_theme")]
    theme: String,
    #[serde(default)]
    mode: RoomMode,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ReadyRequest {
    ready: bool,
}

#[derive(Debug, Deserialize)]
struct AddAiRequest {
    #[serde(default)]
    difficulty: DifficultyTier,
}

/// POST /api/rooms
async fn create_room(
    user: CurrentUser,
    body: ValidatedJson<CreateRoomRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let record = app_state
        .rooms
        .create(
            user.id(),
            CreateRoom {
                board_size: body.board_size,
                theme: body.theme,
                mode: body.mode,
                seed: body.seed,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// GET /api/rooms/{room_id}
async fn get_room(
    room_id: RoomId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = app_state.rooms.get_room(room_id.as_str()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/rooms/{room_id}/join
async fn join_room(
    room_id: RoomId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = app_state.rooms.join(room_id.as_str(), user.id()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/rooms/{room_id}/ready
async fn set_ready(
    room_id: RoomId,
    user: CurrentUser,
    body: ValidatedJson<ReadyRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = app_state
        .rooms
        .set_ready(room_id.as_str(), user.id(), body.ready)
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/rooms/{room_id}/ai
async fn add_ai_player(
    room_id: RoomId,
    user: CurrentUser,
    body: ValidatedJson<AddAiRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = app_state
        .rooms
        .add_ai_player(room_id.as_str(), user.id(), body.difficulty)
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/rooms/{room_id}/start
///
/// Responds with the freshly dealt state and its ETag.
async fn start_game(
    room_id: RoomId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let started = app_state
        .rooms
        .start_if_ready(room_id.as_str(), user.id())
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header((ETAG, room_etag(room_id.as_str(), started.version)))
        .json(started))
}

/// POST /api/rooms/{room_id}/rematch
async fn rematch(
    room_id: RoomId,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = app_state.rooms.rematch(room_id.as_str(), user.id()).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_room)));
    cfg.service(web::resource("/{room_id}").route(web::get().to(get_room)));
    cfg.service(web::resource("/{room_id}/join").route(web::post().to(join_room)));
    cfg.service(web::resource("/{room_id}/ready").route(web::post().to(set_ready)));
    cfg.service(web::resource("/{room_id}/ai").route(web::post().to(add_ai_player)));
    cfg.service(web::resource("/{room_id}/start").route(web::post().to(start_game)));
    cfg.service(web::resource("/{room_id}/rematch").route(web::post().to(rematch)));
}
