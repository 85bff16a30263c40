// ETag preconditions on the match endpoints.
//
// - GET state carries the ETag and honours If-None-Match
// - flip/resolve require If-Match (428), reject malformed ones and ones
//   issued for another room (400), and stale ones (409)
// - an accepted mutation bumps the ETag by one version

use actix_web::http::header::{IF_MATCH, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::test;
use pairflip_backend::state::AppState;
use pairflip_test_support::problem_details::assert_problem_details;
use serde_json::json;

use crate::common::{etag_of, hidden_mismatch, hidden_pair, json_body};
use crate::support::lobby::{started_duel, Duel};
use crate::support::{build_test_state, create_test_app};

async fn setup() -> (AppState, Duel) {
    let state = build_test_state();
    let (duel, _) = started_duel(&state, 99).await;
    (state, duel)
}

fn flip_req(duel: &Duel, user: &str, index: usize, etag: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::post()
        .uri(&format!("/api/rooms/{}/flip", duel.room_id))
        .insert_header(("x-user-id", user))
        .set_json(json!({ "index": index }));
    if let Some(etag) = etag {
        req = req.insert_header((IF_MATCH, etag));
    }
    req.to_request()
}

fn resolve_req(duel: &Duel, user: &str, etag: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri(&format!("/api/rooms/{}/resolve", duel.room_id))
        .insert_header(("x-user-id", user))
        .insert_header((IF_MATCH, etag))
        .to_request()
}

#[actix_web::test]
async fn get_state_sets_etag_and_supports_304() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let uri = format!("/api/rooms/{}/state", duel.room_id);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = etag_of(&resp);
    assert_eq!(etag, format!(r#""room-{}-v0""#, duel.room_id));

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((IF_NONE_MATCH, etag.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag_of(&resp), etag);
    assert!(test::read_body(resp).await.is_empty());
}

#[actix_web::test]
async fn flip_without_if_match_is_428() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, flip_req(&duel, &duel.host, 0, None)).await;
    assert_problem_details(
        resp,
        "PRECONDITION_REQUIRED",
        StatusCode::PRECONDITION_REQUIRED,
        Some("If-Match"),
    )
    .await;
}

#[actix_web::test]
async fn flip_with_malformed_if_match_is_400() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, flip_req(&duel, &duel.host, 0, Some("\"nonsense\""))).await;
    assert_problem_details(resp, "INVALID_HEADER", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn flip_with_another_rooms_etag_is_400() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let foreign = format!(r#""room-{}-v0""#, ulid::Ulid::new());

    let resp = test::call_service(&app, flip_req(&duel, &duel.host, 0, Some(&foreign))).await;
    assert_problem_details(resp, "INVALID_HEADER", StatusCode::BAD_REQUEST, Some("If-Match names room"))
        .await;

    let uri = format!("/api/rooms/{}/state", duel.room_id);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(etag_of(&resp), format!(r#""room-{}-v0""#, duel.room_id));
}

#[actix_web::test]
async fn flip_then_stale_flip_conflicts() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let v0 = format!(r#""room-{}-v0""#, duel.room_id);

    let resp = test::call_service(&app, flip_req(&duel, &duel.host, 0, Some(&v0))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(etag_of(&resp), format!(r#""room-{}-v1""#, duel.room_id));
    let body = json_body(resp).await;
    assert_eq!(body["state"]["cards"][0]["state"], "revealed");
    assert_eq!(body["state"]["selected"], json!([0]));

    let resp = test::call_service(&app, flip_req(&duel, &duel.host, 1, Some(&v0))).await;
    assert_problem_details(resp, "OPTIMISTIC_LOCK", StatusCode::CONFLICT, None).await;
}

#[actix_web::test]
async fn wrong_player_is_rejected() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let v0 = format!(r#""room-{}-v0""#, duel.room_id);

    let resp = test::call_service(&app, flip_req(&duel, &duel.guest, 0, Some(&v0))).await;
    assert_problem_details(resp, "NOT_YOUR_TURN", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn mismatch_then_resolve_passes_turn() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let uri = format!("/api/rooms/{}/state", duel.room_id);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let mut etag = etag_of(&resp);
    let (a, b) = hidden_mismatch(&json_body(resp).await);

    for index in [a, b] {
        let resp = test::call_service(&app, flip_req(&duel, &duel.host, index, Some(&etag))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        etag = etag_of(&resp);
    }

    let resp = test::call_service(&app, flip_req(&duel, &duel.host, 5, Some(&etag))).await;
    assert_problem_details(resp, "INPUT_LOCKED", StatusCode::BAD_REQUEST, None).await;

    let resp = test::call_service(&app, resolve_req(&duel, "mallory", &etag)).await;
    assert_problem_details(resp, "NOT_A_MEMBER", StatusCode::FORBIDDEN, None).await;

    let resp = test::call_service(&app, resolve_req(&duel, &duel.guest, &etag)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(etag_of(&resp), format!(r#""room-{}-v3""#, duel.room_id));
    let body = json_body(resp).await;
    assert_eq!(body["state"]["current_player"], duel.guest.as_str());
    assert_eq!(body["state"]["input_locked"], false);
    assert_eq!(body["state"]["cards"][a]["state"], "hidden");

    let resp = test::call_service(&app, resolve_req(&duel, &duel.guest, &etag_of_version(&duel, 3))).await;
    assert_problem_details(resp, "NOTHING_TO_RESOLVE", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn matched_pair_keeps_turn() {
    let (state, duel) = setup().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let uri = format!("/api/rooms/{}/state", duel.room_id);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let mut etag = etag_of(&resp);
    let (a, b) = hidden_pair(&json_body(resp).await);

    for index in [a, b] {
        let resp = test::call_service(&app, flip_req(&duel, &duel.host, index, Some(&etag))).await;
        etag = etag_of(&resp);
    }
    let resp = test::call_service(&app, resolve_req(&duel, &duel.host, &etag)).await;
    let body = json_body(resp).await;

    assert_eq!(body["state"]["current_player"], duel.host.as_str());
    assert_eq!(body["state"]["scores"][duel.host.as_str()], 1);
    assert_eq!(body["state"]["cards"][a]["state"], "matched");
    assert_eq!(body["state"]["cards"][b]["owner"], duel.host.as_str());
}

fn etag_of_version(duel: &Duel, version: u32) -> String {
    format!(r#""room-{}-v{version}""#, duel.room_id)
}
