//! Lobby flow over HTTP: create, join, ready, seat AI, start.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use pairflip_test_support::problem_details::assert_problem_details;
use serde_json::{json, Value};

use crate::common::{etag_of, json_body};
use crate::support::{build_test_state, create_test_app};

fn post(uri: &str, user: &str, body: Value) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(("x-user-id", user))
        .set_json(body)
        .to_request()
}

async fn create_room<S>(app: &S, host: &str, body: Value) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, post("/api/rooms", host, body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let room = json_body(resp).await;
    room["room"]["room_id"].as_str().expect("room_id").to_string()
}

#[actix_web::test]
async fn create_join_ready_start() {
    let app = create_test_app(build_test_state())
        .with_prod_routes()
        .build()
        .await;

    let room_id = create_room(
        &app,
        "alice",
        json!({ "board_size": "4x4", "theme": "space", "seed": 7 }),
    )
    .await;

    for user in ["alice", "bob"] {
        let resp = test::call_service(&app, post(&format!("/api/rooms/{room_id}/join"), user, json!({}))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    for user in ["alice", "bob"] {
        let resp = test::call_service(
            &app,
            post(&format!("/api/rooms/{room_id}/ready"), user, json!({ "ready": true })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(&app, post(&format!("/api/rooms/{room_id}/start"), "bob", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(etag_of(&resp), format!(r#""room-{room_id}-v0""#));
    let started = json_body(resp).await;
    assert_eq!(started["version"], 0);
    assert_eq!(started["state"]["current_player"], "alice");
    assert_eq!(started["state"]["cards"].as_array().unwrap().len(), 16);

    let req = test::TestRequest::get()
        .uri(&format!("/api/rooms/{room_id}"))
        .to_request();
    let room = json_body(test::call_service(&app, req).await).await;
    assert_eq!(room["room"]["status"], "playing");
    assert_eq!(room["room"]["theme"], "space");
    assert_eq!(room["players"][0]["is_host"], true);
    assert_eq!(room["players"][1]["kind"], "human");
}

#[actix_web::test]
async fn empty_create_body_uses_small_classic_board() {
    let app = create_test_app(build_test_state())
        .with_prod_routes()
        .build()
        .await;
    let room_id = create_room(&app, "alice", json!({})).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/rooms/{room_id}"))
        .to_request();
    let room = json_body(test::call_service(&app, req).await).await;
    assert_eq!(room["room"]["board_size"], "4x4");
    assert_eq!(room["room"]["theme"], "classic");
}

#[actix_web::test]
async fn third_player_gets_room_full() {
    let app = create_test_app(build_test_state())
        .with_prod_routes()
        .build()
        .await;
    let room_id = create_room(&app, "alice", json!({})).await;

    for user in ["alice", "bob"] {
        test::call_service(&app, post(&format!("/api/rooms/{room_id}/join"), user, json!({}))).await;
    }
    let resp = test::call_service(&app, post(&format!("/api/rooms/{room_id}/join"), "carol", json!({}))).await;
    assert_problem_details(resp, "ROOM_FULL", StatusCode::CONFLICT, None).await;
}

#[actix_web::test]
async fn start_before_ready_is_rejected() {
    let app = create_test_app(build_test_state())
        .with_prod_routes()
        .build()
        .await;
    let room_id = create_room(&app, "alice", json!({})).await;
    for user in ["alice", "bob"] {
        test::call_service(&app, post(&format!("/api/rooms/{room_id}/join"), user, json!({}))).await;
    }

    let resp = test::call_service(&app, post(&format!("/api/rooms/{room_id}/start"), "alice", json!({}))).await;
    assert_problem_details(resp, "NOT_READY", StatusCode::BAD_REQUEST, Some("not ready")).await;
}

#[actix_web::test]
async fn outsider_cannot_ready() {
    let app = create_test_app(build_test_state())
        .with_prod_routes()
        .build()
        .await;
    let room_id = create_room(&app, "alice", json!({})).await;

    let resp = test::call_service(
        &app,
        post(&format!("/api/rooms/{room_id}/ready"), "mallory", json!({ "ready": true })),
    )
    .await;
    assert_problem_details(resp, "NOT_A_MEMBER", StatusCode::FORBIDDEN, None).await;
}

#[actix_web::test]
async fn host_seats_ready_ai() {
    let app = create_test_app(build_test_state())
        .with_prod_routes()
        .build()
        .await;
    let room_id = create_room(&app, "alice", json!({ "mode": "squad" })).await;
    test::call_service(&app, post(&format!("/api/rooms/{room_id}/join"), "alice", json!({}))).await;

    let resp = test::call_service(
        &app,
        post(&format!("/api/rooms/{room_id}/ai"), "alice", json!({ "difficulty": "hard" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let room = json_body(resp).await;
    let ai = &room["players"][1];
    assert_eq!(ai["kind"], "ai");
    assert_eq!(ai["difficulty"], "hard");
    assert_eq!(ai["is_ready"], true);
    assert_eq!(room["room"]["mode"], "squad");
}
