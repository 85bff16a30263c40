#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::ETAG;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    pairflip_test_support::logging::init();
}

/// ETag header of a response, panicking when absent.
pub fn etag_of(resp: &ServiceResponse<BoxBody>) -> String {
    resp.headers()
        .get(ETAG)
        .expect("ETag header should be present")
        .to_str()
        .expect("ETag should be valid ASCII")
        .to_string()
}

/// Read the body as JSON.
pub async fn json_body(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("body should be JSON")
}

/// Two face-down card indices of the same pair in a serialized state.
pub fn hidden_pair(state: &Value) -> (usize, usize) {
    let cards = state["state"]["cards"].as_array().expect("cards array");
    let hidden: Vec<&Value> = cards.iter().filter(|c| c["state"] == "hidden").collect();
    for (i, a) in hidden.iter().enumerate() {
        for b in &hidden[i + 1..] {
            if a["pair_id"] == b["pair_id"] {
                return (idx(a), idx(b));
            }
        }
    }
    panic!("no hidden pair left");
}

/// Two face-down card indices of different pairs in a serialized state.
pub fn hidden_mismatch(state: &Value) -> (usize, usize) {
    let cards = state["state"]["cards"].as_array().expect("cards array");
    let hidden: Vec<&Value> = cards.iter().filter(|c| c["state"] == "hidden").collect();
    let first = hidden.first().expect("a hidden card");
    let other = hidden
        .iter()
        .find(|c| c["pair_id"] != first["pair_id"])
        .expect("a card of another pair");
    (idx(first), idx(other))
}

fn idx(card: &Value) -> usize {
    card["index"].as_u64().expect("index") as usize
}
