//! Room setup and polling helpers shared by the service suites.

use std::time::Duration;

use pairflip_backend::ai::DifficultyTier;
use pairflip_backend::domain::state::{CanonicalState, VersionedState};
use pairflip_backend::domain::CardState;
use pairflip_backend::services::rooms::CreateRoom;
use pairflip_backend::state::AppState;
use pairflip_test_support::unique_helpers::unique_user;

pub struct Duel {
    pub room_id: String,
    pub host: String,
    pub guest: String,
}

/// A seeded two-player room with both players seated but not ready.
pub async fn seated_duel(state: &AppState, seed: u64) -> Duel {
    let host = unique_user("host");
    let guest = unique_user("guest");
    let room = state
        .rooms
        .create(
            &host,
            CreateRoom {
                seed: Some(seed),
                ..CreateRoom::default()
            },
        )
        .await
        .expect("create room");
    let room_id = room.room.room_id;
    state.rooms.join(&room_id, &host).await.expect("host joins");
    state.rooms.join(&room_id, &guest).await.expect("guest joins");
    Duel {
        room_id,
        host,
        guest,
    }
}

/// A seeded duel that has been started; the host moves first.
pub async fn started_duel(state: &AppState, seed: u64) -> (Duel, VersionedState) {
    let duel = seated_duel(state, seed).await;
    ready_up(state, &duel).await;
    let started = state
        .rooms
        .start_if_ready(&duel.room_id, &duel.host)
        .await
        .expect("start");
    (duel, started)
}

pub async fn ready_up(state: &AppState, duel: &Duel) {
    for user in [&duel.host, &duel.guest] {
        state
            .rooms
            .set_ready(&duel.room_id, user, true)
            .await
            .expect("ready");
    }
}

/// A started room of one human host against an AI of `difficulty`.
pub async fn started_vs_ai(
    state: &AppState,
    seed: u64,
    difficulty: DifficultyTier,
) -> (String, String, String) {
    let host = unique_user("host");
    let room = state
        .rooms
        .create(
            &host,
            CreateRoom {
                seed: Some(seed),
                ..CreateRoom::default()
            },
        )
        .await
        .expect("create room");
    let room_id = room.room.room_id;
    state.rooms.join(&room_id, &host).await.expect("host joins");
    let record = state
        .rooms
        .add_ai_player(&room_id, &host, difficulty)
        .await
        .expect("seat AI");
    let ai_id = record.players[1].user_id.clone();
    state
        .rooms
        .set_ready(&room_id, &host, true)
        .await
        .expect("ready");
    state
        .rooms
        .start_if_ready(&room_id, &host)
        .await
        .expect("start");
    (room_id, host, ai_id)
}

/// Two face-down indices of the same pair.
pub fn hidden_pair(state: &CanonicalState) -> (usize, usize) {
    let hidden: Vec<_> = state.cards.iter().filter(|c| c.state == CardState::Hidden).collect();
    for (i, a) in hidden.iter().enumerate() {
        if let Some(b) = hidden[i + 1..].iter().find(|b| b.pair_id == a.pair_id) {
            return (a.index, b.index);
        }
    }
    panic!("no hidden pair left");
}

/// Two face-down indices of different pairs.
pub fn hidden_mismatch(state: &CanonicalState) -> (usize, usize) {
    let hidden: Vec<_> = state.cards.iter().filter(|c| c.state == CardState::Hidden).collect();
    let first = hidden[0];
    let other = hidden
        .iter()
        .find(|c| c.pair_id != first.pair_id)
        .expect("a card of another pair");
    (first.index, other.index)
}

/// Poll the room's state until `done` holds or `timeout` elapses.
pub async fn wait_for_state(
    state: &AppState,
    room_id: &str,
    timeout: Duration,
    done: impl Fn(&VersionedState) -> bool,
) -> VersionedState {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let current = state.game_flow.get_state(room_id).await.expect("state");
        if done(&current) {
            return current;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting; last version {} current {}",
            current.version,
            current.state.current_player
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
