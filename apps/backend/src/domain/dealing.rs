//! Board dealing: every pair id appears exactly twice, positions come from a
//! uniform permutation drawn from a seedable generator.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::board::{BoardConfig, Card, CardState};

/// Icon ids cycled through when building pairs.
pub const FACE_POOL: &[&str] = &[
    "sun", "moon", "star", "bolt", "flame", "leaf", "drop", "gem", "crown", "rocket", "anchor",
    "bell", "heart", "cloud", "key", "planet",
];

/// Tints cycled through independently of icons.
pub const TINT_PALETTE: &[&str] = &[
    "#22d3ee", "#a78bfa", "#f472b6", "#facc15", "#34d399", "#fb923c", "#60a5fa", "#f87171",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Face {
    pair_id: String,
    face_id: String,
    tint: String,
}

/// Pair `i` uses icon `FACE_POOL[i % len]`; the `i / len` suffix keeps pair
/// ids distinct once icons start repeating.
fn faces(total_pairs: usize) -> Vec<Face> {
    (0..total_pairs)
        .map(|i| {
            let icon = FACE_POOL[i % FACE_POOL.len()];
            Face {
                pair_id: format!("{icon}-{}", i / FACE_POOL.len()),
                face_id: icon.to_string(),
                tint: TINT_PALETTE[i % TINT_PALETTE.len()].to_string(),
            }
        })
        .collect()
}

/// Deal a board deterministically from `seed`.
///
/// All cards start `Hidden` with no owner, and `index` equals position.
pub fn deal_board(config: &BoardConfig, seed: u64) -> Vec<Card> {
    let mut deck: Vec<Face> = faces(config.total_pairs)
        .into_iter()
        .flat_map(|face| [face.clone(), face])
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    deck.into_iter()
        .enumerate()
        .map(|(index, face)| Card {
            index,
            pair_id: face.pair_id,
            face_id: face.face_id,
            visual_tint: face.tint,
            state: CardState::Hidden,
            owner: None,
        })
        .collect()
}

/// Resolve an optional caller seed into the seed actually used, drawing a
/// fresh one when none is supplied so the deal can still be replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random::<u64>)
}
