//! Memory-limited probabilistic opponent.
//!
//! The planner learns card identities only from snapshots in which they are
//! face up, forgets according to its tier, and plays through the public
//! `flip` path like any other participant.

use std::collections::HashSet;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::config::{AiConfig, PlannerParams};
use super::memory::AiMemory;
use super::trait_def::{AiError, AiPlayer};
use crate::domain::board::CardState;
use crate::domain::state::CanonicalState;

struct PlannerInner {
    memory: AiMemory,
    rng: StdRng,
    /// Indices already passed through the remember gate while face up, so a
    /// card visible across several snapshots is only rolled once.
    rolled: HashSet<usize>,
    /// Second card chosen together with the first when a known pair was
    /// recalled.
    planned_second: Option<usize>,
}

pub struct OpponentPlanner {
    params: PlannerParams,
    inner: Mutex<PlannerInner>,
}

fn chance(rng: &mut StdRng, p: f64) -> bool {
    rng.random_bool(p.clamp(0.0, 1.0))
}

impl OpponentPlanner {
    /// Seeded planners are reproducible; unseeded ones draw from OS entropy.
    pub fn new(config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_params(config.params(), rng)
    }

    pub fn with_params(params: PlannerParams, rng: StdRng) -> Self {
        Self {
            params,
            inner: Mutex::new(PlannerInner {
                memory: AiMemory::new(params.capacity),
                rng,
                rolled: HashSet::new(),
                planned_second: None,
            }),
        }
    }

    pub fn params(&self) -> PlannerParams {
        self.params
    }

    /// Number of cards currently remembered.
    pub fn remembered(&self) -> usize {
        self.inner.lock().memory.len()
    }

    fn random_hidden(rng: &mut StdRng, hidden: &[usize]) -> Result<usize, AiError> {
        hidden
            .choose(rng)
            .copied()
            .ok_or_else(|| AiError::InvalidMove("no hidden card left to flip".to_string()))
    }
}

impl AiPlayer for OpponentPlanner {
    fn observe(&self, state: &CanonicalState) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        for card in &state.cards {
            match card.state {
                CardState::Matched => {
                    inner.rolled.remove(&card.index);
                    inner.memory.forget_pair(&card.pair_id);
                }
                CardState::Hidden => {
                    inner.rolled.remove(&card.index);
                }
                CardState::Revealed => {
                    if inner.rolled.insert(card.index)
                        && chance(&mut inner.rng, self.params.p_remember)
                    {
                        inner.memory.remember(card.index, &card.pair_id);
                    }
                }
            }
        }
    }

    fn choose_first(&self, state: &CanonicalState) -> Result<usize, AiError> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let hidden = state.hidden_indices();
        inner.planned_second = None;

        let is_hidden = |i: usize| {
            state
                .cards
                .get(i)
                .is_some_and(|c| c.state == CardState::Hidden)
        };
        if let Some((a, b)) = inner.memory.known_pair(is_hidden) {
            if chance(&mut inner.rng, self.params.p_recall) {
                inner.planned_second = Some(b);
                return Ok(a);
            }
        }

        Self::random_hidden(&mut inner.rng, &hidden)
    }

    fn choose_second(&self, state: &CanonicalState, first: usize) -> Result<usize, AiError> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let hidden: Vec<usize> = state
            .hidden_indices()
            .into_iter()
            .filter(|&i| i != first)
            .collect();

        let first_pair = state
            .cards
            .get(first)
            .map(|c| c.pair_id.clone())
            .ok_or_else(|| AiError::Internal(format!("first pick {first} is off the board")))?;

        if let Some(planned) = inner.planned_second.take() {
            let still_valid = hidden.contains(&planned)
                && state.cards.get(planned).map(|c| &c.pair_id) == Some(&first_pair);
            if still_valid {
                return Ok(planned);
            }
        }

        let known = inner
            .memory
            .indices_of(&first_pair)
            .find(|i| hidden.contains(i));
        if let Some(partner) = known {
            if chance(&mut inner.rng, self.params.p_recall) {
                return Ok(partner);
            }
        }

        Self::random_hidden(&mut inner.rng, &hidden)
    }
}
