//! Random AI player - makes random legal decisions.
//!
//! Baseline for tests and the simulator. Interior mutability through a
//! `Mutex<StdRng>` keeps the trait methods `&self`; seeding makes a run
//! reproducible.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::cards_types::{Card, CardId};
use crate::domain::player_view::PlayerView;

/// AI that decides uniformly at random among legal options.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, AiError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;
        Ok(f(&mut *rng))
    }

    fn coin(&self) -> Result<bool, AiError> {
        self.with_rng(|rng| rng.random_bool(0.5))
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_hide_trump(&self, _view: &PlayerView) -> Result<bool, AiError> {
        self.coin()
    }

    fn choose_take_trump(&self, _view: &PlayerView, _early: bool) -> Result<bool, AiError> {
        self.coin()
    }

    fn choose_stay(&self, _view: &PlayerView) -> Result<bool, AiError> {
        self.coin()
    }

    fn choose_exchange(&self, view: &PlayerView) -> Result<Vec<CardId>, AiError> {
        let candidates = view.exchangeable();
        self.with_rng(|rng| {
            candidates
                .iter()
                .filter(|_| rng.random_bool(0.5))
                .map(|c| c.id)
                .collect()
        })
    }

    fn choose_discard(&self, view: &PlayerView) -> Result<Option<CardId>, AiError> {
        self.with_rng(|rng| view.hand.choose(rng).map(|c| c.id))
    }

    fn choose_play(&self, view: &PlayerView) -> Result<Card, AiError> {
        let legal_plays = view.legal_plays();
        if legal_plays.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }
        self.with_rng(|rng| legal_plays.choose(rng).copied())?
            .ok_or_else(|| AiError::Internal("Failed to choose random card".into()))
    }
}
