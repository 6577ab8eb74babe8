//! How to register an AI
//!
//! 1) Implement `AiPlayer` for your type in its module.
//! 2) Add an `AiFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed, same decisions.

use crate::ai::{AiPlayer, Heuristic, RandomPlayer};

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn AiPlayer + Send + Sync>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    AiFactory {
        name: Heuristic::NAME,
        version: Heuristic::VERSION,
        make: make_heuristic,
    },
];

/// Returns the statically registered AI factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered AI factory by its name (case-insensitive).
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais()
        .iter()
        .find(|factory| factory.name.eq_ignore_ascii_case(name))
}

fn make_random_player(seed: Option<u64>) -> Box<dyn AiPlayer + Send + Sync> {
    Box::new(RandomPlayer::new(seed))
}

fn make_heuristic(_seed: Option<u64>) -> Box<dyn AiPlayer + Send + Sync> {
    Box::new(Heuristic)
}
