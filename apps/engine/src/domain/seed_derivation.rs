//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Every deck built during a game (initialisation, each settlement, each
//! forced redeal) is shuffled with its own seed derived from the game seed,
//! so a fixed game seed plus a fixed action sequence reproduces every hand.
//! Unpinned AI seats draw their seed from the same game seed.

const DEALING_CONTEXT: &str = "mousel 2024 dealing seed";
const AI_CONTEXT: &str = "mousel 2024 ai seed";

/// Derive the shuffle seed for the `deal_no`-th deck of a game.
///
/// # Arguments
///
/// * `game_seed` - Base RNG seed of the game
/// * `deal_no` - Monotonic counter of decks built so far (0 for the first)
pub fn derive_dealing_seed(game_seed: u64, deal_no: u32) -> u64 {
    let mut hasher = blake3::Hasher::new_derive_key(DEALING_CONTEXT);
    hasher.update(&game_seed.to_le_bytes());
    hasher.update(&deal_no.to_le_bytes());
    first_u64(hasher.finalize().as_bytes())
}

/// Derive a per-seat seed for an AI policy, unique per (game, seat).
pub fn derive_ai_seed(game_seed: u64, seat: u8) -> u64 {
    let mut hasher = blake3::Hasher::new_derive_key(AI_CONTEXT);
    hasher.update(&game_seed.to_le_bytes());
    hasher.update(&[seat]);
    first_u64(hasher.finalize().as_bytes())
}

fn first_u64(bytes: &[u8; 32]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(head)
}
