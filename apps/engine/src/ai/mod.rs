//! AI players: replaceable decision policies outside the rule core.
//!
//! This module provides:
//! - the [`AiPlayer`] trait, fed a [`PlayerView`](crate::domain::PlayerView)
//! - [`Heuristic`]: deterministic trump-counting policy
//! - [`RandomPlayer`]: uniformly random legal decisions (seedable)
//! - a static registry and JSON seat configuration
//! - a driver that turns the pending decision into actions

pub mod config;
pub mod driver;
mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use config::AiConfig;
pub use driver::{next_actions, step, DriveError, Seat};
pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use registry::{by_name, registered_ais, AiFactory};
pub use trait_def::{AiError, AiPlayer};

/// Policy used when a seat names none.
pub const DEFAULT_AI: &str = Heuristic::NAME;
