//! Rule engine for Mousel, a trick-taking card game with a trump auction,
//! card exchange and a carried pot.
//!
//! The engine is a synchronous reducer over [`domain::Game`]: actions are
//! validated, applied to a copy and committed only on success. Hosts that
//! share a game across threads go through [`session::GameSession`].

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod session;


// Re-exports for public API
pub use config::RulesConfig;
pub use domain::{apply, reduce, Action, ActionOutcome, Game, Phase};
pub use errors::{DomainError, ValidationKind};
pub use session::GameSession;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
