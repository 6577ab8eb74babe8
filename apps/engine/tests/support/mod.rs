#![allow(dead_code)]

// tests/support/mod.rs
use mousel::ai::{AiConfig, Seat};
use mousel::domain::player::PlayerId;
use mousel::domain::selectors::{pending_decision, PendingDecision};
use mousel::{Action, Game, GameSession};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for every test binary that pulls in `support`
#[ctor::ctor]
fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Seats built from registered AI names, seeded per seat.
pub fn seats(names: &[&str], seed: u64) -> Vec<Seat> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            AiConfig::named(name)
                .for_seat(seed, i as PlayerId)
                .build()
                .unwrap_or_else(|e| panic!("AI {name}: {e}"))
        })
        .collect()
}

/// Initialised game with `n` players.
pub fn new_game(n: usize, seed: u64) -> Game {
    let mut game = Game::with_seed(seed);
    mousel::apply(&mut game, &Action::InitializeGame { number_of_players: n })
        .expect("initialise");
    game
}

/// Drive `game` until `rounds` rounds have been settled or `max_steps` pass.
/// Returns the number of settled rounds.
pub fn play_rounds(game: &mut Game, seats: &[Seat], rounds: usize, max_steps: usize) -> usize {
    let mut settled = 0;
    for _ in 0..max_steps {
        if settled == rounds {
            break;
        }
        let settling = pending_decision(game) == Some(PendingDecision::Settle);
        mousel::ai::step(game, seats).unwrap_or_else(|e| panic!("driver failed: {e}"));
        if settling {
            settled += 1;
        }
    }
    settled
}

/// Apply through a session, panicking with the action name on rejection.
pub fn act(session: &GameSession, action: Action) {
    session
        .apply(action)
        .unwrap_or_else(|e| panic!("{} rejected: {e}", action.name()));
}
