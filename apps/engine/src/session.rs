//! A game owned behind a single lock, for hosts that drive it from several
//! threads (timers, input handlers, AI workers).

use parking_lot::Mutex;
use tracing::debug;

use crate::config::RulesConfig;
use crate::domain::action::{apply, Action, ActionOutcome};
use crate::domain::player::PlayerId;
use crate::domain::player_view::PlayerView;
use crate::domain::selectors::{pending_decision, PendingDecision};
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::domain::state::Game;
use crate::errors::domain::DomainError;

struct Inner {
    game: Game,
    /// Accepted actions, in application order.
    log: Vec<Action>,
}

/// Serialises action application: one action is fully applied (or
/// rejected) before the next is looked at.
pub struct GameSession {
    inner: Mutex<Inner>,
}

impl GameSession {
    pub fn new(game: Game) -> Self {
        Self {
            inner: Mutex::new(Inner {
                game,
                log: Vec::new(),
            }),
        }
    }

    /// A session with an initialised game of `number_of_players`.
    pub fn start(
        rules: RulesConfig,
        seed: u64,
        number_of_players: usize,
    ) -> Result<Self, DomainError> {
        let session = Self::new(Game::with_config(rules, seed));
        session.apply(Action::InitializeGame { number_of_players })?;
        Ok(session)
    }

    pub fn apply(&self, action: Action) -> Result<ActionOutcome, DomainError> {
        let mut inner = self.inner.lock();
        let outcome = apply(&mut inner.game, &action)?;
        inner.log.push(action);
        debug!(seq = inner.log.len(), action = action.name(), "session action committed");
        Ok(outcome)
    }

    /// Read the game under the lock.
    pub fn with_game<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.inner.lock().game)
    }

    pub fn game(&self) -> Game {
        self.with_game(Game::clone)
    }

    pub fn snapshot(&self, viewer: Option<PlayerId>) -> GameSnapshot {
        self.with_game(|g| snapshot(g, viewer))
    }

    pub fn view(&self, player_id: PlayerId) -> Result<PlayerView, DomainError> {
        self.with_game(|g| PlayerView::for_player(g, player_id))
    }

    pub fn pending(&self) -> Option<PendingDecision> {
        self.with_game(pending_decision)
    }

    /// Accepted actions so far.
    pub fn actions(&self) -> Vec<Action> {
        self.inner.lock().log.clone()
    }

    pub fn into_game(self) -> Game {
        self.inner.into_inner().game
    }
}

/// Rebuild a game by applying `actions` to a fresh game with `seed`.
///
/// Given the same seed and actions the result is identical to the original.
pub fn replay(rules: RulesConfig, seed: u64, actions: &[Action]) -> Result<Game, DomainError> {
    let mut game = Game::with_config(rules, seed);
    for action in actions {
        apply(&mut game, action)?;
    }
    Ok(game)
}
