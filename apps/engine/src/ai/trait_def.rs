//! AI player trait definition.

use thiserror::Error;

use crate::domain::cards_types::{Card, CardId};
use crate::domain::player_view::PlayerView;

/// Errors that can occur during AI decision-making.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    /// AI encountered an internal error
    #[error("AI internal error: {0}")]
    Internal(String),
    /// AI produced, or could only produce, an invalid move
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
    /// The game is waiting on nothing an AI can decide
    #[error("AI has no decision to make: {0}")]
    NoDecision(String),
}

/// Trait for AI players.
///
/// Implementations receive the view of the seat that must act and return a
/// decision. The engine re-validates every decision, so an implementation
/// only has to stay within the view's legal helpers.
pub trait AiPlayer: Send + Sync {
    /// Dealer flips the trump card; `true` flips it face down.
    fn choose_hide_trump(&self, view: &PlayerView) -> Result<bool, AiError>;

    /// Take the offered trump card. `early` is the dealer's take after two cards.
    fn choose_take_trump(&self, view: &PlayerView, early: bool) -> Result<bool, AiError>;

    /// Stay in the round (`true`) or fold.
    fn choose_stay(&self, view: &PlayerView) -> Result<bool, AiError>;

    /// Cards to swap for fresh ones; must come from `view.exchangeable()`.
    fn choose_exchange(&self, view: &PlayerView) -> Result<Vec<CardId>, AiError>;

    /// Card to discard when holding more than four before the first play.
    /// Keeping every card is a legal choice.
    fn choose_discard(&self, _view: &PlayerView) -> Result<Option<CardId>, AiError> {
        Ok(None)
    }

    /// Card to play; must come from `view.legal_plays()`.
    fn choose_play(&self, view: &PlayerView) -> Result<Card, AiError>;
}
