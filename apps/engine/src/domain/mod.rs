//! Domain layer: pure game logic types and helpers.

pub mod action;
pub mod cards_logic;
pub mod cards_types;
pub mod dealing;
pub mod deck;
pub mod exchange;
pub mod fold_or_stay;
pub mod game_transition;
pub mod invariants;
pub mod player;
pub mod player_view;
pub mod seed_derivation;
pub mod selectors;
pub mod settlement;
pub mod snapshot;
pub mod state;
pub mod tricks;
pub mod trump;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_exchange;
#[cfg(test)]
mod tests_props_conservation;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_scenario;
#[cfg(test)]
mod tests_settlement;

// Re-exports for ergonomics
pub use action::{apply, reduce, Action, ActionEffect, ActionOutcome};
pub use cards_logic::{card_beats, hand_has_suit};
pub use cards_types::{Card, CardId, Rank, Suit, DECK_SIZE};
pub use deck::Deck;
pub use game_transition::GameTransition;
pub use player::{Player, PlayerId};
pub use player_view::PlayerView;
pub use selectors::PendingDecision;
pub use snapshot::{snapshot, GameSnapshot};
pub use state::{Game, Phase, PlayedCard, Round, Turn};
