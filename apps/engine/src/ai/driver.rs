//! Turns the game's pending decision into actions chosen by AI seats.
//!
//! The driver only reads public selectors and the acting seat's
//! [`PlayerView`], and only emits ordinary [`Action`]s.

use thiserror::Error;
use tracing::trace;

use crate::ai::{AiError, AiPlayer};
use crate::domain::action::{apply, Action, ActionOutcome};
use crate::domain::exchange::HAND_SIZE;
use crate::domain::player::PlayerId;
use crate::domain::player_view::PlayerView;
use crate::domain::selectors::{pending_decision, PendingDecision};
use crate::domain::state::Game;
use crate::errors::domain::DomainError;

pub type Seat = Box<dyn AiPlayer + Send + Sync>;

#[derive(Debug, Error)]
pub enum DriveError {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Rule(#[from] DomainError),
}

fn seat(seats: &[Seat], player_id: PlayerId) -> Result<&Seat, AiError> {
    seats
        .get(player_id as usize)
        .ok_or_else(|| AiError::Internal(format!("no AI seated at {player_id}")))
}

fn view(game: &Game, player_id: PlayerId) -> Result<PlayerView, AiError> {
    PlayerView::for_player(game, player_id).map_err(|e| AiError::Internal(e.to_string()))
}

/// Actions answering the game's current pending decision.
///
/// Usually one action; an exchange is the card selections followed by the
/// exchange itself.
pub fn next_actions(game: &Game, seats: &[Seat]) -> Result<Vec<Action>, AiError> {
    let Some(pending) = pending_decision(game) else {
        return Err(AiError::NoDecision("game is not waiting on a decision".into()));
    };
    trace!(?pending, "deciding");

    let actions = match pending {
        PendingDecision::ChooseDealer => {
            let n = game.number_of_players.max(1) as u64;
            vec![Action::SetDealer {
                player_id: (game.seed % n) as PlayerId,
            }]
        }
        PendingDecision::PostAnte { player_id } => {
            vec![Action::AddWager {
                player_id,
                amount: game.rules.small_blind,
            }]
        }
        PendingDecision::Deal => vec![Action::DealCards],
        PendingDecision::FlipTrump { dealer } => {
            let hidden = seat(seats, dealer)?.choose_hide_trump(&view(game, dealer)?)?;
            vec![Action::SetTrumpSuit { hidden }]
        }
        PendingDecision::TrumpOffer { player_id, early } => {
            let take = seat(seats, player_id)?.choose_take_trump(&view(game, player_id)?, early)?;
            vec![match (early, take) {
                (true, true) => Action::TakeTrumpEarly { player_id },
                (true, false) => Action::RefuseTrumpEarly { player_id },
                (false, true) => Action::TakeTrump { player_id },
                (false, false) => Action::RefuseTrump { player_id },
            }]
        }
        PendingDecision::FoldOrStay { player_id } => {
            let stay = seat(seats, player_id)?.choose_stay(&view(game, player_id)?)?;
            vec![if stay {
                Action::PlayerIsIn { player_id }
            } else {
                Action::PlayerFolds { player_id }
            }]
        }
        PendingDecision::Exchange { player_id } => {
            let v = view(game, player_id)?;
            let chosen = seat(seats, player_id)?.choose_exchange(&v)?;
            let allowed = v.exchangeable();
            let mut actions = Vec::with_capacity(chosen.len() + 1);
            for card_id in chosen {
                if !allowed.iter().any(|c| c.id == card_id) {
                    return Err(AiError::InvalidMove(format!(
                        "card {card_id} cannot be exchanged by player {player_id}"
                    )));
                }
                actions.push(Action::ToggleSelectCard { card_id });
            }
            actions.push(Action::ExchangeCards { player_id });
            actions
        }
        PendingDecision::Play { player_id } => {
            let v = view(game, player_id)?;
            let ai = seat(seats, player_id)?;
            let discard = if v.hand.len() > HAND_SIZE {
                ai.choose_discard(&v)?
            } else {
                None
            };
            match discard {
                Some(card_id) => vec![Action::DiscardCard { card_id }],
                None => {
                    let card = ai.choose_play(&v)?;
                    vec![Action::PlayCard {
                        player_id,
                        card_id: card.id,
                    }]
                }
            }
        }
        PendingDecision::Settle => vec![Action::EndRound],
    };
    Ok(actions)
}

/// Decide and apply one pending decision.
pub fn step(game: &mut Game, seats: &[Seat]) -> Result<Vec<ActionOutcome>, DriveError> {
    let actions = next_actions(game, seats)?;
    let mut outcomes = Vec::with_capacity(actions.len());
    for action in &actions {
        outcomes.push(apply(game, action)?);
    }
    Ok(outcomes)
}
