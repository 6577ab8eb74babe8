//! The action surface and the reducer that applies it.
//!
//! `reduce` works on a copy and returns it only when the action and the
//! post-action invariant check both succeed, so a rejected action never
//! leaves a partial mutation behind.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::cards_types::CardId;
use crate::domain::dealing::{add_wager, deal_cards, initialize_game, set_dealer};
use crate::domain::exchange::{discard_card, exchange_cards, toggle_select_card, ExchangeResult};
use crate::domain::fold_or_stay::{player_folds, player_is_in, FoldOutcome};
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::invariants::check_invariants;
use crate::domain::player::PlayerId;
use crate::domain::settlement::{end_round, SettlementReport};
use crate::domain::state::{Game, Phase};
use crate::domain::tricks::{play_card, PlayCardResult};
use crate::domain::trump::{
    refuse_trump, refuse_trump_early, set_trump_suit, take_trump, take_trump_early,
    RefusalOutcome,
};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    InitializeGame { number_of_players: usize },
    SetDealer { player_id: PlayerId },
    AddWager { player_id: PlayerId, amount: i64 },
    DealCards,
    SetTrumpSuit { hidden: bool },
    TakeTrumpEarly { player_id: PlayerId },
    RefuseTrumpEarly { player_id: PlayerId },
    TakeTrump { player_id: PlayerId },
    RefuseTrump { player_id: PlayerId },
    PlayerFolds { player_id: PlayerId },
    PlayerIsIn { player_id: PlayerId },
    ToggleSelectCard { card_id: CardId },
    ExchangeCards { player_id: PlayerId },
    DiscardCard { card_id: CardId },
    PlayCard { player_id: PlayerId, card_id: CardId },
    EndRound,
}

impl Action {
    pub const fn name(&self) -> &'static str {
        match self {
            Action::InitializeGame { .. } => "initialize_game",
            Action::SetDealer { .. } => "set_dealer",
            Action::AddWager { .. } => "add_wager",
            Action::DealCards => "deal_cards",
            Action::SetTrumpSuit { .. } => "set_trump_suit",
            Action::TakeTrumpEarly { .. } => "take_trump_early",
            Action::RefuseTrumpEarly { .. } => "refuse_trump_early",
            Action::TakeTrump { .. } => "take_trump",
            Action::RefuseTrump { .. } => "refuse_trump",
            Action::PlayerFolds { .. } => "player_folds",
            Action::PlayerIsIn { .. } => "player_is_in",
            Action::ToggleSelectCard { .. } => "toggle_select_card",
            Action::ExchangeCards { .. } => "exchange_cards",
            Action::DiscardCard { .. } => "discard_card",
            Action::PlayCard { .. } => "play_card",
            Action::EndRound => "end_round",
        }
    }

    /// The acting player, for actions that name one.
    pub const fn actor(&self) -> Option<PlayerId> {
        match *self {
            Action::SetDealer { player_id }
            | Action::AddWager { player_id, .. }
            | Action::TakeTrumpEarly { player_id }
            | Action::RefuseTrumpEarly { player_id }
            | Action::TakeTrump { player_id }
            | Action::RefuseTrump { player_id }
            | Action::PlayerFolds { player_id }
            | Action::PlayerIsIn { player_id }
            | Action::ExchangeCards { player_id }
            | Action::PlayCard { player_id, .. } => Some(player_id),
            _ => None,
        }
    }
}

/// Action-specific result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    Applied,
    Dealt(Phase),
    Refused(RefusalOutcome),
    Folded(FoldOutcome),
    Selected(bool),
    Exchanged(ExchangeResult),
    Discarded { player_id: PlayerId },
    Played(PlayCardResult),
    Settled(SettlementReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub effect: ActionEffect,
    pub transitions: Vec<GameTransition>,
}

/// Apply `action` in place without the copy-on-write guard.
///
/// Every action validates before it mutates, but a failure past that point
/// can leave `game` partially updated; prefer [`reduce`] or [`apply`].
pub fn dispatch(game: &mut Game, action: &Action) -> Result<ActionEffect, DomainError> {
    let effect = match *action {
        Action::InitializeGame { number_of_players } => {
            initialize_game(game, number_of_players)?;
            ActionEffect::Applied
        }
        Action::SetDealer { player_id } => {
            set_dealer(game, player_id)?;
            ActionEffect::Applied
        }
        Action::AddWager { player_id, amount } => {
            add_wager(game, player_id, amount)?;
            ActionEffect::Applied
        }
        Action::DealCards => ActionEffect::Dealt(deal_cards(game)?),
        Action::SetTrumpSuit { hidden } => {
            set_trump_suit(game, hidden)?;
            ActionEffect::Applied
        }
        Action::TakeTrumpEarly { player_id } => {
            take_trump_early(game, player_id)?;
            ActionEffect::Applied
        }
        Action::RefuseTrumpEarly { player_id } => {
            refuse_trump_early(game, player_id)?;
            ActionEffect::Applied
        }
        Action::TakeTrump { player_id } => {
            take_trump(game, player_id)?;
            ActionEffect::Applied
        }
        Action::RefuseTrump { player_id } => ActionEffect::Refused(refuse_trump(game, player_id)?),
        Action::PlayerFolds { player_id } => ActionEffect::Folded(player_folds(game, player_id)?),
        Action::PlayerIsIn { player_id } => {
            player_is_in(game, player_id)?;
            ActionEffect::Applied
        }
        Action::ToggleSelectCard { card_id } => {
            ActionEffect::Selected(toggle_select_card(game, card_id)?)
        }
        Action::ExchangeCards { player_id } => {
            ActionEffect::Exchanged(exchange_cards(game, player_id)?)
        }
        Action::DiscardCard { card_id } => ActionEffect::Discarded {
            player_id: discard_card(game, card_id)?,
        },
        Action::PlayCard { player_id, card_id } => {
            ActionEffect::Played(play_card(game, player_id, card_id)?)
        }
        Action::EndRound => ActionEffect::Settled(end_round(game)?),
    };
    Ok(effect)
}

/// Pure transition: the next state and what happened, or the rejection.
pub fn reduce(game: &Game, action: &Action) -> Result<(Game, ActionOutcome), DomainError> {
    let mut next = game.clone();
    let effect = dispatch(&mut next, action)?;
    check_invariants(&next)?;
    let transitions =
        derive_game_transitions(&GameLifecycleView::of(game), &GameLifecycleView::of(&next));
    Ok((
        next,
        ActionOutcome {
            effect,
            transitions,
        },
    ))
}

/// Apply `action` to `game`, committing only on success.
///
/// Rejections are logged and returned; `game` is left untouched.
pub fn apply(game: &mut Game, action: &Action) -> Result<ActionOutcome, DomainError> {
    match reduce(game, action) {
        Ok((next, outcome)) => {
            *game = next;
            debug!(
                action = action.name(),
                transitions = outcome.transitions.len(),
                "action applied"
            );
            Ok(outcome)
        }
        Err(err) => {
            warn!(
                action = action.name(),
                actor = ?action.actor(),
                code = err.kind().map(|k| k.code()),
                error = %err,
                "action rejected"
            );
            Err(err)
        }
    }
}
