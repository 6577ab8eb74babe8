//! Card exchange: selecting cards, swapping them for fresh ones, and the
//! trump-taker's optional discard back to four cards.

use tracing::{debug, info};

use crate::domain::cards_types::CardId;
use crate::domain::player::PlayerId;
use crate::domain::selectors::who_can_exchange;
use crate::domain::state::{require_phase, require_trump_taker, Game, Phase, Turn};
use crate::errors::domain::{DomainError, ValidationKind};

/// Hand size every player plays with; the trump-taker holds one extra.
pub const HAND_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResult {
    /// `(discarded, drawn)` pairs, in hand order.
    pub replaced: Vec<(CardId, CardId)>,
    /// Selected cards kept because the deck ran dry.
    pub kept: Vec<CardId>,
    /// This was the last exchange and trick play has started.
    pub showdown_started: bool,
}

/// Flip the exchange mark on a card in some active player's hand.
/// Returns the new mark.
pub fn toggle_select_card(game: &mut Game, card_id: CardId) -> Result<bool, DomainError> {
    require_phase(game, &[Phase::FourCards], "toggle_select_card")?;
    let card = game.card(card_id)?;
    let holder_id = game.holder_of(card_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card_id} is not in any hand"),
        )
    })?;
    let holder = game.player(holder_id)?;

    if holder.has_folded {
        return Err(DomainError::validation(
            ValidationKind::PlayerFolded,
            format!("player {holder_id} has folded"),
        ));
    }
    if !holder.is_in {
        return Err(DomainError::validation(
            ValidationKind::PlayerNotIn,
            format!("player {holder_id} has not committed to the round"),
        ));
    }
    if holder.has_exchanged_cards {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDecided,
            format!("player {holder_id} already exchanged"),
        ));
    }
    if card.flags.is_trump || card.flags.is_played || card.flags.is_discarded {
        return Err(DomainError::validation(
            ValidationKind::CardNotSelectable,
            format!("card {card_id} cannot be exchanged"),
        ));
    }

    let card = game.card_mut(card_id)?;
    card.flags.is_selected = !card.flags.is_selected;
    Ok(card.flags.is_selected)
}

/// Replace every selected card in the player's hand with a fresh one.
///
/// The trump-taker goes first, then clockwise from them. When the last
/// active player has exchanged, the round moves to `Showdown` with the
/// trump-taker leading and the trump revealed.
pub fn exchange_cards(game: &mut Game, player_id: PlayerId) -> Result<ExchangeResult, DomainError> {
    require_phase(game, &[Phase::FourCards], "exchange_cards")?;
    let taker = require_trump_taker(game, "exchange_cards")?;
    let player = game.player(player_id)?;
    if player.has_folded {
        return Err(DomainError::validation(
            ValidationKind::PlayerFolded,
            format!("player {player_id} has folded"),
        ));
    }
    if player.has_exchanged_cards {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDecided,
            format!("player {player_id} already exchanged"),
        ));
    }
    if !player.is_in {
        return Err(DomainError::validation(
            ValidationKind::PlayerNotIn,
            format!("player {player_id} has not committed to the round"),
        ));
    }
    if who_can_exchange(game) != Some(player_id) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("player {player_id} must wait to exchange"),
        ));
    }

    let selected: Vec<(usize, CardId)> = player
        .hand
        .iter()
        .enumerate()
        .filter(|(_, &id)| {
            game.deck
                .get(id)
                .is_some_and(|c| c.flags.is_selected && !c.flags.is_trump)
        })
        .map(|(slot, &id)| (slot, id))
        .collect();

    let mut result = ExchangeResult {
        replaced: Vec::with_capacity(selected.len()),
        kept: Vec::new(),
        showdown_started: false,
    };
    for (slot, old) in selected {
        game.card_mut(old)?.flags.is_selected = false;
        let Some(new) = game.deck.draw() else {
            result.kept.push(old);
            continue;
        };
        game.card_mut(old)?.flags.is_discarded = true;
        game.player_mut(player_id)?.hand[slot] = new;
        result.replaced.push((old, new));
    }
    game.player_mut(player_id)?.has_exchanged_cards = true;
    debug!(
        player_id,
        replaced = result.replaced.len(),
        kept = result.kept.len(),
        "cards exchanged"
    );

    if game.players_in_round().all(|p| p.has_exchanged_cards) {
        let round = game.round_mut()?;
        round.state = Phase::Showdown;
        round.hidden_trump_suit = false;
        round.turns.push(Turn::led_by(taker));
        result.showdown_started = true;
        info!(round_no = round.round_number, leader = taker, "showdown");
    }
    Ok(result)
}

/// Discard one unplayed card from a hand holding more than four, before
/// the holder plays their first card.
pub fn discard_card(game: &mut Game, card_id: CardId) -> Result<PlayerId, DomainError> {
    require_phase(game, &[Phase::FourCards, Phase::Showdown], "discard_card")?;
    let card = game.card(card_id)?;
    let holder_id = game.holder_of(card_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card_id} is not in any hand"),
        )
    })?;
    let holder = game.player(holder_id)?;

    if holder.has_folded {
        return Err(DomainError::validation(
            ValidationKind::PlayerFolded,
            format!("player {holder_id} has folded"),
        ));
    }
    if !holder.has_exchanged_cards {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("player {holder_id} must exchange before discarding"),
        ));
    }
    if card.flags.is_played {
        return Err(DomainError::validation(
            ValidationKind::CardAlreadyPlayed,
            format!("card {card_id} was already played"),
        ));
    }
    let has_played = holder
        .hand
        .iter()
        .any(|&id| game.deck.get(id).is_some_and(|c| c.flags.is_played));
    if has_played || holder.hand.len() <= HAND_SIZE {
        return Err(DomainError::validation(
            ValidationKind::CardNotSelectable,
            format!("player {holder_id} cannot discard now"),
        ));
    }

    game.player_mut(holder_id)?.hand.retain(|&id| id != card_id);
    let card = game.card_mut(card_id)?;
    card.flags.is_discarded = true;
    card.flags.is_selected = false;
    debug!(player_id = holder_id, card_id, "card discarded");
    Ok(holder_id)
}
