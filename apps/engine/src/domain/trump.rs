//! Trump flip and auction: the dealer's early take, the clockwise auction
//! after the second deal, and the forced redeal when nobody takes it.

use tracing::{debug, info};

use crate::domain::cards_types::CardId;
use crate::domain::dealing::redeal_round;
use crate::domain::player::PlayerId;
use crate::domain::selectors::who_can_take_trump;
use crate::domain::state::{require_dealer, require_phase, require_trump_card, Game, Phase};
use crate::errors::domain::{DomainError, ValidationKind};

/// What a refusal did to the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalOutcome {
    /// Another player is now offered the trump card.
    Passed { next: PlayerId },
    /// Nobody was left to offer it to; the round was voided and redealt.
    Redealt,
}

/// Flip the next drawable card as the trump indicator, face down when `hidden`.
///
/// The card stays in the deck (not dealt) until somebody takes it.
pub fn set_trump_suit(game: &mut Game, hidden: bool) -> Result<(), DomainError> {
    require_phase(game, &[Phase::TwoCards], "set_trump_suit")?;
    require_dealer(game, "set_trump_suit")?;
    if game.round()?.trump_card.is_some() {
        return Err(DomainError::validation(
            ValidationKind::TrumpAlreadySet,
            "trump was already flipped this round",
        ));
    }
    let card_id = game.deck.peek_drawable().ok_or_else(|| {
        DomainError::validation(ValidationKind::DeckExhausted, "no card left to flip as trump")
    })?;

    game.card_mut(card_id)?.flags.is_trump = true;
    let round = game.round_mut()?;
    round.trump_card = Some(card_id);
    round.hidden_trump_suit = hidden;

    if hidden {
        debug!(round_no = round.round_number, "trump flipped face down");
    } else {
        debug!(round_no = round.round_number, card_id, "trump flipped");
    }
    Ok(())
}

/// Dealer takes the trump card before the second deal.
pub fn take_trump_early(game: &mut Game, player_id: PlayerId) -> Result<(), DomainError> {
    require_phase(game, &[Phase::TwoCards], "take_trump_early")?;
    let trump = require_trump_card(game, "take_trump_early")?;
    require_is_dealer(game, player_id)?;
    require_offered_to(game, player_id)?;

    claim_trump(game, player_id, trump, true)?;
    info!(player_id, "dealer took trump early");
    Ok(())
}

/// Dealer declines the early take; they are then skipped in the auction.
pub fn refuse_trump_early(game: &mut Game, player_id: PlayerId) -> Result<(), DomainError> {
    require_phase(game, &[Phase::TwoCards], "refuse_trump_early")?;
    require_trump_card(game, "refuse_trump_early")?;
    require_is_dealer(game, player_id)?;
    require_offered_to(game, player_id)?;

    game.player_mut(player_id)?.has_refused_trump_early = true;
    debug!(player_id, "dealer refused trump early");
    Ok(())
}

/// Take the trump card during the `4Cards` auction; closes the auction.
pub fn take_trump(game: &mut Game, player_id: PlayerId) -> Result<(), DomainError> {
    require_phase(game, &[Phase::FourCards], "take_trump")?;
    let trump = require_trump_card(game, "take_trump")?;
    require_offered_to(game, player_id)?;

    claim_trump(game, player_id, trump, false)?;
    info!(player_id, "trump taken");
    Ok(())
}

/// Pass on the trump card. When the last eligible player passes the round
/// is redealt.
pub fn refuse_trump(game: &mut Game, player_id: PlayerId) -> Result<RefusalOutcome, DomainError> {
    require_phase(game, &[Phase::FourCards], "refuse_trump")?;
    require_trump_card(game, "refuse_trump")?;
    require_offered_to(game, player_id)?;

    game.player_mut(player_id)?.has_refused_trump = true;
    debug!(player_id, "trump refused");

    match who_can_take_trump(game) {
        Some(next) => Ok(RefusalOutcome::Passed { next }),
        None => {
            redeal_round(game)?;
            Ok(RefusalOutcome::Redealt)
        }
    }
}

fn require_is_dealer(game: &Game, player_id: PlayerId) -> Result<(), DomainError> {
    if game.player(player_id)?.is_dealer {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::NotDealer,
            format!("player {player_id} is not the dealer"),
        ))
    }
}

/// The trump card must be on offer to exactly this player.
fn require_offered_to(game: &Game, player_id: PlayerId) -> Result<(), DomainError> {
    let player = game.player(player_id)?;
    let round = game.round()?;
    if !round.trump_for_sale || game.trump_taker().is_some() {
        return Err(DomainError::validation(
            ValidationKind::TrumpNotForSale,
            "trump is no longer for sale",
        ));
    }
    if who_can_take_trump(game) == Some(player_id) {
        return Ok(());
    }

    let (kind, detail) = if player.has_folded {
        (ValidationKind::PlayerFolded, format!("player {player_id} has folded"))
    } else if player.has_refused_trump || player.has_refused_trump_early {
        (
            ValidationKind::AlreadyDecided,
            format!("player {player_id} already refused trump"),
        )
    } else {
        (
            ValidationKind::OutOfTurn,
            format!("trump is not offered to player {player_id}"),
        )
    };
    Err(DomainError::validation(kind, detail))
}

fn claim_trump(
    game: &mut Game,
    player_id: PlayerId,
    trump: CardId,
    early: bool,
) -> Result<(), DomainError> {
    let is_dealer = game.player(player_id)?.is_dealer;
    game.player_mut(player_id)?.take_trump_card(trump, early);
    game.card_mut(trump)?.flags.is_dealt = true;

    let round = game.round_mut()?;
    round.trump_for_sale = false;
    round.player_took_trump_id = Some(player_id);
    round.dealer_took_trump = is_dealer;
    Ok(())
}
