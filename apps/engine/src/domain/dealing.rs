//! Game setup and dealing: initialisation, dealer, antes, the two deals and
//! the forced redeal.

use tracing::{debug, info};

use crate::domain::player::{next_seat, seats_from, Player, PlayerId};
use crate::domain::state::{
    require_dealer, require_initialized, require_phase, Game, Phase, Round,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Cards each player receives per deal.
pub const CARDS_PER_DEAL: usize = 2;

/// Create the players, a shuffled deck and round 0. The game's rules are
/// validated first.
///
/// Re-initialising an existing game discards all of its state except the
/// seed, rules and deal counter.
pub fn initialize_game(game: &mut Game, number_of_players: usize) -> Result<(), DomainError> {
    game.rules.validate()?;
    if !game.rules.allows_player_count(number_of_players) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!(
                "{number_of_players} players requested, allowed {}..={}",
                game.rules.min_players, game.rules.max_players
            ),
        ));
    }

    game.number_of_players = number_of_players;
    game.players = (0..number_of_players)
        .map(|id| Player::new(id as PlayerId, game.rules.starting_bank))
        .collect();
    game.rebuild_deck();
    game.rounds = vec![Round::new(0, 0, None)];
    game.current_round = 0;
    game.games_completed = 0;
    game.initialized = true;

    info!(number_of_players, seed = game.seed, "game initialized");
    Ok(())
}

/// Make `player_id` the dealer, replacing any previous dealer. Only before dealing.
pub fn set_dealer(game: &mut Game, player_id: PlayerId) -> Result<(), DomainError> {
    require_phase(game, &[Phase::Initial, Phase::NoCards], "set_dealer")?;
    game.player(player_id)?;

    for p in game.players.iter_mut() {
        p.is_dealer = p.id == player_id;
    }
    game.round_mut()?.dealer = Some(player_id);
    debug!(player_id, "dealer set");
    Ok(())
}

/// Post an ante: debit the bank, credit the pot, mark the small blind.
///
/// The bank may go into debt, so a broke seat can still ante.
pub fn add_wager(game: &mut Game, player_id: PlayerId, amount: i64) -> Result<(), DomainError> {
    let phase = require_phase(game, &[Phase::Initial, Phase::NoCards], "add_wager")?;
    let player = game.player(player_id)?;
    if player.is_dealer {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDecided,
            format!("player {player_id} is the dealer and posts no ante"),
        ));
    }
    if player.is_small_blind {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDecided,
            format!("player {player_id} already posted the ante"),
        ));
    }
    if amount <= 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidAmount,
            format!("wager must be positive, got {amount}"),
        ));
    }

    let player = game.player_mut(player_id)?;
    player.bank -= amount;
    player.is_small_blind = true;

    let round = game.round_mut()?;
    round.round_pot += amount;
    if phase == Phase::Initial {
        round.state = Phase::NoCards;
    }
    debug!(player_id, amount, pot = round.round_pot, "ante posted");
    Ok(())
}

/// Deal two cards to every player, clockwise from the seat after the dealer.
///
/// From `Initial`/`0Cards` this is the first deal (round 0 requires every
/// non-dealer to have posted the ante) and moves to `2Cards`. From `2Cards`
/// it is the second deal, requires the trump card, and moves to `4Cards`.
pub fn deal_cards(game: &mut Game) -> Result<Phase, DomainError> {
    let phase = require_phase(
        game,
        &[Phase::Initial, Phase::NoCards, Phase::TwoCards],
        "deal_cards",
    )?;
    let dealer = require_dealer(game, "deal_cards")?;
    let round = game.round()?;

    if phase.is_pre_deal() && round.round_number == 0 {
        let missing: Vec<PlayerId> = game
            .players
            .iter()
            .filter(|p| !p.is_dealer && !p.is_small_blind)
            .map(|p| p.id)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::SmallBlindsMissing,
                format!("players {missing:?} have not posted the small blind"),
            ));
        }
    }
    if phase == Phase::TwoCards && round.trump_card.is_none() {
        return Err(DomainError::validation(
            ValidationKind::TrumpNotSet,
            "cannot deal the next two cards until trump is set",
        ));
    }

    let needed = CARDS_PER_DEAL * game.number_of_players;
    if game.deck.drawable_count() < needed {
        return Err(DomainError::invariant(format!(
            "deck has {} drawable cards, deal needs {needed}",
            game.deck.drawable_count()
        )));
    }

    let n = game.number_of_players;
    let order: Vec<PlayerId> = seats_from(next_seat(dealer, n), n).collect();
    for _ in 0..CARDS_PER_DEAL {
        for &seat in &order {
            let card = game
                .deck
                .draw()
                .ok_or_else(|| DomainError::invariant("deck exhausted mid-deal"))?;
            game.player_mut(seat)?.hand.push(card);
        }
    }

    let next = if phase.is_pre_deal() {
        Phase::TwoCards
    } else {
        Phase::FourCards
    };
    game.round_mut()?.state = next;
    debug!(from = %phase, to = %next, "cards dealt");
    Ok(next)
}

/// Void the current round after every eligible player refused trump.
///
/// Hands and decisions are cleared and a new deck is shuffled; the dealer,
/// posted antes, pot and round number are kept.
pub(crate) fn redeal_round(game: &mut Game) -> Result<(), DomainError> {
    require_initialized(game, "redeal_round")?;
    for p in game.players.iter_mut() {
        p.clear_decisions();
    }
    game.rebuild_deck();

    let round = game.round_mut()?;
    let redeals = round.redeals + 1;
    let replacement = Round {
        redeals,
        ..Round::new(round.round_number, round.round_pot, round.dealer)
    };
    *round = replacement;
    info!(
        round_no = round.round_number,
        redeals,
        pot = round.round_pot,
        "nobody took trump, round redealt"
    );
    Ok(())
}
