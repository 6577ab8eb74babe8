use tracing::{debug, info};

use crate::domain::cards_logic::{card_beats, hand_has_suit};
use crate::domain::cards_types::{Card, CardId, Suit};
use crate::domain::deck::Deck;
use crate::domain::player::{next_seat, seats_from, PlayerId};
use crate::domain::state::{require_phase, Game, Phase, PlayedCard, Turn};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether every in-round player has now played to the trick.
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<PlayerId>,
    /// Completed tricks this round after this play.
    pub tricks_completed: usize,
    /// Phase transitioned to, if any (None means still in Showdown).
    pub phase_transitioned: Option<Phase>,
}

/// Cards the player could legally play to the current trick, ignoring whose
/// turn it is. Sorted by id.
pub fn legal_moves(game: &Game, who: PlayerId) -> Vec<CardId> {
    if game.phase() != Some(Phase::Showdown) {
        return Vec::new();
    }
    let Ok(player) = game.player(who) else {
        return Vec::new();
    };
    if !player.is_in_round() {
        return Vec::new();
    }

    let hand: Vec<_> = player
        .hand
        .iter()
        .filter_map(|&id| game.deck.get(id))
        .filter(|c| !c.flags.is_played)
        .collect();
    let led = game
        .round()
        .ok()
        .and_then(|r| r.current_turn())
        .and_then(|t| t.suit);

    let mut moves: Vec<CardId> = match led {
        Some(lead) if hand_has_suit(hand.iter().copied(), lead) => hand
            .iter()
            .filter(|c| c.suit == lead)
            .map(|c| c.id)
            .collect(),
        _ => hand.iter().map(|c| c.id).collect(),
    };
    moves.sort_unstable();
    moves
}

/// Every guard on `play_card`, without mutating anything.
pub fn check_playable(game: &Game, who: PlayerId, card_id: CardId) -> Result<(), DomainError> {
    require_phase(game, &[Phase::Showdown], "play_card")?;
    let turn = game
        .round()?
        .current_turn()
        .ok_or_else(|| DomainError::invariant("showdown without a current turn"))?;
    if turn.next_player_id != Some(who) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("it is not player {who}'s turn"),
        ));
    }

    let player = game.player(who)?;
    if player.has_folded {
        return Err(DomainError::validation(
            ValidationKind::PlayerFolded,
            format!("player {who} has folded"),
        ));
    }
    if !player.is_in {
        return Err(DomainError::validation(
            ValidationKind::PlayerNotIn,
            format!("player {who} is not in the round"),
        ));
    }
    let card = game.card(card_id)?;
    if !player.holds(card_id) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card_id} is not in player {who}'s hand"),
        ));
    }
    if card.flags.is_played {
        return Err(DomainError::validation(
            ValidationKind::CardAlreadyPlayed,
            format!("card {card_id} was already played"),
        ));
    }
    if let Some(lead) = turn.suit {
        let hand = player.hand.iter().filter_map(|&id| game.deck.get(id));
        if card.suit != lead && hand_has_suit(hand, lead) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("player {who} must follow {lead:?}"),
            ));
        }
    }
    Ok(())
}

/// Play a card into the current trick, enforcing turn, ownership and suit-following.
pub fn play_card(
    game: &mut Game,
    who: PlayerId,
    card_id: CardId,
) -> Result<PlayCardResult, DomainError> {
    check_playable(game, who, card_id)?;
    let trump = game
        .trump_suit()
        .ok_or_else(|| DomainError::invariant("showdown without a trump card"))?;
    let suit = game.card(card_id)?.suit;
    let in_round: Vec<PlayerId> = game.players_in_round().map(|p| p.id).collect();
    let n = game.number_of_players;

    let card = game.card_mut(card_id)?;
    card.flags.is_played = true;
    card.flags.is_selected = false;

    let turn = game
        .round_mut()?
        .current_turn_mut()
        .ok_or_else(|| DomainError::invariant("showdown without a current turn"))?;
    if turn.cards_played.is_empty() {
        turn.suit = Some(suit);
    }
    let sequence = turn.cards_played.len() as u8 + 1;
    turn.cards_played.push(PlayedCard {
        card_id,
        player_id: who,
        sequence,
    });
    debug!(player_id = who, card_id, sequence, "card played");

    if turn.cards_played.len() < in_round.len() {
        turn.next_player_id =
            seats_from(next_seat(who, n), n).find(|seat| in_round.contains(seat));
        let tricks_completed = game.round()?.completed_tricks();
        return Ok(PlayCardResult {
            trick_completed: false,
            trick_winner: None,
            tricks_completed,
            phase_transitioned: None,
        });
    }

    let plays = turn.cards_played.clone();
    let lead = turn.suit.unwrap_or(suit);
    let winner = calculate_winner(&plays, &game.deck, lead, trump)
        .ok_or_else(|| DomainError::invariant("completed trick has no winner"))?
        .player_id;
    let turn = game
        .round_mut()?
        .current_turn_mut()
        .ok_or_else(|| DomainError::invariant("showdown without a current turn"))?;
    turn.winner_id = Some(winner);
    turn.next_player_id = None;
    game.player_mut(winner)?.tricks += 1;

    let tricks_per_round = game.rules.tricks_per_round as usize;
    let tricks_completed = game.round()?.completed_tricks();
    info!(
        round_no = game.round()?.round_number,
        trick_no = tricks_completed,
        player_id = winner,
        "trick won"
    );

    let mut result = PlayCardResult {
        trick_completed: true,
        trick_winner: Some(winner),
        tricks_completed,
        phase_transitioned: None,
    };
    if tricks_completed < tricks_per_round {
        game.round_mut()?.turns.push(Turn::led_by(winner));
        return Ok(result);
    }

    let next = round_end_phase(game);
    let round = game.round_mut()?;
    round.state = next;
    info!(round_no = round.round_number, phase = %next, "round finished");
    result.phase_transitioned = Some(next);
    Ok(result)
}

/// `GameOver` when the trump-taker made at least two tricks and every other
/// player still in made at least one; otherwise `RoundOver`.
fn round_end_phase(game: &Game) -> Phase {
    let Some(taker) = game.trump_taker() else {
        return Phase::RoundOver;
    };
    let taker_made_it = game.player(taker).is_ok_and(|p| p.tricks >= 2);
    let others_scored = game
        .players_in_round()
        .filter(|p| p.id != taker)
        .all(|p| p.tricks >= 1);
    if taker_made_it && others_scored {
        Phase::GameOver
    } else {
        Phase::RoundOver
    }
}

/// The winning play of a trick: a single reduction with [`card_beats`].
///
/// Returns `None` for an empty trick or when a play names an unknown card.
pub fn calculate_winner(
    plays: &[PlayedCard],
    deck: &Deck,
    lead: Suit,
    trump: Suit,
) -> Option<PlayedCard> {
    let mut best: Option<(PlayedCard, &Card)> = None;
    for play in plays {
        let card = deck.get(play.card_id)?;
        best = match best {
            Some((_, best_card)) if !card_beats(card, best_card, lead, trump) => best,
            _ => Some((*play, card)),
        };
    }
    best.map(|(play, _)| play)
}
