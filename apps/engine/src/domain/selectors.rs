//! Read-only projections of the game.
//!
//! Pure functions of the current state. The engine uses the same functions
//! to enforce acting order, so a consumer that follows them never hits a
//! turn-order rejection.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, CardId};
use crate::domain::deck::Deck;
use crate::domain::player::{next_seat, seats_from, Player, PlayerId};
use crate::domain::state::{Game, Phase, Round, Turn};
use crate::domain::tricks::check_playable;

pub fn current_round(game: &Game) -> Option<&Round> {
    game.round().ok()
}

pub fn players(game: &Game) -> &[Player] {
    &game.players
}

pub fn player(game: &Game, player_id: PlayerId) -> Option<&Player> {
    game.players.get(player_id as usize)
}

pub fn deck(game: &Game) -> &Deck {
    &game.deck
}

pub fn card(game: &Game, card_id: CardId) -> Option<&Card> {
    game.deck.get(card_id)
}

pub fn trump_card(game: &Game) -> Option<&Card> {
    current_round(game)?
        .trump_card
        .and_then(|id| game.deck.get(id))
}

/// The trump card as the table sees it: `None` while it lies face down.
pub fn visible_trump_card(game: &Game) -> Option<&Card> {
    if trump_suit_hidden(game) {
        return None;
    }
    trump_card(game)
}

pub fn trump_suit_hidden(game: &Game) -> bool {
    current_round(game).is_some_and(|r| r.hidden_trump_suit)
}

pub fn dealer(game: &Game) -> Option<&Player> {
    game.players.iter().find(|p| p.is_dealer)
}

pub fn round_pot(game: &Game) -> i64 {
    current_round(game).map_or(0, |r| r.round_pot)
}

pub fn trump_for_sale(game: &Game) -> bool {
    current_round(game).is_some_and(|r| r.trump_for_sale)
}

pub fn dealer_took_trump(game: &Game) -> bool {
    current_round(game).is_some_and(|r| r.dealer_took_trump)
}

pub fn player_took_trump(game: &Game) -> Option<PlayerId> {
    current_round(game)?.player_took_trump_id
}

pub fn current_turn(game: &Game) -> Option<&Turn> {
    current_round(game)?.current_turn()
}

/// 1-based number of the trick in progress, 0 before trick play.
pub fn current_turn_number(game: &Game) -> usize {
    current_round(game).map_or(0, |r| r.turns.len())
}

/// Cards listed in a player's hand, in receipt order.
pub fn hand_cards(game: &Game, player_id: PlayerId) -> Vec<&Card> {
    player(game, player_id)
        .map(|p| p.hand.iter().filter_map(|&id| game.deck.get(id)).collect())
        .unwrap_or_default()
}

/// Who may take (or refuse) the trump card right now.
///
/// In `2Cards` only the dealer, once, for the early take. In `4Cards` the
/// first player clockwise from the dealer's left who has neither refused nor
/// folded; a dealer who declined early is skipped. `None` once trump is taken
/// or when everyone eligible refused.
pub fn who_can_take_trump(game: &Game) -> Option<PlayerId> {
    let round = current_round(game)?;
    let dealer = game.dealer()?;
    if !round.trump_for_sale || round.trump_card.is_none() {
        return None;
    }
    if game.players.iter().any(|p| p.has_taken_trump) {
        return None;
    }

    let n = game.number_of_players;
    match round.state {
        Phase::TwoCards => {
            let d = player(game, dealer)?;
            (!d.has_refused_trump_early && !d.has_refused_trump && !d.has_folded)
                .then_some(dealer)
        }
        Phase::FourCards => seats_from(next_seat(dealer, n), n).find(|&id| {
            player(game, id).is_some_and(|p| {
                !p.has_refused_trump && !p.has_refused_trump_early && !p.has_folded
            })
        }),
        _ => None,
    }
}

/// Next player who must decide to stay in or fold, clockwise from the trump-taker.
pub fn who_can_fold_or_stay(game: &Game) -> Option<PlayerId> {
    let round = current_round(game)?;
    if round.state != Phase::FourCards {
        return None;
    }
    let taker = game.trump_taker()?;
    let n = game.number_of_players;
    seats_from(next_seat(taker, n), n).find(|&id| {
        player(game, id).is_some_and(|p| {
            !p.has_folded && !p.is_in && !p.has_taken_trump && !p.has_exchanged_cards
        })
    })
}

/// Next player to exchange: the trump-taker first, then clockwise from them.
///
/// Nobody exchanges until every player has stayed in or folded.
pub fn who_can_exchange(game: &Game) -> Option<PlayerId> {
    let round = current_round(game)?;
    if round.state != Phase::FourCards {
        return None;
    }
    if !game.players.iter().all(|p| p.has_resolved_fold_or_stay()) {
        return None;
    }
    let taker_id = game.trump_taker()?;
    let taker = player(game, taker_id)?;
    if !taker.has_exchanged_cards && !taker.has_folded {
        return Some(taker_id);
    }
    let n = game.number_of_players;
    seats_from(taker_id, n).find(|&id| {
        player(game, id).is_some_and(|p| p.is_in_round() && !p.has_exchanged_cards)
    })
}

pub fn is_players_turn(game: &Game, player_id: PlayerId) -> bool {
    current_turn(game).is_some_and(|t| t.next_player_id == Some(player_id))
}

/// Whether the player whose turn it is may legally play `card_id` now.
pub fn is_card_playable(game: &Game, card_id: CardId) -> bool {
    let Some(next) = current_turn(game).and_then(|t| t.next_player_id) else {
        return false;
    };
    check_playable(game, next, card_id).is_ok()
}

/// Legal plays for `player_id` sorted by id, empty unless it is their turn.
pub fn playable_cards(game: &Game, player_id: PlayerId) -> Vec<CardId> {
    let Some(p) = player(game, player_id) else {
        return Vec::new();
    };
    let mut cards: Vec<CardId> = p
        .hand
        .iter()
        .copied()
        .filter(|&id| check_playable(game, player_id, id).is_ok())
        .collect();
    cards.sort_unstable();
    cards
}

/// Whether `card_id` may be marked for exchange.
pub fn is_card_selectable(game: &Game, card_id: CardId) -> bool {
    let Some(round) = current_round(game) else {
        return false;
    };
    if round.state != Phase::FourCards {
        return false;
    }
    let Some(card) = game.deck.get(card_id) else {
        return false;
    };
    let Some(holder) = game.holder_of(card_id).and_then(|id| player(game, id)) else {
        return false;
    };
    holder.is_in_round()
        && !holder.has_exchanged_cards
        && !card.flags.is_trump
        && !card.flags.is_played
        && !card.flags.is_discarded
}

/// Where each of the 40 cards currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAccounting {
    /// Undealt cards, including an untaken trump indicator.
    pub fresh: usize,
    pub held: usize,
    pub discarded: usize,
    pub played: usize,
    /// Dealt cards listed in no hand; always 0 in a consistent game.
    pub stray: usize,
}

impl CardAccounting {
    pub fn total(&self) -> usize {
        self.fresh + self.held + self.discarded + self.played + self.stray
    }
}

/// Partition the deck by precedence played > discarded > held > fresh.
pub fn card_accounting(game: &Game) -> CardAccounting {
    let mut acc = CardAccounting::default();
    for card in game.deck.cards() {
        if card.flags.is_played {
            acc.played += 1;
        } else if card.flags.is_discarded {
            acc.discarded += 1;
        } else if game.holder_of(card.id).is_some() {
            acc.held += 1;
        } else if card.flags.is_dealt {
            acc.stray += 1;
        } else {
            acc.fresh += 1;
        }
    }
    acc
}

/// Sum of all banks plus the current pot.
pub fn total_currency(game: &Game) -> i64 {
    game.players.iter().map(|p| p.bank).sum::<i64>() + round_pot(game)
}

/// The single decision the game is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingDecision {
    ChooseDealer,
    PostAnte { player_id: PlayerId },
    Deal,
    /// The dealer flips the trump card, face up or down.
    FlipTrump { dealer: PlayerId },
    TrumpOffer { player_id: PlayerId, early: bool },
    FoldOrStay { player_id: PlayerId },
    Exchange { player_id: PlayerId },
    Play { player_id: PlayerId },
    Settle,
}

pub fn pending_decision(game: &Game) -> Option<PendingDecision> {
    if !game.initialized {
        return None;
    }
    let round = current_round(game)?;
    let n = game.number_of_players;
    match round.state {
        Phase::Initial | Phase::NoCards => {
            let Some(dealer) = game.dealer() else {
                return Some(PendingDecision::ChooseDealer);
            };
            if round.round_number == 0 {
                let missing = seats_from(next_seat(dealer, n), n).find(|&id| {
                    player(game, id).is_some_and(|p| !p.is_dealer && !p.is_small_blind)
                });
                if let Some(player_id) = missing {
                    return Some(PendingDecision::PostAnte { player_id });
                }
            }
            Some(PendingDecision::Deal)
        }
        Phase::TwoCards => {
            let dealer = game.dealer()?;
            if round.trump_card.is_none() {
                return Some(PendingDecision::FlipTrump { dealer });
            }
            match who_can_take_trump(game) {
                Some(player_id) => Some(PendingDecision::TrumpOffer {
                    player_id,
                    early: true,
                }),
                None => Some(PendingDecision::Deal),
            }
        }
        Phase::FourCards => {
            if game.trump_taker().is_none() {
                return who_can_take_trump(game).map(|player_id| PendingDecision::TrumpOffer {
                    player_id,
                    early: false,
                });
            }
            if let Some(player_id) = who_can_fold_or_stay(game) {
                return Some(PendingDecision::FoldOrStay { player_id });
            }
            who_can_exchange(game).map(|player_id| PendingDecision::Exchange { player_id })
        }
        Phase::Showdown => current_turn(game)
            .and_then(|t| t.next_player_id)
            .map(|player_id| PendingDecision::Play { player_id }),
        Phase::RoundOver | Phase::GameOver => Some(PendingDecision::Settle),
    }
}
