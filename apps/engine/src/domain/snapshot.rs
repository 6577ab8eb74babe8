//! Public snapshot API for observing game state without exposing internals.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::player::PlayerId;
use crate::domain::player_view::VisiblePlay;
use crate::domain::selectors::{self, CardAccounting, PendingDecision};
use crate::domain::state::{Game, Phase};

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub bank: i64,
    /// Unplayed cards held.
    pub hand_size: usize,
    pub tricks: u8,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_in: bool,
    pub has_folded: bool,
    pub has_exchanged_cards: bool,
    pub has_taken_trump: bool,
    pub has_refused_trump: bool,
    /// Present only for the viewing seat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

/// One trick as seen by the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPublic {
    pub plays: Vec<VisiblePlay>,
    pub winner: Option<PlayerId>,
    pub next: Option<PlayerId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Option<Phase>,
    pub round_no: u32,
    pub games_completed: u32,
    pub pot: i64,
    pub dealer: Option<PlayerId>,
    /// `None` while face down.
    pub trump_card: Option<Card>,
    pub trump_hidden: bool,
    pub trump_for_sale: bool,
    pub trump_taker: Option<PlayerId>,
    pub players: Vec<PlayerPublic>,
    pub tricks: Vec<TrickPublic>,
    pub cards: CardAccounting,
    pub pending: Option<PendingDecision>,
}

/// Snapshot of the table from `viewer`'s seat; `None` for a spectator.
pub fn snapshot(game: &Game, viewer: Option<PlayerId>) -> GameSnapshot {
    let round = selectors::current_round(game);
    let players = game
        .players
        .iter()
        .map(|p| {
            let unplayed: Vec<Card> = p
                .hand
                .iter()
                .filter_map(|&id| game.deck.get(id))
                .filter(|c| !c.flags.is_played)
                .copied()
                .collect();
            PlayerPublic {
                id: p.id,
                name: p.name.clone(),
                bank: p.bank,
                hand_size: unplayed.len(),
                tricks: p.tricks,
                is_dealer: p.is_dealer,
                is_small_blind: p.is_small_blind,
                is_in: p.is_in,
                has_folded: p.has_folded,
                has_exchanged_cards: p.has_exchanged_cards,
                has_taken_trump: p.has_taken_trump,
                has_refused_trump: p.has_refused_trump || p.has_refused_trump_early,
                hand: (viewer == Some(p.id)).then_some(unplayed),
            }
        })
        .collect();

    let tricks = round
        .map(|r| {
            r.turns
                .iter()
                .map(|t| TrickPublic {
                    plays: t
                        .cards_played
                        .iter()
                        .filter_map(|pc| {
                            game.deck.get(pc.card_id).map(|card| VisiblePlay {
                                player_id: pc.player_id,
                                card: *card,
                            })
                        })
                        .collect(),
                    winner: t.winner_id,
                    next: t.next_player_id,
                })
                .collect()
        })
        .unwrap_or_default();

    GameSnapshot {
        phase: round.map(|r| r.state),
        round_no: round.map_or(0, |r| r.round_number),
        games_completed: game.games_completed,
        pot: selectors::round_pot(game),
        dealer: game.dealer(),
        trump_card: selectors::visible_trump_card(game).copied(),
        trump_hidden: selectors::trump_suit_hidden(game),
        trump_for_sale: selectors::trump_for_sale(game),
        trump_taker: game.trump_taker(),
        players,
        tricks,
        cards: selectors::card_accounting(game),
        pending: selectors::pending_decision(game),
    }
}
