//! What a single player can see at a decision point.
//!
//! This is the interface between the engine and AI policies: everything a
//! seat may legally know, plus helpers for the legal options. Other players'
//! hands and a face-down trump card are never exposed.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::player::PlayerId;
use crate::domain::selectors::{self, PendingDecision};
use crate::domain::state::{Game, Phase, PlayedCard};
use crate::domain::tricks::legal_moves;
use crate::errors::domain::DomainError;

/// A card played to the current trick, with its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisiblePlay {
    pub player_id: PlayerId,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub number_of_players: usize,
    pub phase: Phase,
    pub round_no: u32,
    pub pot: i64,
    pub bank: i64,
    pub is_dealer: bool,
    /// This player holds the trump card.
    pub is_trump_taker: bool,
    /// Unplayed cards in hand, in receipt order.
    pub hand: Vec<Card>,
    /// The trump card if face up or in this player's hand.
    pub trump_card: Option<Card>,
    pub led_suit: Option<Suit>,
    pub current_trick: Vec<VisiblePlay>,
    pub tricks_won: u8,
    /// Players still in the round (committed or undecided, not folded).
    pub players_not_folded: usize,
    pub pending: Option<PendingDecision>,
    legal_plays: Vec<Card>,
}

impl PlayerView {
    pub fn for_player(game: &Game, player_id: PlayerId) -> Result<Self, DomainError> {
        let round = game.round()?;
        let player = game.player(player_id)?;
        let hand: Vec<Card> = player
            .hand
            .iter()
            .filter_map(|&id| game.deck.get(id))
            .filter(|c| !c.flags.is_played)
            .copied()
            .collect();

        let trump_card = selectors::trump_card(game)
            .filter(|c| !round.hidden_trump_suit || player.holds(c.id))
            .copied();
        let turn = round.current_turn();
        let current_trick = turn
            .map(|t| visible_plays(game, &t.cards_played))
            .unwrap_or_default();
        let legal_plays = legal_moves(game, player_id)
            .into_iter()
            .filter_map(|id| game.deck.get(id).copied())
            .collect();

        Ok(Self {
            player_id,
            number_of_players: game.number_of_players,
            phase: round.state,
            round_no: round.round_number,
            pot: round.round_pot,
            bank: player.bank,
            is_dealer: player.is_dealer,
            is_trump_taker: player.has_taken_trump,
            hand,
            trump_card,
            led_suit: turn.and_then(|t| t.suit),
            current_trick,
            tricks_won: player.tricks,
            players_not_folded: game.players.iter().filter(|p| !p.has_folded).count(),
            pending: selectors::pending_decision(game),
            legal_plays,
        })
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        self.trump_card.map(|c| c.suit)
    }

    /// Cards this player may play to the current trick.
    pub fn legal_plays(&self) -> &[Card] {
        &self.legal_plays
    }

    /// Hand cards of the (visible) trump suit, the trump card itself included.
    pub fn trump_cards(&self) -> Vec<Card> {
        match self.trump_suit() {
            Some(suit) => self.hand.iter().filter(|c| c.suit == suit).copied().collect(),
            None => Vec::new(),
        }
    }

    /// Hand cards that may be marked for exchange.
    pub fn exchangeable(&self) -> Vec<Card> {
        self.hand.iter().filter(|c| !c.flags.is_trump).copied().collect()
    }

    pub fn is_leading(&self) -> bool {
        self.current_trick.is_empty()
    }
}

fn visible_plays(game: &Game, plays: &[PlayedCard]) -> Vec<VisiblePlay> {
    plays
        .iter()
        .filter_map(|p| {
            game.deck.get(p.card_id).map(|card| VisiblePlay {
                player_id: p.player_id,
                card: *card,
            })
        })
        .collect()
}
