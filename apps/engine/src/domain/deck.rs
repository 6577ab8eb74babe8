//! The 40-card deck: an arena of cards indexed by id plus a shuffled draw order.
//!
//! Cards never move between containers. Ownership is expressed through the
//! lifecycle flags on each card and the card ids listed in player hands.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::cards_types::{Card, CardId, Rank, Suit, DECK_SIZE};

/// Build the 40 fresh cards in id order (suit major, rank minor).
pub fn create_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// Unbiased Fisher-Yates permutation of `ids`, driven by a seeded ChaCha stream.
pub fn shuffle(ids: &mut [CardId], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ids.shuffle(&mut rng);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Indexed by card id.
    cards: Vec<Card>,
    /// Shuffled order in which fresh cards are drawn.
    order: Vec<CardId>,
}

impl Deck {
    /// A fresh deck shuffled with `seed`.
    pub fn shuffled(seed: u64) -> Self {
        let cards = create_deck();
        let mut order: Vec<CardId> = cards.iter().map(|c| c.id).collect();
        shuffle(&mut order, seed);
        Self { cards, order }
    }

    /// A fresh deck whose draw order is the given permutation.
    ///
    /// Returns `None` unless `order` lists every card id exactly once.
    pub fn stacked(order: Vec<CardId>) -> Option<Self> {
        let mut seen = [false; DECK_SIZE];
        for &id in &order {
            let slot = seen.get_mut(id as usize)?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        if order.len() != DECK_SIZE {
            return None;
        }
        Some(Self {
            cards: create_deck(),
            order,
        })
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id as usize)
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id as usize)
    }

    /// Cards in id order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards in draw order.
    pub fn in_draw_order(&self) -> impl Iterator<Item = &Card> + '_ {
        self.order.iter().filter_map(move |&id| self.get(id))
    }

    pub fn draw_order(&self) -> &[CardId] {
        &self.order
    }

    /// The next card a draw would take, without taking it.
    pub fn peek_drawable(&self) -> Option<CardId> {
        self.in_draw_order().find(|c| c.is_drawable()).map(|c| c.id)
    }

    /// Take the next drawable card, flagging it dealt.
    pub(crate) fn draw(&mut self) -> Option<CardId> {
        let id = self.peek_drawable()?;
        if let Some(card) = self.get_mut(id) {
            card.flags.is_dealt = true;
        }
        Some(id)
    }

    pub fn drawable_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_drawable()).count()
    }

    pub fn fresh_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_fresh()).count()
    }

    pub fn trump_indicator(&self) -> Option<&Card> {
        self.cards.iter().find(|c| c.flags.is_trump)
    }
}
