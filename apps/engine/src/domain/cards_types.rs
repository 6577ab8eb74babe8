//! Core card-related types: Card, Rank, Suit, CardFlags

use std::fmt;

use serde::{Deserialize, Serialize};

pub type CardId = u8;

pub const DECK_SIZE: usize = 40;
pub const RANKS_PER_SUIT: usize = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// Deck construction order; `suit index * 10 + rank index` is the card id.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn index(self) -> usize {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Ranks present in the 40-card deck (no 2s, 3s or 4s).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; RANKS_PER_SUIT] = [
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn index(self) -> usize {
        self.value() as usize - 5
    }

    /// Comparison value: Five=5 ... Ten=10, Jack=11, Queen=12, King=13, Ace=14.
    pub const fn value(self) -> u8 {
        match self {
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

/// Mutable lifecycle flags of one physical card within a round.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CardFlags {
    pub is_dealt: bool,
    pub is_discarded: bool,
    pub is_played: bool,
    /// Marked for exchange.
    pub is_selected: bool,
    /// This card was flipped as the trump indicator.
    pub is_trump: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    #[serde(flatten)]
    pub flags: CardFlags,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            id: card_id(suit, rank),
            suit,
            rank,
            flags: CardFlags::default(),
        }
    }

    pub const fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Undealt, undiscarded and unplayed.
    pub const fn is_fresh(&self) -> bool {
        !self.flags.is_dealt && !self.flags.is_discarded && !self.flags.is_played
    }

    /// Fresh and not sitting on the table as the trump indicator.
    pub const fn is_drawable(&self) -> bool {
        self.is_fresh() && !self.flags.is_trump
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.name(), self.suit.symbol())
    }
}

pub const fn card_id(suit: Suit, rank: Rank) -> CardId {
    (suit.index() * RANKS_PER_SUIT + rank.index()) as CardId
}

/// Inverse of [`card_id`]; `None` outside `0..40`.
pub fn suit_rank_of(id: CardId) -> Option<(Suit, Rank)> {
    let idx = id as usize;
    if idx >= DECK_SIZE {
        return None;
    }
    Some((Suit::ALL[idx / RANKS_PER_SUIT], Rank::ALL[idx % RANKS_PER_SUIT]))
}
