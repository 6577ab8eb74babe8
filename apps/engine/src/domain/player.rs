//! Per-player state. Mutated only through the round/turn actions.

use serde::{Deserialize, Serialize};

use super::cards_types::CardId;

pub type PlayerId = u8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub bank: i64,
    /// Card ids dealt to this player this round, in receipt order.
    /// Played cards stay listed (flagged `is_played` on the card).
    pub hand: Vec<CardId>,
    /// Tricks won this round.
    pub tricks: u8,
    pub is_dealer: bool,
    /// Posted the ante for this round.
    pub is_small_blind: bool,
    /// Committed to play the round.
    pub is_in: bool,
    pub has_folded: bool,
    pub has_exchanged_cards: bool,
    pub has_taken_trump: bool,
    pub has_taken_trump_early: bool,
    pub has_refused_trump: bool,
    pub has_refused_trump_early: bool,
}

impl Player {
    pub fn new(id: PlayerId, bank: i64) -> Self {
        Self {
            id,
            name: format!("Player {id}"),
            bank,
            hand: Vec::new(),
            tricks: 0,
            is_dealer: false,
            is_small_blind: false,
            is_in: false,
            has_folded: false,
            has_exchanged_cards: false,
            has_taken_trump: false,
            has_taken_trump_early: false,
            has_refused_trump: false,
            has_refused_trump_early: false,
        }
    }

    /// Still playing this round: committed and not folded.
    pub fn is_in_round(&self) -> bool {
        self.is_in && !self.has_folded
    }

    /// Has either committed or folded.
    pub fn has_resolved_fold_or_stay(&self) -> bool {
        self.is_in || self.has_folded
    }

    pub fn holds(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Clear everything scoped to one round. Bank, name and dealer seat survive.
    pub fn reset_for_round(&mut self) {
        self.is_small_blind = false;
        self.clear_decisions();
    }

    /// Clear the hand, tricks and every auction, fold and exchange decision,
    /// keeping the posted ante.
    pub(crate) fn clear_decisions(&mut self) {
        self.hand.clear();
        self.tricks = 0;
        self.is_in = false;
        self.has_folded = false;
        self.has_exchanged_cards = false;
        self.has_taken_trump = false;
        self.has_taken_trump_early = false;
        self.has_refused_trump = false;
        self.has_refused_trump_early = false;
    }

    pub(crate) fn take_trump_card(&mut self, trump: CardId, early: bool) {
        self.hand.push(trump);
        self.has_taken_trump = true;
        self.has_taken_trump_early = early;
        self.is_in = true;
        self.has_folded = false;
    }
}

/// Seat arithmetic for `n` seats; clockwise is positive.
#[inline]
pub fn seat_offset(seat: PlayerId, delta: i16, n: usize) -> PlayerId {
    debug_assert!(n > 0, "seat arithmetic needs at least one seat");
    (seat as i16 + delta).rem_euclid(n as i16) as PlayerId
}

/// The next seat clockwise.
#[inline]
pub fn next_seat(seat: PlayerId, n: usize) -> PlayerId {
    seat_offset(seat, 1, n)
}

/// Seats clockwise starting at `start` (inclusive), each exactly once.
pub fn seats_from(start: PlayerId, n: usize) -> impl Iterator<Item = PlayerId> {
    (0..n as i16).map(move |i| seat_offset(start, i, n))
}
