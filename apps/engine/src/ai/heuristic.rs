//! Heuristic: a deterministic, trump-counting baseline AI.
//!
//! Trump auction:
//! - Early (dealer, two cards): take with two or more trumps in hand.
//! - Auction (four cards): take with at least one trump.
//! - Flips the trump card face up; it cannot be seen before the flip.
//!
//! Fold/stay, by trumps held:
//! - none: stay only with two aces, or an ace and two kings.
//! - one: stay only if it is the ace, or the king backed by an ace.
//! - two: fold when the best is a jack or worse, or a queen over an 8 or worse.
//! - three or more: fold only when every trump is a 7 or worse.
//!
//! Exchange keeps trumps and aces and swaps more of the rest the fewer
//! trumps are held. Play leads a middling card and follows with the
//! strongest legal card.

use crate::ai::{AiError, AiPlayer};
use crate::domain::cards_types::{Card, CardId, Rank, Suit};
use crate::domain::player_view::PlayerView;

/// Rank value at or below which a non-trump card counts as weak.
const WEAK_VALUE: u8 = 12;

#[derive(Clone, Copy, Debug, Default)]
pub struct Heuristic;

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    /// Face value, with trumps above every other card.
    fn strength(card: &Card, trump: Option<Suit>) -> u16 {
        let base = u16::from(card.value());
        if Some(card.suit) == trump {
            base + 100
        } else {
            base
        }
    }

    fn count_rank(cards: &[Card], rank: Rank) -> usize {
        cards.iter().filter(|c| c.rank == rank).count()
    }

    fn should_stay(hand: &[Card], trump: Option<Suit>) -> bool {
        if hand.is_empty() {
            return false;
        }
        let trumps: Vec<&Card> = hand.iter().filter(|c| Some(c.suit) == trump).collect();
        let aces = Self::count_rank(hand, Rank::Ace);
        let kings = Self::count_rank(hand, Rank::King);
        let best = trumps.iter().map(|c| c.value()).max().unwrap_or(0);
        let worst = trumps.iter().map(|c| c.value()).min().unwrap_or(0);

        match trumps.len() {
            0 => aces >= 2 || (aces == 1 && kings >= 2),
            1 => best == Rank::Ace.value() || (best == Rank::King.value() && aces >= 1),
            2 => {
                let fold = best <= Rank::Jack.value()
                    || (best <= Rank::Queen.value() && worst <= Rank::Eight.value());
                !fold
            }
            _ => best > Rank::Seven.value(),
        }
    }

    fn exchange_choice(view: &PlayerView) -> Vec<CardId> {
        let trump = view.trump_suit();
        let trump_count = view.hand.iter().filter(|c| Some(c.suit) == trump).count();

        let mut others: Vec<Card> = view
            .exchangeable()
            .into_iter()
            .filter(|c| Some(c.suit) != trump && c.rank != Rank::Ace)
            .collect();
        others.sort_by_key(|c| (c.value(), c.id));

        let picked: Vec<Card> = match trump_count {
            0 => others,
            1 => others
                .into_iter()
                .filter(|c| !matches!(c.rank, Rank::King | Rank::Queen))
                .take(3)
                .collect(),
            2 => others
                .into_iter()
                .filter(|c| c.value() <= WEAK_VALUE)
                .take(2)
                .collect(),
            _ => others
                .into_iter()
                .filter(|c| c.value() <= WEAK_VALUE)
                .take(1)
                .collect(),
        };
        picked.into_iter().map(|c| c.id).collect()
    }
}

impl AiPlayer for Heuristic {
    fn choose_hide_trump(&self, _view: &PlayerView) -> Result<bool, AiError> {
        Ok(false)
    }

    fn choose_take_trump(&self, view: &PlayerView, early: bool) -> Result<bool, AiError> {
        let Some(trump) = view.trump_suit() else {
            return Ok(false);
        };
        let trumps = view.hand.iter().filter(|c| c.suit == trump).count();
        Ok(if early { trumps >= 2 } else { trumps >= 1 })
    }

    fn choose_stay(&self, view: &PlayerView) -> Result<bool, AiError> {
        Ok(Self::should_stay(&view.hand, view.trump_suit()))
    }

    fn choose_exchange(&self, view: &PlayerView) -> Result<Vec<CardId>, AiError> {
        Ok(Self::exchange_choice(view))
    }

    fn choose_discard(&self, view: &PlayerView) -> Result<Option<CardId>, AiError> {
        let trump = view.trump_suit();
        Ok(view
            .hand
            .iter()
            .min_by_key(|c| (Self::strength(c, trump), c.id))
            .map(|c| c.id))
    }

    fn choose_play(&self, view: &PlayerView) -> Result<Card, AiError> {
        let trump = view.trump_suit();
        let mut legal: Vec<Card> = view.legal_plays().to_vec();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }
        legal.sort_by_key(|c| (Self::strength(c, trump), c.id));

        let pick = if view.is_leading() {
            // Strongest first, then the middle of the pack.
            legal.reverse();
            legal.get(legal.len() / 2)
        } else {
            legal.last()
        };
        pick.copied()
            .ok_or_else(|| AiError::Internal("no card selected".into()))
    }
}
