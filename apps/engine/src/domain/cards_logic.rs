//! Card game logic: checking suits in hands, comparing card strength

use super::cards_types::{Card, Suit};

/// True when any unplayed card in `hand` is of `suit`.
pub fn hand_has_suit<'a>(hand: impl IntoIterator<Item = &'a Card>, suit: Suit) -> bool {
    hand.into_iter()
        .any(|c| c.suit == suit && !c.flags.is_played)
}

/// Whether `a` beats `b` in a trick led with `lead` when `trump` is the trump suit.
///
/// Trump beats everything else, then the led suit beats off-suit cards;
/// within the same class the higher rank wins. Two off-suit cards never beat
/// each other, so the one already holding the trick keeps it.
pub fn card_beats(a: &Card, b: &Card, lead: Suit, trump: Suit) -> bool {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    if a_trump && !b_trump {
        return true;
    }
    if b_trump && !a_trump {
        return false;
    }
    if a_trump && b_trump {
        return a.rank > b.rank;
    }
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows && !b_follows {
        return true;
    }
    if b_follows && !a_follows {
        return false;
    }
    if a_follows && b_follows {
        return a.rank > b.rank;
    }
    false
}
