// Property-based tests for trick winner resolution

use proptest::prelude::*;

use crate::domain::cards_types::{CardId, Suit};
use crate::domain::deck::Deck;
use crate::domain::state::PlayedCard;
use crate::domain::test_gens::{self, card_from_id, proptest_config};
use crate::domain::tricks::calculate_winner;

/// Highest trump if any was played, otherwise highest card of the led suit.
fn oracle_winner(plays: &[PlayedCard], lead: Suit, trump: Suit) -> CardId {
    let best_of = |suit: Suit| {
        plays
            .iter()
            .map(|p| card_from_id(p.card_id))
            .filter(|c| c.suit == suit)
            .max_by_key(|c| c.rank)
            .map(|c| c.id)
    };
    best_of(trump)
        .or_else(|| best_of(lead))
        .expect("the leading card is always of the led suit")
}

fn ordered_deck() -> Deck {
    Deck::stacked((0..40).collect()).unwrap()
}

proptest! {
    #![proptest_config(proptest_config())]

    /// The winner matches the oracle and is one of the plays.
    #[test]
    fn prop_winner_matches_oracle((plays, lead, trump) in test_gens::complete_trick()) {
        let deck = ordered_deck();
        let winner = calculate_winner(&plays, &deck, lead, trump);
        prop_assert!(winner.is_some(), "complete trick must have a winner");
        let winner = winner.unwrap();

        prop_assert_eq!(winner.card_id, oracle_winner(&plays, lead, trump),
            "lead={:?} trump={:?} plays={:?}", lead, trump, plays);
        prop_assert!(plays.contains(&winner));
    }

    /// Off-suit, non-trump cards never win.
    #[test]
    fn prop_discards_never_win((plays, lead, trump) in test_gens::complete_trick()) {
        let deck = ordered_deck();
        let winner = calculate_winner(&plays, &deck, lead, trump).unwrap();
        let suit = card_from_id(winner.card_id).suit;
        prop_assert!(suit == lead || suit == trump);
    }

    /// With the led suit fixed, the order the cards arrive in does not matter.
    #[test]
    fn prop_winner_independent_of_order(
        ((plays, lead, trump), rotation) in (test_gens::complete_trick(), 0usize..9)
    ) {
        let deck = ordered_deck();
        let expected = calculate_winner(&plays, &deck, lead, trump).unwrap().card_id;

        let mut rotated = plays.clone();
        let k = rotation % rotated.len();
        rotated.rotate_left(k);
        let got = calculate_winner(&rotated, &deck, lead, trump).unwrap().card_id;
        prop_assert_eq!(got, expected);

        let mut reversed = plays;
        reversed.reverse();
        let got = calculate_winner(&reversed, &deck, lead, trump).unwrap().card_id;
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn empty_trick_has_no_winner() {
    assert!(calculate_winner(&[], &ordered_deck(), Suit::Hearts, Suit::Spades).is_none());
}
