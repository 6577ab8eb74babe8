// Property-based tests: cards and currency are never created or lost

use proptest::prelude::*;

use crate::ai::step;
use crate::domain::cards_types::DECK_SIZE;
use crate::domain::invariants::check_invariants;
use crate::domain::selectors::{card_accounting, total_currency};
use crate::domain::state::Game;
use crate::domain::test_gens::{self, proptest_config};
use crate::domain::test_state_helpers::random_table;

const MAX_STEPS: usize = 250;

/// Drive random seats for `MAX_STEPS` decisions. Every driven action must be accepted.
fn drive(
    n: usize,
    seed: u64,
    mut each: impl FnMut(&Game) -> Result<(), TestCaseError>,
) -> Result<Game, TestCaseError> {
    let (mut game, seats) = random_table(n, seed);
    each(&game)?;
    for _ in 0..MAX_STEPS {
        if let Err(e) = step(&mut game, &seats) {
            prop_assert!(false, "driven action failed at {:?}: {}", game.phase(), e);
        }
        each(&game)?;
    }
    Ok(game)
}

proptest! {
    #![proptest_config(proptest_config())]

    /// All 40 cards are accounted for after every step.
    #[test]
    fn prop_cards_conserved((n, seed) in test_gens::table()) {
        drive(n, seed, |game| {
            let acc = card_accounting(game);
            prop_assert_eq!(acc.total(), DECK_SIZE);
            prop_assert_eq!(acc.stray, 0, "{:?}", acc);
            prop_assert!(check_invariants(game).is_ok());
            Ok(())
        })?;
    }

    /// Banks plus the pot never change.
    #[test]
    fn prop_currency_conserved((n, seed) in test_gens::table()) {
        let mut expected = None;
        drive(n, seed, |game| {
            let total = total_currency(game);
            let expected = *expected.get_or_insert(total);
            prop_assert_eq!(total, expected);
            Ok(())
        })?;
    }

    /// Same seed, same seats: same game.
    #[test]
    fn prop_seeded_games_replay_identically((n, seed) in test_gens::table()) {
        let first = drive(n, seed, |_| Ok(()))?;
        let second = drive(n, seed, |_| Ok(()))?;
        prop_assert_eq!(first, second);
    }
}
