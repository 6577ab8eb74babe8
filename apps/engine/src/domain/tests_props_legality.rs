// Property-based tests for follow-suit legality over whole random games

use proptest::prelude::*;

use crate::ai::step;
use crate::domain::cards_types::CardId;
use crate::domain::selectors::{is_card_playable, pending_decision, playable_cards, PendingDecision};
use crate::domain::state::{Game, Phase};
use crate::domain::test_gens::{self, proptest_config};
use crate::domain::test_state_helpers::random_table;
use crate::domain::tricks::legal_moves;

const MAX_STEPS: usize = 300;

/// Check every rule about what the player to act may play.
fn check_play_rules(game: &Game, player_id: u8) -> Result<(), TestCaseError> {
    let legal = legal_moves(game, player_id);
    prop_assert!(!legal.is_empty(), "player {} to play with no legal card", player_id);
    prop_assert_eq!(playable_cards(game, player_id), legal.clone());

    let player = game.player(player_id).unwrap();
    let unplayed: Vec<CardId> = player
        .hand
        .iter()
        .copied()
        .filter(|&id| !game.card(id).unwrap().flags.is_played)
        .collect();
    for &id in &unplayed {
        prop_assert_eq!(is_card_playable(game, id), legal.contains(&id), "card {}", id);
    }

    let led = game.round().unwrap().current_turn().and_then(|t| t.suit);
    if let Some(led) = led {
        let holds_led = unplayed.iter().any(|&id| game.card(id).unwrap().suit == led);
        if holds_led {
            for &id in &legal {
                prop_assert_eq!(game.card(id).unwrap().suit, led,
                    "player {} holds {:?} but may play {}", player_id, led, id);
            }
        } else {
            prop_assert_eq!(legal.len(), unplayed.len());
        }
    } else {
        prop_assert_eq!(legal.len(), unplayed.len(), "the leader may play anything");
    }
    Ok(())
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Random seats play whole rounds; at every play the legal set follows suit.
    #[test]
    fn prop_follow_suit_throughout_play((n, seed) in test_gens::table()) {
        let (mut game, seats) = random_table(n, seed);
        for _ in 0..MAX_STEPS {
            if let Some(PendingDecision::Play { player_id }) = pending_decision(&game) {
                prop_assert_eq!(game.phase(), Some(Phase::Showdown));
                check_play_rules(&game, player_id)?;
            }
            if let Err(e) = step(&mut game, &seats) {
                prop_assert!(false, "driven action failed at {:?}: {}", game.phase(), e);
            }
        }
    }
}
