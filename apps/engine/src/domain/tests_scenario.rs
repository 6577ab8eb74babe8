//! The five-player walk from initialisation to the first completed trick.

use crate::config::RulesConfig;
use crate::domain::action::{apply, Action, ActionEffect};
use crate::domain::cards_types::DECK_SIZE;
use crate::domain::selectors::{
    card_accounting, playable_cards, total_currency, who_can_exchange, who_can_fold_or_stay,
    who_can_take_trump,
};
use crate::domain::state::{Game, Phase};

fn act(game: &mut Game, action: Action) -> ActionEffect {
    apply(game, &action)
        .unwrap_or_else(|e| panic!("{} rejected: {e}", action.name()))
        .effect
}

#[test]
fn five_player_round_to_first_trick() {
    let mut game = Game::with_seed(2024);
    act(&mut game, Action::InitializeGame { number_of_players: 5 });

    assert_eq!(game.deck.fresh_count(), DECK_SIZE);
    assert_eq!(game.players.len(), 5);
    assert!(game.players.iter().all(|p| p.bank == 200));
    assert_eq!(game.phase(), Some(Phase::Initial));

    act(&mut game, Action::SetDealer { player_id: 1 });
    for player_id in [2, 3, 4, 0] {
        act(&mut game, Action::AddWager { player_id, amount: 1 });
    }
    assert_eq!(game.round().unwrap().round_pot, 4);

    assert_eq!(act(&mut game, Action::DealCards), ActionEffect::Dealt(Phase::TwoCards));
    assert!(game.players.iter().all(|p| p.hand.len() == 2));
    assert_eq!(game.deck.fresh_count(), 30);

    act(&mut game, Action::SetTrumpSuit { hidden: false });
    assert_eq!(act(&mut game, Action::DealCards), ActionEffect::Dealt(Phase::FourCards));
    assert!(game.players.iter().all(|p| p.hand.len() == 4));
    assert_eq!(game.deck.cards().iter().filter(|c| c.flags.is_trump).count(), 1);

    // The dealer passed on the early take, so the auction opens at seat 2.
    assert_eq!(who_can_take_trump(&game), Some(2));
    act(&mut game, Action::TakeTrump { player_id: 2 });
    let taker = &game.players[2];
    assert!(taker.has_taken_trump);
    assert_eq!(taker.hand.len(), 5);

    while let Some(player_id) = who_can_fold_or_stay(&game) {
        act(&mut game, Action::PlayerIsIn { player_id });
    }
    while let Some(player_id) = who_can_exchange(&game) {
        act(&mut game, Action::ExchangeCards { player_id });
    }
    let round = game.round().unwrap();
    assert_eq!(round.state, Phase::Showdown);
    assert_eq!(round.turns.len(), 1);
    assert_eq!(round.turns[0].next_player_id, Some(2));

    for _ in 0..5 {
        let next = game.round().unwrap().turns[0].next_player_id.unwrap();
        let card_id = playable_cards(&game, next)[0];
        act(&mut game, Action::PlayCard { player_id: next, card_id });
    }
    let turn = &game.round().unwrap().turns[0];
    assert_eq!(turn.cards_played.len(), 5);
    let winner = turn.winner_id.expect("trick resolved");
    assert_eq!(game.players[winner as usize].tricks, 1);

    assert_eq!(card_accounting(&game).total(), DECK_SIZE);
    assert_eq!(total_currency(&game), 5 * 200);
}

#[test]
fn same_seed_same_actions_same_game() {
    let script = [
        Action::InitializeGame { number_of_players: 3 },
        Action::SetDealer { player_id: 0 },
        Action::AddWager { player_id: 1, amount: 2 },
        Action::AddWager { player_id: 2, amount: 2 },
        Action::DealCards,
        Action::SetTrumpSuit { hidden: true },
        Action::DealCards,
    ];
    let run = |seed| {
        let mut game = Game::with_seed(seed);
        for a in &script {
            apply(&mut game, a).unwrap();
        }
        game
    };
    assert_eq!(run(99), run(99));
    assert_ne!(run(99).deck, run(100).deck);
}

#[test]
fn rejected_deal_leaves_state_untouched() {
    let mut game = Game::with_seed(5);
    act(&mut game, Action::InitializeGame { number_of_players: 4 });
    act(&mut game, Action::SetDealer { player_id: 0 });
    act(&mut game, Action::AddWager { player_id: 1, amount: 1 });

    let before = game.clone();
    let err = apply(&mut game, &Action::DealCards).unwrap_err();
    assert_eq!(err.kind(), Some(crate::errors::ValidationKind::SmallBlindsMissing));
    assert_eq!(game, before);
}

#[test]
fn initialize_rejects_rules_with_short_rounds() {
    let rules = RulesConfig {
        tricks_per_round: 3,
        ..RulesConfig::default()
    };
    let mut game = Game::with_config(rules, 5);
    let err = apply(&mut game, &Action::InitializeGame { number_of_players: 4 }).unwrap_err();
    assert_eq!(err.kind(), Some(crate::errors::ValidationKind::InvalidConfig));
    assert!(!game.initialized);
}
