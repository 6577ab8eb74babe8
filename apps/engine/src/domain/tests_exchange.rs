use crate::domain::cards_types::{CardId, Rank, Suit};
use crate::domain::dealing::deal_cards;
use crate::domain::exchange::{discard_card, exchange_cards, toggle_select_card};
use crate::domain::invariants::check_invariants;
use crate::domain::fold_or_stay::{player_folds, player_is_in, FoldOutcome};
use crate::domain::selectors::{
    card_accounting, is_card_selectable, who_can_exchange, who_can_fold_or_stay,
};
use crate::domain::state::{Game, Phase};
use crate::domain::test_state_helpers::{
    anted_game, auction_to, c, everyone_exchanges, everyone_stays, game_with_hands,
};
use crate::domain::trump::set_trump_suit;
use crate::errors::ValidationKind;

fn three_hands() -> [[CardId; 4]; 3] {
    [
        [
            c(Suit::Hearts, Rank::Five),
            c(Suit::Hearts, Rank::Six),
            c(Suit::Hearts, Rank::Seven),
            c(Suit::Hearts, Rank::Eight),
        ],
        [
            c(Suit::Diamonds, Rank::Five),
            c(Suit::Diamonds, Rank::Six),
            c(Suit::Diamonds, Rank::Seven),
            c(Suit::Diamonds, Rank::Eight),
        ],
        [
            c(Suit::Clubs, Rank::Five),
            c(Suit::Clubs, Rank::Six),
            c(Suit::Clubs, Rank::Seven),
            c(Suit::Clubs, Rank::Eight),
        ],
    ]
}

/// Dealer 0, player 1 holds trump, nobody has decided yet.
fn after_auction() -> Game {
    let mut game = game_with_hands(0, &three_hands(), c(Suit::Spades, Rank::Five));
    auction_to(&mut game, 1);
    game
}

#[test]
fn fold_or_stay_runs_from_the_taker() {
    let mut game = after_auction();
    assert_eq!(who_can_fold_or_stay(&game), Some(2));

    let err = player_is_in(&mut game, 0).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::OutOfTurn));
    let err = player_folds(&mut game, 1).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::CannotFold));

    player_is_in(&mut game, 2).unwrap();
    let err = player_is_in(&mut game, 2).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::AlreadyDecided));
    assert_eq!(who_can_fold_or_stay(&game), Some(0));
}

#[test]
fn folding_discards_the_hand() {
    let mut game = after_auction();
    let hand = game.players[2].hand.clone();
    assert_eq!(player_folds(&mut game, 2).unwrap(), FoldOutcome::Folded);

    let p = &game.players[2];
    assert!(p.has_folded && !p.is_in && p.hand.is_empty());
    for id in hand {
        assert!(game.deck.get(id).unwrap().flags.is_discarded);
    }
    assert_eq!(card_accounting(&game).discarded, 4);
    assert_eq!(card_accounting(&game).total(), 40);
}

#[test]
fn last_player_standing_ends_the_game() {
    let mut game = after_auction();
    player_folds(&mut game, 2).unwrap();
    assert_eq!(
        player_folds(&mut game, 0).unwrap(),
        FoldOutcome::LastStanding { winner: 1 }
    );
    assert_eq!(game.phase(), Some(Phase::GameOver));
    assert_eq!(game.players[1].tricks, 4);
}

#[test]
fn exchange_waits_for_every_decision_and_the_taker() {
    let mut game = after_auction();
    assert_eq!(who_can_exchange(&game), None);
    let err = exchange_cards(&mut game, 1).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::OutOfTurn));

    everyone_stays(&mut game);
    assert_eq!(who_can_exchange(&game), Some(1));
    let err = exchange_cards(&mut game, 2).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::OutOfTurn));

    exchange_cards(&mut game, 1).unwrap();
    assert_eq!(who_can_exchange(&game), Some(2));
    exchange_cards(&mut game, 2).unwrap();
    assert_eq!(who_can_exchange(&game), Some(0));
}

#[test]
fn selected_cards_are_swapped_for_fresh_ones() {
    let mut game = after_auction();
    everyone_stays(&mut game);

    let old = c(Suit::Diamonds, Rank::Five);
    let trump = c(Suit::Spades, Rank::Five);
    assert!(is_card_selectable(&game, old));
    assert!(!is_card_selectable(&game, trump));
    let err = toggle_select_card(&mut game, trump).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::CardNotSelectable));

    assert!(toggle_select_card(&mut game, old).unwrap());
    let result = exchange_cards(&mut game, 1).unwrap();
    assert_eq!(result.replaced.len(), 1);
    let (discarded, drawn) = result.replaced[0];
    assert_eq!(discarded, old);

    let taker = &game.players[1];
    assert_eq!(taker.hand.len(), 5);
    assert_eq!(taker.hand[0], drawn, "replacement takes the same slot");
    assert!(taker.holds(trump));
    let old_card = game.deck.get(old).unwrap();
    assert!(old_card.flags.is_discarded && !old_card.flags.is_selected);
    assert!(game.deck.get(drawn).unwrap().flags.is_dealt);
    assert_eq!(card_accounting(&game).total(), 40);

    let err = toggle_select_card(&mut game, c(Suit::Diamonds, Rank::Six)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::AlreadyDecided));
}

#[test]
fn last_exchange_starts_showdown_led_by_taker() {
    let mut game = after_auction();
    everyone_stays(&mut game);
    everyone_exchanges(&mut game);
    let round = game.round().unwrap();
    assert_eq!(round.state, Phase::Showdown);
    assert!(!round.hidden_trump_suit);
    assert_eq!(round.turns.len(), 1);
    assert_eq!(round.turns[0].next_player_id, Some(1));
}

#[test]
fn folded_players_are_skipped_in_the_exchange() {
    let mut game = after_auction();
    player_folds(&mut game, 2).unwrap();
    player_is_in(&mut game, 0).unwrap();
    exchange_cards(&mut game, 1).unwrap();
    assert_eq!(who_can_exchange(&game), Some(0));
    let err = exchange_cards(&mut game, 2).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::PlayerFolded));
    exchange_cards(&mut game, 0).unwrap();
    assert_eq!(game.phase(), Some(Phase::Showdown));
}

#[test]
fn taker_may_discard_back_to_four_before_playing() {
    let mut game = after_auction();
    everyone_stays(&mut game);

    let spare = c(Suit::Diamonds, Rank::Eight);
    let err = discard_card(&mut game, spare).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::OutOfTurn));

    everyone_exchanges(&mut game);
    let err = discard_card(&mut game, c(Suit::Clubs, Rank::Five)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::CardNotSelectable));

    assert_eq!(discard_card(&mut game, spare).unwrap(), 1);
    assert_eq!(game.players[1].hand.len(), 4);
    assert!(game.deck.get(spare).unwrap().flags.is_discarded);
    let err = discard_card(&mut game, c(Suit::Diamonds, Rank::Seven)).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::CardNotSelectable));
    assert_eq!(card_accounting(&game).total(), 40);
}

/// Select every non-trump card in the player's hand.
fn select_all(game: &mut Game, player_id: u8) -> Vec<CardId> {
    let picks: Vec<CardId> = game.players[player_id as usize]
        .hand
        .iter()
        .copied()
        .filter(|&id| !game.deck.get(id).unwrap().flags.is_trump)
        .collect();
    for &id in &picks {
        assert!(toggle_select_card(game, id).unwrap());
    }
    picks
}

#[test]
fn exchange_keeps_selected_cards_once_the_deck_runs_dry() {
    let mut game = anted_game(9, 0, 31);
    deal_cards(&mut game).unwrap();
    set_trump_suit(&mut game, false).unwrap();
    deal_cards(&mut game).unwrap();
    // 36 dealt plus the trump indicator leaves three to draw.
    assert_eq!(game.deck.drawable_count(), 3);
    auction_to(&mut game, 1);
    everyone_stays(&mut game);

    let picks = select_all(&mut game, 1);
    assert_eq!(picks.len(), 4);
    let result = exchange_cards(&mut game, 1).unwrap();
    assert_eq!(result.replaced.len(), 3);
    assert_eq!(result.kept, vec![picks[3]]);
    let taker_kept = result.kept;
    assert_eq!(game.deck.drawable_count(), 0);

    let picks = select_all(&mut game, 2);
    let result = exchange_cards(&mut game, 2).unwrap();
    assert!(result.replaced.is_empty());
    assert_eq!(result.kept, picks);

    for (player_id, kept) in [(1u8, taker_kept), (2, picks)] {
        let player = &game.players[player_id as usize];
        for id in kept {
            assert!(player.holds(id), "player {player_id} lost card {id}");
            let card = game.deck.get(id).unwrap();
            assert!(!card.flags.is_selected && !card.flags.is_discarded);
        }
    }
    assert_eq!(game.players[1].hand.len(), 5);
    assert_eq!(game.players[2].hand.len(), 4);

    let acc = card_accounting(&game);
    assert_eq!(acc.total(), 40);
    assert_eq!(acc.stray, 0);
    assert_eq!(acc.discarded, 3);
    assert!(check_invariants(&game).is_ok());
}
