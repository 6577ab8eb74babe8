use crate::ai::next_actions;
use crate::domain::action::{apply, Action};
use crate::domain::cards_types::{CardId, Rank, Suit};
use crate::domain::dealing::deal_cards;
use crate::domain::selectors::{pending_decision, total_currency, PendingDecision};
use crate::domain::settlement::{end_round, settle_player};
use crate::domain::state::{Game, Phase};
use crate::domain::test_state_helpers::{c, showdown_with_hands_and_ante};
use crate::domain::tricks::play_card;
use crate::errors::ValidationKind;

/// Two players, dealer 0, player 1 takes spades; `plays` are (player, card)
/// in table order. Player 1 posted `ante`, which is the whole pot.
fn finished(hands: [[CardId; 4]; 2], plays: &[(u8, CardId)], ante: i64) -> Game {
    let mut game = showdown_with_hands_and_ante(0, &hands, c(Suit::Spades, Rank::Five), 1, ante);
    for &(player, card) in plays {
        play_card(&mut game, player, card).unwrap();
    }
    game
}

fn sweep(ante: i64) -> Game {
    let low_hearts = [
        c(Suit::Hearts, Rank::Five),
        c(Suit::Hearts, Rank::Six),
        c(Suit::Hearts, Rank::Seven),
        c(Suit::Hearts, Rank::Eight),
    ];
    let high_spades = [
        c(Suit::Spades, Rank::Ace),
        c(Suit::Spades, Rank::King),
        c(Suit::Spades, Rank::Queen),
        c(Suit::Spades, Rank::Jack),
    ];
    let plays: Vec<(u8, CardId)> = (0..4)
        .flat_map(|i| [(1, high_spades[i]), (0, low_hearts[i])])
        .collect();
    finished([low_hearts, high_spades], &plays, ante)
}

fn split(ante: i64) -> Game {
    let hands = [
        [
            c(Suit::Hearts, Rank::Ace),
            c(Suit::Hearts, Rank::King),
            c(Suit::Diamonds, Rank::Five),
            c(Suit::Diamonds, Rank::Six),
        ],
        [
            c(Suit::Spades, Rank::Ace),
            c(Suit::Spades, Rank::King),
            c(Suit::Hearts, Rank::Five),
            c(Suit::Hearts, Rank::Six),
        ],
    ];
    let plays = [
        (1, c(Suit::Spades, Rank::Ace)),
        (0, c(Suit::Diamonds, Rank::Five)),
        (1, c(Suit::Spades, Rank::King)),
        (0, c(Suit::Diamonds, Rank::Six)),
        (1, c(Suit::Hearts, Rank::Five)),
        (0, c(Suit::Hearts, Rank::Ace)),
        (0, c(Suit::Hearts, Rank::King)),
        (1, c(Suit::Hearts, Rank::Six)),
    ];
    finished(hands, &plays, ante)
}

#[test]
fn settle_player_shares_and_penalties() {
    // Taker short of two tricks pays the shortfall times the pot.
    assert_eq!(settle_player(0, true, 10, 4), (0, 20));
    assert_eq!(settle_player(1, true, 10, 4), (2, 10));
    assert_eq!(settle_player(2, true, 10, 4), (4, 0));
    // Others pay the pot only when they made nothing.
    assert_eq!(settle_player(0, false, 10, 4), (0, 10));
    assert_eq!(settle_player(3, false, 10, 4), (6, 0));
}

#[test]
fn end_round_only_after_the_round_finishes() {
    let mut game = showdown_with_hands_and_ante(
        0,
        &[
            [0, 1, 2, 3],
            [
                c(Suit::Spades, Rank::Ace),
                c(Suit::Spades, Rank::King),
                c(Suit::Spades, Rank::Queen),
                c(Suit::Spades, Rank::Jack),
            ],
        ],
        c(Suit::Spades, Rank::Five),
        1,
        1,
    );
    let err = end_round(&mut game).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::PhaseMismatch));
}

#[test]
fn round_over_carries_penalties_into_the_next_round() {
    let mut game = sweep(8);
    assert_eq!(game.phase(), Some(Phase::RoundOver));
    let total = total_currency(&game);

    let report = end_round(&mut game).unwrap();
    assert_eq!(report.pot, 8);
    assert_eq!(report.carry, 8, "player 0's penalty");
    assert!(!report.game_over);
    assert_eq!(report.next_dealer, 1);

    assert_eq!(game.players[1].bank, 200);
    assert_eq!(game.players[0].bank, 192);
    assert_eq!(total_currency(&game), total);

    let round = game.round().unwrap();
    assert_eq!(round.round_number, 1);
    assert_eq!(round.round_pot, 8);
    assert_eq!(round.state, Phase::Initial);
    assert_eq!(game.dealer(), Some(1));
    assert_eq!(game.deck.fresh_count(), 40);
    for p in &game.players {
        assert!(p.hand.is_empty() && p.tricks == 0 && !p.is_in && !p.has_taken_trump);
    }
    // Only the first round of a game needs antes.
    assert_eq!(pending_decision(&game), Some(PendingDecision::Deal));
    assert_eq!(deal_cards(&mut game).unwrap(), Phase::TwoCards);
}

#[test]
fn game_over_restarts_at_round_zero() {
    let mut game = split(8);
    assert_eq!(game.phase(), Some(Phase::GameOver));
    let total = total_currency(&game);

    let report = end_round(&mut game).unwrap();
    assert!(report.game_over);
    assert_eq!(report.carry, 0);
    assert_eq!(game.players[0].bank, 204);
    assert_eq!(game.players[1].bank, 196);
    assert_eq!(total_currency(&game), total);

    assert_eq!(game.rounds.len(), 1);
    assert_eq!(game.round().unwrap().round_number, 0);
    assert_eq!(game.games_completed, 1);
    assert_eq!(game.dealer(), Some(1));
    assert_eq!(
        pending_decision(&game),
        Some(PendingDecision::PostAnte { player_id: 0 })
    );
    let err = deal_cards(&mut game).unwrap_err();
    assert_eq!(err.kind(), Some(ValidationKind::SmallBlindsMissing));
}

#[test]
fn odd_pot_remainder_is_carried() {
    let mut game = split(7);
    let report = end_round(&mut game).unwrap();
    // 7 / 4 = 1 per trick, 4 paid out, 3 carried.
    assert_eq!(report.carry, 3);
    assert_eq!(game.round().unwrap().round_pot, 3);
    assert_eq!(total_currency(&game), 400);
}

#[test]
fn indebted_seat_still_antes_after_game_over() {
    let mut game = split(8);
    end_round(&mut game).unwrap();
    game.players[0].bank = -10;
    let total = total_currency(&game);

    assert_eq!(
        pending_decision(&game),
        Some(PendingDecision::PostAnte { player_id: 0 })
    );
    let actions = next_actions(&game, &[]).unwrap();
    assert_eq!(actions, vec![Action::AddWager { player_id: 0, amount: 1 }]);
    apply(&mut game, &actions[0]).unwrap();

    assert_eq!(game.players[0].bank, -11);
    assert_eq!(game.round().unwrap().round_pot, 1);
    assert_eq!(total_currency(&game), total);
    assert_eq!(pending_decision(&game), Some(PendingDecision::Deal));
    assert_eq!(deal_cards(&mut game).unwrap(), Phase::TwoCards);
}
