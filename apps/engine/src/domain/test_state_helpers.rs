//! Test-only builders that walk a game to a given phase.

use crate::ai::{RandomPlayer, Seat};
use crate::domain::cards_types::{card_id, CardId, Rank, Suit, DECK_SIZE};
use crate::domain::dealing::{add_wager, deal_cards, initialize_game, set_dealer};
use crate::domain::deck::Deck;
use crate::domain::exchange::exchange_cards;
use crate::domain::fold_or_stay::player_is_in;
use crate::domain::player::{next_seat, seats_from, PlayerId};
use crate::domain::seed_derivation::derive_ai_seed;
use crate::domain::selectors::{who_can_exchange, who_can_fold_or_stay, who_can_take_trump};
use crate::domain::state::{Game, Phase};
use crate::domain::trump::{refuse_trump, set_trump_suit, take_trump};

/// Initialised game with `dealer` set and every ante of 1 posted.
pub fn anted_game(n: usize, dealer: PlayerId, seed: u64) -> Game {
    anted_game_with(n, dealer, seed, 1)
}

pub fn anted_game_with(n: usize, dealer: PlayerId, seed: u64, ante: i64) -> Game {
    let mut game = Game::with_seed(seed);
    initialize_game(&mut game, n).unwrap();
    set_dealer(&mut game, dealer).unwrap();
    for id in seats_from(next_seat(dealer, n), n).filter(|&id| id != dealer) {
        add_wager(&mut game, id, ante).unwrap();
    }
    game
}

/// Draw order that deals `hands[seat]` to each seat (card `i` of the hand
/// is the `i`th received) and flips `trump`. Unused cards follow by id.
pub fn stack_order(n: usize, dealer: PlayerId, hands: &[[CardId; 4]], trump: CardId) -> Vec<CardId> {
    let seats: Vec<PlayerId> = seats_from(next_seat(dealer, n), n).collect();
    let mut order = Vec::with_capacity(DECK_SIZE);
    for deal in 0..2 {
        for pass in 0..2 {
            for &s in &seats {
                order.push(hands[s as usize][deal * 2 + pass]);
            }
        }
        if deal == 0 {
            order.push(trump);
        }
    }
    for id in 0..DECK_SIZE as CardId {
        if !order.contains(&id) {
            order.push(id);
        }
    }
    order
}

/// Game in `4Cards` with exactly the given hands and trump card, face up.
pub fn game_with_hands(dealer: PlayerId, hands: &[[CardId; 4]], trump: CardId) -> Game {
    game_with_hands_and_ante(dealer, hands, trump, 1)
}

pub fn game_with_hands_and_ante(
    dealer: PlayerId,
    hands: &[[CardId; 4]],
    trump: CardId,
    ante: i64,
) -> Game {
    let n = hands.len();
    let mut game = anted_game_with(n, dealer, 1, ante);
    game.deck = Deck::stacked(stack_order(n, dealer, hands, trump)).unwrap();
    deal_cards(&mut game).unwrap();
    set_trump_suit(&mut game, false).unwrap();
    deal_cards(&mut game).unwrap();
    assert_eq!(game.phase(), Some(Phase::FourCards));
    game
}

/// Refuse around the table until `taker` is offered trump, then take it.
pub fn auction_to(game: &mut Game, taker: PlayerId) {
    while let Some(p) = who_can_take_trump(game) {
        if p == taker {
            take_trump(game, p).unwrap();
            return;
        }
        refuse_trump(game, p).unwrap();
    }
    panic!("player {taker} was never offered trump");
}

/// Everybody still undecided stays in.
pub fn everyone_stays(game: &mut Game) {
    while let Some(p) = who_can_fold_or_stay(game) {
        player_is_in(game, p).unwrap();
    }
}

/// Everybody exchanges whatever is selected (nothing, by default).
pub fn everyone_exchanges(game: &mut Game) {
    while let Some(p) = who_can_exchange(game) {
        exchange_cards(game, p).unwrap();
    }
}

/// Shorthand for a card id.
pub fn c(suit: Suit, rank: Rank) -> CardId {
    card_id(suit, rank)
}

/// Given hands, `taker` takes trump, all stay, no cards change: `Showdown`.
pub fn showdown_with_hands(
    dealer: PlayerId,
    hands: &[[CardId; 4]],
    trump: CardId,
    taker: PlayerId,
) -> Game {
    showdown_with_hands_and_ante(dealer, hands, trump, taker, 1)
}

pub fn showdown_with_hands_and_ante(
    dealer: PlayerId,
    hands: &[[CardId; 4]],
    trump: CardId,
    taker: PlayerId,
    ante: i64,
) -> Game {
    let mut game = game_with_hands_and_ante(dealer, hands, trump, ante);
    auction_to(&mut game, taker);
    everyone_stays(&mut game);
    everyone_exchanges(&mut game);
    assert_eq!(game.phase(), Some(Phase::Showdown));
    game
}

/// Initialised game of `n` seats, each driven by a seeded `RandomPlayer`.
pub fn random_table(n: usize, seed: u64) -> (Game, Vec<Seat>) {
    let mut game = Game::with_seed(seed);
    initialize_game(&mut game, n).unwrap();
    let seats = (0..n as PlayerId)
        .map(|i| Box::new(RandomPlayer::new(Some(derive_ai_seed(seed, i)))) as Seat)
        .collect();
    (game, seats)
}
