//! Pot redistribution at round end and the start of the next round.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::player::{next_seat, PlayerId};
use crate::domain::state::{require_dealer, require_phase, Game, Phase, Round};
use crate::errors::domain::DomainError;

/// Tricks the trump-taker must make to avoid a penalty.
pub const TAKER_TRICK_TARGET: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettlement {
    pub player_id: PlayerId,
    pub tricks: u8,
    /// Share of the pot won.
    pub credit: i64,
    /// Paid into the next pot.
    pub penalty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub round_no: u32,
    pub pot: i64,
    pub players: Vec<PlayerSettlement>,
    /// Penalties plus the undistributed remainder; seeds the next pot.
    pub carry: i64,
    pub game_over: bool,
    pub next_dealer: PlayerId,
}

/// What a player in the round owes and earns for `tricks` out of `pot`.
pub fn settle_player(tricks: u8, is_taker: bool, pot: i64, tricks_per_round: u8) -> (i64, i64) {
    let credit = pot / i64::from(tricks_per_round.max(1)) * i64::from(tricks);
    let penalty = if is_taker {
        i64::from(TAKER_TRICK_TARGET.saturating_sub(tricks)) * pot
    } else if tricks == 0 {
        pot
    } else {
        0
    };
    (credit, penalty)
}

/// Settle the finished round and open the next one.
///
/// Credits each active player their share of the pot, debits penalties into
/// the next pot, resets per-round player state, rotates the dealer and
/// reshuffles. After `GameOver` the round history restarts at round 0 and
/// antes are due again; banks carry over.
pub fn end_round(game: &mut Game) -> Result<SettlementReport, DomainError> {
    let phase = require_phase(game, &[Phase::RoundOver, Phase::GameOver], "end_round")?;
    let dealer = require_dealer(game, "end_round")?;
    let round = game.round()?;
    let round_no = round.round_number;
    let pot = round.round_pot;
    let taker = game.trump_taker();
    let tricks_per_round = game.rules.tricks_per_round;

    let players: Vec<PlayerSettlement> = game
        .players
        .iter()
        .filter(|p| p.is_in_round() || Some(p.id) == taker)
        .map(|p| {
            let (credit, penalty) =
                settle_player(p.tricks, Some(p.id) == taker, pot, tricks_per_round);
            PlayerSettlement {
                player_id: p.id,
                tricks: p.tricks,
                credit,
                penalty,
            }
        })
        .collect();

    let credited: i64 = players.iter().map(|s| s.credit).sum();
    let penalties: i64 = players.iter().map(|s| s.penalty).sum();
    if credited > pot {
        return Err(DomainError::invariant(format!(
            "round {round_no} credits {credited} from a pot of {pot}"
        )));
    }
    let carry = penalties + (pot - credited);

    for s in &players {
        game.player_mut(s.player_id)?.bank += s.credit - s.penalty;
    }

    let n = game.number_of_players;
    let next_dealer = next_seat(dealer, n);
    for p in game.players.iter_mut() {
        p.reset_for_round();
        p.is_dealer = p.id == next_dealer;
    }
    game.rebuild_deck();

    let game_over = phase == Phase::GameOver;
    if game_over {
        game.rounds = vec![Round::new(0, carry, Some(next_dealer))];
        game.current_round = 0;
        game.games_completed += 1;
    } else {
        game.rounds.push(Round::new(round_no + 1, carry, Some(next_dealer)));
        game.current_round = game.rounds.len() - 1;
    }

    info!(
        round_no,
        pot,
        carry,
        game_over,
        next_dealer,
        "round settled"
    );
    Ok(SettlementReport {
        round_no,
        pot,
        players,
        carry,
        game_over,
        next_dealer,
    })
}
