//! The fold/stay decision after trump is taken.

use tracing::{debug, info};

use crate::domain::player::PlayerId;
use crate::domain::selectors::who_can_fold_or_stay;
use crate::domain::state::{require_phase, require_trump_taker, Game, Phase};
use crate::errors::domain::{DomainError, ValidationKind};

/// Effect of a fold on the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    Folded,
    /// Everyone else folded; the round ended with `winner` taking every trick.
    LastStanding { winner: PlayerId },
}

/// Leave the round. The hand is discarded at once.
///
/// If only one player is left unfolded the game ends in `GameOver` with that
/// player credited every trick of the round.
pub fn player_folds(game: &mut Game, player_id: PlayerId) -> Result<FoldOutcome, DomainError> {
    require_decision_turn(game, player_id, "player_folds")?;

    let player = game.player_mut(player_id)?;
    player.has_folded = true;
    player.is_in = false;
    let hand = std::mem::take(&mut player.hand);
    for card_id in hand {
        let card = game.card_mut(card_id)?;
        card.flags.is_discarded = true;
        card.flags.is_selected = false;
    }
    debug!(player_id, "player folded");

    let mut standing = game.players.iter().filter(|p| !p.has_folded);
    let (Some(last), None) = (standing.next(), standing.next()) else {
        return Ok(FoldOutcome::Folded);
    };
    let winner = last.id;
    let tricks = game.rules.tricks_per_round;
    game.player_mut(winner)?.tricks = tricks;
    let round = game.round_mut()?;
    round.state = Phase::GameOver;
    info!(
        round_no = round.round_number,
        player_id = winner,
        pot = round.round_pot,
        "all others folded, game over"
    );
    Ok(FoldOutcome::LastStanding { winner })
}

/// Commit to playing the round.
pub fn player_is_in(game: &mut Game, player_id: PlayerId) -> Result<(), DomainError> {
    require_decision_turn(game, player_id, "player_is_in")?;
    game.player_mut(player_id)?.is_in = true;
    debug!(player_id, "player is in");
    Ok(())
}

fn require_decision_turn(
    game: &Game,
    player_id: PlayerId,
    ctx: &'static str,
) -> Result<(), DomainError> {
    require_phase(game, &[Phase::FourCards], ctx)?;
    require_trump_taker(game, ctx)?;
    let player = game.player(player_id)?;

    if player.has_taken_trump {
        return Err(DomainError::validation(
            ValidationKind::CannotFold,
            format!("player {player_id} took trump and is committed"),
        ));
    }
    if player.has_folded {
        return Err(DomainError::validation(
            ValidationKind::PlayerFolded,
            format!("player {player_id} has already folded"),
        ));
    }
    if player.is_in {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDecided,
            format!("player {player_id} is already in"),
        ));
    }
    if who_can_fold_or_stay(game) != Some(player_id) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("player {player_id} must wait to fold or stay"),
        ));
    }
    Ok(())
}
