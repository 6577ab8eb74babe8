//! Edge-triggered events derived by comparing the game before and after an action.

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerId;
use crate::domain::state::{Game, Phase};

/// The parts of a game that transitions are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub phase: Option<Phase>,
    pub round_no: Option<u32>,
    pub games_completed: u32,
    pub redeals: u32,
    pub turn: Option<PlayerId>,
    pub completed_tricks: usize,
    pub last_trick_winner: Option<PlayerId>,
    pub trump_taker: Option<(PlayerId, bool)>,
    pub folded: Vec<PlayerId>,
}

impl GameLifecycleView {
    pub fn of(game: &Game) -> Self {
        let round = game.round().ok();
        let trump_taker = game
            .players
            .iter()
            .find(|p| p.has_taken_trump)
            .map(|p| (p.id, p.has_taken_trump_early));
        Self {
            phase: round.map(|r| r.state),
            round_no: round.map(|r| r.round_number),
            games_completed: game.games_completed,
            redeals: round.map_or(0, |r| r.redeals),
            turn: round
                .and_then(|r| r.current_turn())
                .and_then(|t| t.next_player_id),
            completed_tricks: round.map_or(0, |r| r.completed_tricks()),
            last_trick_winner: round
                .and_then(|r| r.turns.iter().rev().find_map(|t| t.winner_id)),
            trump_taker,
            folded: game
                .players
                .iter()
                .filter(|p| p.has_folded)
                .map(|p| p.id)
                .collect(),
        }
    }

    /// Same deal of the same round: per-round counters are comparable.
    fn same_deal(&self, other: &Self) -> bool {
        self.same_round(other) && self.redeals == other.redeals
    }

    fn same_round(&self, other: &Self) -> bool {
        self.round_no == other.round_no && self.games_completed == other.games_completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameTransition {
    /// Edge-triggered: the round moved to a new phase.
    PhaseChanged { from: Option<Phase>, to: Phase },

    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: PlayerId },

    /// Edge-triggered: a trick was resolved.
    TrickWon { player_id: PlayerId, trick_no: usize },

    /// Edge-triggered: somebody took the trump card.
    TrumpTaken { player_id: PlayerId, early: bool },

    PlayerFolded { player_id: PlayerId },

    /// Everyone refused trump and the round was dealt again.
    RoundRedealt { round_no: u32 },

    /// Settlement ran and a new round was opened.
    RoundSettled { round_no: u32 },

    /// Edge-triggered: the round ended in `GameOver`.
    GameEnded,
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();
    let same_deal = before.same_deal(after);

    if let (Some(round_no), Some(_)) = (before.round_no, after.round_no) {
        if !before.same_round(after) {
            transitions.push(GameTransition::RoundSettled { round_no });
        } else if after.redeals > before.redeals {
            transitions.push(GameTransition::RoundRedealt { round_no });
        }
    }

    if let Some(to) = after.phase {
        if before.phase != after.phase {
            transitions.push(GameTransition::PhaseChanged {
                from: before.phase,
                to,
            });
        }
    }

    if same_deal && before.trump_taker.is_none() {
        if let Some((player_id, early)) = after.trump_taker {
            transitions.push(GameTransition::TrumpTaken { player_id, early });
        }
    }

    if same_deal {
        for &player_id in &after.folded {
            if !before.folded.contains(&player_id) {
                transitions.push(GameTransition::PlayerFolded { player_id });
            }
        }
    }

    if same_deal && after.completed_tricks > before.completed_tricks {
        if let Some(player_id) = after.last_trick_winner {
            transitions.push(GameTransition::TrickWon {
                player_id,
                trick_no: after.completed_tricks,
            });
        }
    }

    if let Some(player_id) = after.turn {
        if before.turn != after.turn {
            transitions.push(GameTransition::TurnBecame { player_id });
        }
    }

    if before.phase != Some(Phase::GameOver) && after.phase == Some(Phase::GameOver) {
        transitions.push(GameTransition::GameEnded);
    }

    transitions
}
