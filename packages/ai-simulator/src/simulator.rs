//! In-memory game runner for AI evaluation.
//!
//! Games go through the engine's ordinary reducer, so every AI decision is
//! validated exactly as it would be for a hosted table.

use mousel::ai::{next_actions, AiError, Seat};
use mousel::domain::action::ActionEffect;
use mousel::domain::cards_types::Suit;
use mousel::domain::player::PlayerId;
use mousel::domain::selectors::{pending_decision, PendingDecision};
use mousel::domain::settlement::SettlementReport;
use mousel::{apply, Action, DomainError, Game, RulesConfig};
use tracing::{debug, trace};

/// Upper bound on actions per game; a healthy round needs well under 100.
const ACTIONS_PER_ROUND: usize = 400;

/// What the table looked like just before a round was settled.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub report: SettlementReport,
    pub dealer: Option<PlayerId>,
    pub trump_taker: Option<PlayerId>,
    pub took_early: bool,
    pub trump_suit: Option<Suit>,
    pub trump_hidden: bool,
    pub folded: Vec<PlayerId>,
    pub redeals: u32,
}

impl RoundRecord {
    fn capture(game: &Game, report: SettlementReport) -> Self {
        let round = game.round().ok();
        Self {
            dealer: round.and_then(|r| r.dealer),
            trump_taker: round.and_then(|r| r.player_took_trump_id),
            took_early: game.players.iter().any(|p| p.has_taken_trump_early),
            trump_suit: game.trump_suit(),
            trump_hidden: round.is_some_and(|r| r.hidden_trump_suit),
            folded: game.players.iter().filter(|p| p.has_folded).map(|p| p.id).collect(),
            redeals: round.map_or(0, |r| r.redeals),
            report,
        }
    }
}

/// Result of simulating one game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub starting_banks: Vec<i64>,
    pub final_banks: Vec<i64>,
    pub rounds: Vec<RoundRecord>,
    /// Reached `GameOver` before the round cap.
    pub completed: bool,
    pub actions: usize,
}

impl GameResult {
    pub fn bank_deltas(&self) -> Vec<i64> {
        self.final_banks
            .iter()
            .zip(&self.starting_banks)
            .map(|(end, start)| end - start)
            .collect()
    }

    /// Seat with the largest gain; ties go to the lowest seat.
    pub fn winner(&self) -> Option<PlayerId> {
        let deltas = self.bank_deltas();
        let best = deltas.iter().copied().max()?;
        deltas.iter().position(|&d| d == best).map(|i| i as PlayerId)
    }
}

/// Runs a single seeded game to `GameOver` or `max_rounds`.
pub struct Simulator {
    rules: RulesConfig,
    seed: u64,
    max_rounds: usize,
}

impl Simulator {
    pub fn new(rules: RulesConfig, seed: u64, max_rounds: usize) -> Self {
        Self {
            rules,
            seed,
            max_rounds,
        }
    }

    pub fn simulate_game(&self, seats: &[Seat]) -> Result<GameResult, SimulatorError> {
        let mut game = Game::with_config(self.rules.clone(), self.seed);
        apply(
            &mut game,
            &Action::InitializeGame {
                number_of_players: seats.len(),
            },
        )?;
        let starting_banks = banks(&game);

        let budget = ACTIONS_PER_ROUND * self.max_rounds.max(1);
        let mut rounds = Vec::new();
        let mut actions = 0;
        let mut completed = false;

        'game: while rounds.len() < self.max_rounds {
            if actions >= budget {
                return Err(SimulatorError::Stalled(actions));
            }
            let pending = pending_decision(&game);
            let batch = next_actions(&game, seats)
                .map_err(|e| SimulatorError::Ai(pending.and_then(actor), e))?;

            for action in &batch {
                trace!(action = action.name(), "simulated action");
                // Capture before settling resets the round.
                let before = matches!(action, Action::EndRound).then(|| game.clone());
                let outcome = apply(&mut game, action)?;
                actions += 1;

                if let (ActionEffect::Settled(report), Some(before)) = (outcome.effect, before) {
                    let game_over = report.game_over;
                    debug!(
                        round_no = report.round_no,
                        pot = report.pot,
                        carry = report.carry,
                        game_over,
                        "simulated round settled"
                    );
                    rounds.push(RoundRecord::capture(&before, report));
                    if game_over {
                        completed = true;
                        break 'game;
                    }
                }
            }
        }

        Ok(GameResult {
            starting_banks,
            final_banks: banks(&game),
            rounds,
            completed,
            actions,
        })
    }
}

fn banks(game: &Game) -> Vec<i64> {
    game.players.iter().map(|p| p.bank).collect()
}

/// Seat that owes the pending decision, if a single seat does.
fn actor(pending: PendingDecision) -> Option<PlayerId> {
    match pending {
        PendingDecision::PostAnte { player_id }
        | PendingDecision::TrumpOffer { player_id, .. }
        | PendingDecision::FoldOrStay { player_id }
        | PendingDecision::Exchange { player_id }
        | PendingDecision::Play { player_id } => Some(player_id),
        PendingDecision::FlipTrump { dealer } => Some(dealer),
        PendingDecision::ChooseDealer | PendingDecision::Deal | PendingDecision::Settle => None,
    }
}

/// Errors that can occur during simulation.
#[derive(Debug)]
pub enum SimulatorError {
    /// An AI failed to decide
    Ai(Option<PlayerId>, AiError),
    /// The engine rejected a driven action
    Rule(DomainError),
    /// Action budget exhausted without settling enough rounds
    Stalled(usize),
}

impl From<DomainError> for SimulatorError {
    fn from(e: DomainError) -> Self {
        SimulatorError::Rule(e)
    }
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Ai(Some(seat), err) => write!(f, "AI error (seat {seat}): {err}"),
            SimulatorError::Ai(None, err) => write!(f, "AI error: {err}"),
            SimulatorError::Rule(err) => write!(f, "Rule error: {err}"),
            SimulatorError::Stalled(n) => write!(f, "No progress after {n} actions"),
        }
    }
}

impl std::error::Error for SimulatorError {}
