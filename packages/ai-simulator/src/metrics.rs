//! Metrics collection and output for simulation results.

use serde::Serialize;

use crate::simulator::{GameResult, RoundRecord};
use crate::types::MetricsLevel;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub ai_types: Vec<String>,
    pub players: usize,
    pub max_rounds: usize,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_banks: Vec<i64>,
    pub bank_deltas: Vec<i64>,
    pub winner: Option<u8>,
    pub completed: bool,
    pub rounds_played: usize,
    pub redeals: u32,
    /// Pot left on the table when the run stopped.
    pub carry: i64,
    pub actions: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub dealer: Option<u8>,
    pub pot: i64,
    pub trump_taker: Option<u8>,
    pub took_early: bool,
    pub trump: Option<String>,
    pub trump_hidden: bool,
    pub redeals: u32,
    pub folded: Vec<u8>,
    pub settlements: Vec<SeatSettlement>,
    pub carry: i64,
    pub game_over: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatSettlement {
    pub seat: u8,
    pub tricks: u8,
    pub credit: i64,
    pub penalty: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: u8,
    pub ai_type: String,
    pub bank_delta: i64,
    pub rounds_taken_trump: u32,
    /// Rounds as taker that ended with fewer than two tricks.
    pub taker_failures: u32,
    pub rounds_folded: u32,
    pub total_tricks: u32,
    pub total_penalties: i64,
    pub avg_tricks_per_round: f64,
}

/// Settings shared by every game of a run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub ai_types: Vec<String>,
    pub max_rounds: usize,
    pub total_games: u32,
    pub level: MetricsLevel,
}

/// Build metrics from one simulated game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    run: &RunSettings,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let ai_types = &run.ai_types;
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let rounds: Vec<RoundMetrics> = result.rounds.iter().map(build_round_metrics).collect();

    let deltas = result.bank_deltas();
    let player_metrics: Vec<PlayerMetrics> = ai_types
        .iter()
        .enumerate()
        .map(|(seat, ai)| {
            build_player_metrics(seat as u8, ai, deltas.get(seat).copied().unwrap_or(0), &rounds)
        })
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config: GameConfig {
            ai_types: ai_types.clone(),
            players: ai_types.len(),
            max_rounds: run.max_rounds,
            total_games: run.total_games,
        },
        result: GameResultMetrics {
            final_banks: result.final_banks.clone(),
            bank_deltas: deltas,
            winner: result.winner(),
            completed: result.completed,
            rounds_played: result.rounds.len(),
            redeals: result.rounds.iter().map(|r| r.redeals).sum(),
            carry: result.rounds.last().map_or(0, |r| r.report.carry),
            actions: result.actions,
            duration_ms,
        },
        rounds: match run.level {
            MetricsLevel::Detailed => rounds,
            MetricsLevel::Basic => Vec::new(),
        },
        player_metrics,
    }
}

fn build_round_metrics(round: &RoundRecord) -> RoundMetrics {
    let report = &round.report;
    RoundMetrics {
        round_no: report.round_no,
        dealer: round.dealer,
        pot: report.pot,
        trump_taker: round.trump_taker,
        took_early: round.took_early,
        trump: round.trump_suit.map(|s| format!("{s:?}")),
        trump_hidden: round.trump_hidden,
        redeals: round.redeals,
        folded: round.folded.clone(),
        settlements: report
            .players
            .iter()
            .map(|s| SeatSettlement {
                seat: s.player_id,
                tricks: s.tricks,
                credit: s.credit,
                penalty: s.penalty,
            })
            .collect(),
        carry: report.carry,
        game_over: report.game_over,
    }
}

fn build_player_metrics(
    seat: u8,
    ai_type: &str,
    bank_delta: i64,
    rounds: &[RoundMetrics],
) -> PlayerMetrics {
    let mut rounds_taken_trump = 0;
    let mut taker_failures = 0;
    let mut total_tricks = 0u32;
    let mut total_penalties = 0;

    for round in rounds {
        let settlement = round.settlements.iter().find(|s| s.seat == seat);
        if round.trump_taker == Some(seat) {
            rounds_taken_trump += 1;
            if settlement.is_some_and(|s| s.tricks < 2) {
                taker_failures += 1;
            }
        }
        if let Some(s) = settlement {
            total_tricks += u32::from(s.tricks);
            total_penalties += s.penalty;
        }
    }
    let rounds_folded = rounds.iter().filter(|r| r.folded.contains(&seat)).count() as u32;

    let avg_tricks_per_round = if rounds.is_empty() {
        0.0
    } else {
        f64::from(total_tricks) / rounds.len() as f64
    };

    PlayerMetrics {
        seat,
        ai_type: ai_type.to_string(),
        bank_delta,
        rounds_taken_trump,
        taker_failures,
        rounds_folded,
        total_tricks,
        total_penalties,
        avg_tricks_per_round,
    }
}

/// CSV summary row for quick analysis. Per-seat columns are `;`-joined so
/// the header does not depend on the table size.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub winner: Option<u8>,
    pub completed: bool,
    pub rounds: usize,
    pub bank_deltas: String,
    pub ai_types: String,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            players: metrics.config.players,
            winner: metrics.result.winner,
            completed: metrics.result.completed,
            rounds: metrics.result.rounds_played,
            bank_deltas: metrics
                .result
                .bank_deltas
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(";"),
            ai_types: metrics.config.ai_types.join(";"),
        }
    }
}
