//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per game plus the CSV summary.
    Jsonl,
    /// CSV summary only.
    Csv,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum MetricsLevel {
    /// Game totals only.
    Basic,
    /// Adds one record per settled round.
    Detailed,
}
