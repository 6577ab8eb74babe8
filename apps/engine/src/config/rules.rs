use std::env;

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::DECK_SIZE;
use crate::domain::exchange::HAND_SIZE;
use crate::errors::domain::{DomainError, ValidationKind};

/// Table rules that are fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Bank every player starts with.
    pub starting_bank: i64,
    /// Ante posted by each non-dealer before the first deal of a game.
    pub small_blind: i64,
    pub min_players: u8,
    /// 4 cards per player plus the trump card must fit in the 40-card deck.
    pub max_players: u8,
    /// Tricks per round, one per card in a hand; also the payout divisor.
    pub tricks_per_round: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_bank: 200,
            small_blind: 1,
            min_players: 2,
            max_players: 9,
            tricks_per_round: 4,
        }
    }
}

impl RulesConfig {
    /// Builds the rules from environment variables, falling back to defaults.
    ///
    /// Recognised: `MOUSEL_STARTING_BANK`, `MOUSEL_SMALL_BLIND`,
    /// `MOUSEL_MAX_PLAYERS`.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();
        let config = Self {
            starting_bank: parse_var("MOUSEL_STARTING_BANK", defaults.starting_bank)?,
            small_blind: parse_var("MOUSEL_SMALL_BLIND", defaults.small_blind)?,
            max_players: parse_var("MOUSEL_MAX_PLAYERS", defaults.max_players)?,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.starting_bank < 0 {
            return Err(invalid("starting_bank must not be negative"));
        }
        if self.small_blind <= 0 {
            return Err(invalid("small_blind must be positive"));
        }
        if self.min_players < 2 || self.min_players > self.max_players {
            return Err(invalid("player limits must satisfy 2 <= min_players <= max_players"));
        }
        if usize::from(self.tricks_per_round) != HAND_SIZE {
            return Err(invalid(format!(
                "tricks_per_round must be {HAND_SIZE}, got {}",
                self.tricks_per_round
            )));
        }
        let needed = usize::from(self.max_players) * HAND_SIZE + 1;
        if needed > DECK_SIZE {
            return Err(invalid(format!(
                "max_players={} needs {needed} cards, deck has {DECK_SIZE}",
                self.max_players
            )));
        }
        Ok(())
    }

    pub fn allows_player_count(&self, number_of_players: usize) -> bool {
        (self.min_players as usize..=self.max_players as usize).contains(&number_of_players)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, DomainError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| invalid(format!("{name} has malformed value '{raw}'"))),
        Err(_) => Ok(default),
    }
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidConfig, detail)
}
