//! AI configuration handling.
//!
//! Seats are configured with small JSON objects naming the policy and an
//! optional seed; any other fields are kept for the policy to read.
//!
//! ```json
//! {"ai": "Heuristic"}
//! {"ai": "RandomPlayer", "seed": 12345}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::ai::registry::by_name;
use crate::ai::{AiError, AiPlayer};
use crate::domain::player::PlayerId;
use crate::domain::seed_derivation::derive_ai_seed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Registered policy name; `None` means the default policy.
    #[serde(default, rename = "ai", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional RNG seed for reproducible decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Policy-specific fields.
    #[serde(flatten)]
    pub custom: serde_json::Map<String, JsonValue>,
}

impl AiConfig {
    /// Create an AiConfig from optional JSON, falling back to an empty config
    /// when the value is missing or malformed.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_default()
    }

    /// Strict parse of a JSON document.
    pub fn parse(text: &str) -> Result<Self, AiError> {
        serde_json::from_str(text)
            .map_err(|e| AiError::Internal(format!("invalid AI config: {e}")))
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed this seat from the game seed unless the config already pins one.
    pub fn for_seat(mut self, game_seed: u64, seat: PlayerId) -> Self {
        self.seed.get_or_insert_with(|| derive_ai_seed(game_seed, seat));
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    /// Instantiate the configured policy through the registry.
    pub fn build(&self) -> Result<Box<dyn AiPlayer + Send + Sync>, AiError> {
        let name = self.name.as_deref().unwrap_or(super::DEFAULT_AI);
        let factory =
            by_name(name).ok_or_else(|| AiError::Internal(format!("unknown AI '{name}'")))?;
        Ok((factory.make)(self.seed))
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            name: None,
            seed: None,
            custom: serde_json::Map::new(),
        }
    }
}
