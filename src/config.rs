//! Lab configuration.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

/// Name given to automata created without one.
pub const DEFAULT_AUTOMATON_NAME: &str = "Untitled Automaton";

/// Allowed auto-play delays, in milliseconds.
pub const AUTOPLAY_DELAY_RANGE_MS: RangeInclusive<u64> = 100..=1500;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Auto-play delay {0}ms is outside {min}..={max}ms", min = AUTOPLAY_DELAY_RANGE_MS.start(), max = AUTOPLAY_DELAY_RANGE_MS.end())]
    DelayOutOfRange(u64),

    #[error("Default symbol must not be empty")]
    EmptyDefaultSymbol,
}

/// Settings for a lab session.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration.
///
/// # Example
///
/// ```rust
/// use automaton_lab::config::LabConfig;
/// use std::time::Duration;
///
/// let config = LabConfig::from_json_str(r#"{ "autoplayDelayMs": 300 }"#).unwrap();
///
/// assert_eq!(config.autoplay_delay(), Duration::from_millis(300));
/// assert_eq!(config.default_symbol, "a");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LabConfig {
    /// Delay between auto-play steps
    pub autoplay_delay_ms: u64,
    /// Symbol given to a new transition created without symbols
    pub default_symbol: String,
    /// Name of automata created by `new_automaton`
    pub default_automaton_name: String,
    /// Prefix of generated state names (`q0`, `q1`, ...)
    pub state_name_prefix: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: 500,
            default_symbol: "a".to_string(),
            default_automaton_name: DEFAULT_AUTOMATON_NAME.to_string(),
            state_name_prefix: "q".to_string(),
        }
    }
}

impl LabConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !AUTOPLAY_DELAY_RANGE_MS.contains(&self.autoplay_delay_ms) {
            return Err(ConfigError::DelayOutOfRange(self.autoplay_delay_ms));
        }
        if self.default_symbol.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultSymbol);
        }
        Ok(())
    }

    pub fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_ms)
    }

    /// Display name for the state added when `count` states already exist.
    pub fn state_name(&self, count: usize) -> String {
        format!("{}{}", self.state_name_prefix, count)
    }
}
