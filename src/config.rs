//! Engine configuration.
//!
//! Read from a JSON file named by `--config <path>` or the
//! `GHOSTCELL_CONFIG` environment variable. Missing keys take defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::Sizing;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "GHOSTCELL_CONFIG";

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cyborgs sent beyond what a route costs.
    pub spare_cyborgs: i32,
    /// Turns of opponent production buffered beyond the travel time.
    pub margin_turns: i32,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            spare_cyborgs: 1,
            margin_turns: 1,
            log_filter: "ghostcell=info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Picks the config path from `--config <path>` in `args`, then from the
    /// environment. Returns `None` when neither is given.
    pub fn locate(args: &[String]) -> Option<String> {
        args.windows(2)
            .find(|w| w[0] == "--config")
            .map(|w| w[1].clone())
            .or_else(|| std::env::var(CONFIG_ENV).ok())
    }

    pub fn sizing(&self) -> Sizing {
        Sizing {
            spare_cyborgs: self.spare_cyborgs,
            margin_turns: self.margin_turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sizing_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.sizing(), Sizing::default());
        assert_eq!(config.log_filter, "ghostcell=info");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "spare_cyborgs": 3 }"#).unwrap();
        assert_eq!(config.spare_cyborgs, 3);
        assert_eq!(config.margin_turns, 1);
        assert_eq!(config.log_filter, "ghostcell=info");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = EngineConfig::from_json("{ spare_cyborgs: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = EngineConfig::from_file("/nonexistent/ghostcell.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn locate_prefers_command_line() {
        let args: Vec<String> = ["ghostcell", "--config", "bot.json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(EngineConfig::locate(&args), Some("bot.json".to_string()));
    }

    #[test]
    fn serializes_round_trip() {
        let config = EngineConfig {
            spare_cyborgs: 2,
            margin_turns: 0,
            log_filter: "ghostcell=debug".to_string(),
        };
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&text).unwrap(), config);
    }
}
