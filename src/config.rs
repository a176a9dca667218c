// src/config.rs
//
// Runtime configuration for the cinema service.
//
// Every field has a default, so an empty JSON object is a valid config.
//
// ```json
// {
//   "marathon": { "min_break_minutes": 10 },
//   "record_event_log": false
// }
// ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::{MarathonRules, MAX_BREAK_MINUTES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CinemaConfig {
    /// Rules used by the greedy marathon planner
    pub marathon: MarathonRules,

    /// Keep an in-memory log of every emitted domain event
    pub record_event_log: bool,
}

impl Default for CinemaConfig {
    fn default() -> Self {
        Self {
            marathon: MarathonRules::default(),
            record_event_log: true,
        }
    }
}

impl CinemaConfig {
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let config: CinemaConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        log::info!("Loaded cinema config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.marathon.min_break_minutes > MAX_BREAK_MINUTES {
            return Err(AppError::Config(format!(
                "marathon.min_break_minutes must be at most {}, got {}",
                MAX_BREAK_MINUTES, self.marathon.min_break_minutes
            )));
        }
        Ok(())
    }
}
