//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! granularity_minutes = 30
//! cutoff = "same-day-only"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::slots::{ensure_granularity, DEFAULT_GRANULARITY_MINUTES};

/// When to suppress slots that have already elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutoffPolicy {
    /// Apply the elapsed-time cutoff only when the queried date is today.
    /// Dates before today have no bookable slots.
    #[default]
    SameDayOnly,
    /// Apply today's elapsed-time cutoff to every queried date.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Slot spacing and tour length in minutes.
    pub granularity_minutes: i64,
    pub cutoff: CutoffPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            cutoff: CutoffPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_granularity(self.granularity_minutes)
    }
}
