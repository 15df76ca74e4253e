//! Configuration for the pipeline visualization trackers.
//!
//! This module defines the settings that parameterize the trackers. It provides:
//! 1. **Defaults:** Placeholder text and the metrics history bound.
//! 2. **Structures:** Hierarchical config for history reconstruction and metrics recording.
//! 3. **Validation:** Rejection of settings no tracker can honour.
//!
//! Configuration is supplied as JSON (for example with `pipeview replay --config`) or
//! built with `Config::default()`. Every field is optional.

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::snapshot::LatchNaming;

/// Default configuration constants for the trackers.
mod defaults {
    /// Program counter shown for an instruction first seen without one.
    pub const UNKNOWN_PC: &str = crate::common::constants::UNKNOWN_PC;

    /// Disassembly shown for an instruction first seen without one.
    pub const UNKNOWN_INSTR: &str = crate::common::constants::UNKNOWN_INSTR;

    /// Number of metric points kept before the oldest is evicted.
    pub const METRICS_CAPACITY: usize = crate::common::constants::METRICS_CAPACITY;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pipeview_core::config::Config;
/// use pipeview_core::snapshot::LatchNaming;
///
/// let config = Config::default();
/// assert_eq!(config.history.latch_naming, LatchNaming::Consumer);
/// assert_eq!(config.metrics.capacity, 1000);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use pipeview_core::config::Config;
/// use pipeview_core::snapshot::LatchNaming;
///
/// let json = r#"{
///     "history": { "latch_naming": "Producer" },
///     "metrics": { "capacity": 250 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.history.latch_naming, LatchNaming::Producer);
/// assert_eq!(config.history.unknown_pc, "??");
/// assert_eq!(config.metrics.capacity, 250);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// History reconstruction settings
    pub history: HistoryConfig,
    /// Metrics recording settings
    pub metrics: MetricsConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text does not deserialize, or the
    /// error from [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that deserialize fine but cannot be honoured.
    ///
    /// # Errors
    ///
    /// Fails on a zero metrics capacity or an empty placeholder string.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.history.unknown_pc.is_empty() {
            return Err(ConfigError::EmptyPlaceholder("unknown_pc"));
        }
        if self.history.unknown_instr.is_empty() {
            return Err(ConfigError::EmptyPlaceholder("unknown_instr"));
        }
        Ok(())
    }
}

/// History reconstruction settings.
///
/// Controls how latch occupants are labelled and what a row shows when the
/// debugger omitted its program counter or disassembly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Which stage an occupant of each latch is reported in
    #[serde(default)]
    pub latch_naming: LatchNaming,

    /// Program counter placeholder for rows created without one
    #[serde(default = "HistoryConfig::default_unknown_pc")]
    pub unknown_pc: String,

    /// Disassembly placeholder for rows created without one
    #[serde(default = "HistoryConfig::default_unknown_instr")]
    pub unknown_instr: String,
}

impl HistoryConfig {
    fn default_unknown_pc() -> String {
        defaults::UNKNOWN_PC.to_owned()
    }

    fn default_unknown_instr() -> String {
        defaults::UNKNOWN_INSTR.to_owned()
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            latch_naming: LatchNaming::default(),
            unknown_pc: Self::default_unknown_pc(),
            unknown_instr: Self::default_unknown_instr(),
        }
    }
}

/// Metrics recording settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricsConfig {
    /// Maximum number of retained metric points
    #[serde(default = "MetricsConfig::default_capacity")]
    pub capacity: usize,
}

impl MetricsConfig {
    /// Returns the default history bound.
    const fn default_capacity() -> usize {
        defaults::METRICS_CAPACITY
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}
