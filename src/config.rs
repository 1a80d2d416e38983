//! Runtime tunables for both screens, loaded from TOML.
//!
//! Every field has a default, so an empty document (or no file at all)
//! yields the stock behaviour: a 10 second rotation with 500 ms fades, a
//! 2 second simulated verification delay, and the teal rupee bar chart.

use crate::ledger::ChartConfig;
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub gate: GateConfig,
    pub chart: ChartConfig,
}

/// Timing of the entry gate.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub rotation_interval_ms: u64,
    /// Duration of each fade direction.
    pub fade_ms: u64,
    /// Simulated latency before an accepted login navigates away.
    pub verify_delay_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            rotation_interval_ms: 10_000,
            fade_ms: 500,
            verify_delay_ms: 2_000,
        }
    }
}

impl GateConfig {
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    /// The fade-out/fade-in pair must fit inside one rotation interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotation_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "gate.rotation_interval_ms must be positive".to_string(),
            ));
        }
        if self.fade_ms.saturating_mul(2) >= self.rotation_interval_ms {
            return Err(ConfigError::Invalid(format!(
                "two fades of {}ms do not fit in a {}ms rotation interval",
                self.fade_ms, self.rotation_interval_ms
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.gate.validate()?;
        Ok(config)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
        path: path_ref.display().to_string(),
        source,
    })?;
    AppConfig::from_toml_str(&contents)
}
