//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section falls back to its defaults, so a partial (or empty) file is a
//! valid configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::engine::composer::{AccumulatorConfig, MAX_LEGS};
use crate::engine::optimizer::OptimizerConstraints;
use crate::engine::tier::TierTable;
use crate::strategy::confidence::ConfidenceConfig;
use crate::strategy::edge::EdgeConfig;
use crate::strategy::estimator::EstimatorConfig;
use crate::strategy::kelly::KellyConfig;
use crate::types::Tier;

/// Environment variable that overrides the config file path.
pub const CONFIG_PATH_ENV: &str = "VALUEBET_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: EdgeConfig,
    pub estimator: EstimatorConfig,
    pub confidence: ConfidenceConfig,
    pub stake: KellyConfig,
    pub accumulator: AccumulatorConfig,
    pub optimizer: OptimizerConstraints,
    pub tiers: TierTable,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$VALUEBET_CONFIG` or `config.toml`; defaults when the
    /// file does not exist. A file that exists but is invalid is an error.
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        if Path::new(&path).exists() {
            Self::load(&path)
        } else {
            info!(path = %path, "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        let acc = &self.accumulator;
        if acc.min_legs < 2 {
            bail!("accumulator.min_legs must be at least 2, got {}", acc.min_legs);
        }
        if acc.min_legs > acc.max_legs {
            bail!("accumulator.min_legs ({}) exceeds max_legs ({})", acc.min_legs, acc.max_legs);
        }
        if acc.max_legs > MAX_LEGS {
            bail!("accumulator.max_legs must be at most {MAX_LEGS}, got {}", acc.max_legs);
        }
        if acc.themed_legs < acc.min_legs || acc.themed_legs > acc.max_legs {
            bail!(
                "accumulator.themed_legs ({}) must lie within [{}, {}]",
                acc.themed_legs,
                acc.min_legs,
                acc.max_legs
            );
        }
        if !(1.0 < acc.low_risk_max_odd && acc.low_risk_max_odd < acc.medium_risk_max_odd) {
            bail!(
                "risk bands must increase: low {} / medium {}",
                acc.low_risk_max_odd,
                acc.medium_risk_max_odd
            );
        }

        let opt = &self.optimizer;
        if opt.min_legs > opt.max_legs {
            bail!("optimizer.min_legs ({}) exceeds max_legs ({})", opt.min_legs, opt.max_legs);
        }
        if opt.max_legs > MAX_LEGS {
            bail!("optimizer.max_legs must be at most {MAX_LEGS}, got {}", opt.max_legs);
        }

        let stake = &self.stake;
        if !(0.0..=1.0).contains(&stake.multiplier) {
            bail!("stake.multiplier must be within [0, 1], got {}", stake.multiplier);
        }
        for cap in [stake.low_risk_cap, stake.medium_risk_cap, stake.high_risk_cap] {
            if !(0.0..=1.0).contains(&cap) {
                bail!("stake caps must be bankroll fractions within [0, 1], got {cap}");
            }
        }

        let analysis = &self.analysis;
        if !(0.0..1.0).contains(&analysis.min_probability) {
            bail!("analysis.min_probability must be within [0, 1), got {}", analysis.min_probability);
        }

        let est = &self.estimator;
        if est.max_signal_shift > 0.15 || est.max_total_shift > 0.15 {
            bail!(
                "estimator shift caps must not exceed 0.15 (signal {}, total {})",
                est.max_signal_shift,
                est.max_total_shift
            );
        }

        for pair in Tier::ALL.windows(2) {
            let (lower, higher) = (self.tiers.limits(pair[0]), self.tiers.limits(pair[1]));
            if higher.max_singles < lower.max_singles || higher.max_accumulators < lower.max_accumulators {
                bail!("tier {} allows less than tier {}", pair[1], pair[0]);
            }
        }

        Ok(())
    }
}
