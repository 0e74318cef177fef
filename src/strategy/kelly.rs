//! Kelly criterion stake sizing.
//!
//! Computes suggested accumulator stakes as a bankroll fraction using
//! fractional Kelly with a per-risk-level cap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::RiskLevel;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Kelly sizing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KellyConfig {
    /// Fractional Kelly multiplier (0.25 = quarter-Kelly). Lower = more conservative.
    pub multiplier: f64,
    /// Maximum stake as a fraction of bankroll, per risk level.
    pub low_risk_cap: f64,
    pub medium_risk_cap: f64,
    pub high_risk_cap: f64,
    /// Stakes below this bankroll fraction are not worth suggesting.
    pub min_stake: f64,
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            multiplier: 0.25,      // Quarter-Kelly: conservative
            low_risk_cap: 0.05,    // Max 5% of bankroll
            medium_risk_cap: 0.03,
            high_risk_cap: 0.015,
            min_stake: 0.001,
        }
    }
}

impl KellyConfig {
    pub fn cap_for(&self, risk: RiskLevel) -> f64 {
        match risk {
            RiskLevel::Low => self.low_risk_cap,
            RiskLevel::Medium => self.medium_risk_cap,
            RiskLevel::High => self.high_risk_cap,
        }
    }
}

// ---------------------------------------------------------------------------
// Kelly calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct KellyCalculator {
    config: KellyConfig,
}

impl KellyCalculator {
    pub fn new(config: KellyConfig) -> Self {
        Self { config }
    }

    /// Access the Kelly configuration.
    pub fn config(&self) -> &KellyConfig {
        &self.config
    }

    /// Raw Kelly fraction for a bet at decimal odds `odd` won with
    /// probability `probability`.
    ///
    /// Kelly formula: f* = (bp - q) / b
    /// where:
    ///   b = net odds (odd - 1)
    ///   p = estimated win probability
    ///   q = 1 - p
    pub fn kelly_fraction(&self, odd: f64, probability: f64) -> f64 {
        let b = odd - 1.0;
        if b <= 0.0 || !(0.0..=1.0).contains(&probability) {
            return 0.0;
        }
        (b * probability - (1.0 - probability)) / b
    }

    /// Suggested stake as a bankroll fraction: fractional Kelly capped by
    /// risk level. Zero when the bet has no positive Kelly fraction.
    pub fn suggest_stake(&self, odd: f64, probability: f64, risk: RiskLevel) -> f64 {
        let kelly = self.kelly_fraction(odd, probability);

        // Negative Kelly means no bet (edge doesn't justify the odds)
        if kelly <= 0.0 {
            debug!(odd, probability, kelly, "Negative Kelly, no stake");
            return 0.0;
        }

        let capped = (kelly * self.config.multiplier).min(self.config.cap_for(risk));

        if capped < self.config.min_stake {
            debug!(
                stake = format!("{:.3}%", capped * 100.0),
                min = format!("{:.3}%", self.config.min_stake * 100.0),
                "Stake below minimum"
            );
            return 0.0;
        }

        debug!(
            raw_kelly = format!("{:.2}%", kelly * 100.0),
            stake = format!("{:.2}%", capped * 100.0),
            risk = %risk,
            "Stake sized"
        );

        capped
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
