//! Accumulator composition.
//!
//! Turns an ordered list of legs into a priced parlay: combined odds,
//! combined probability, edge over the bookmaker, expected value, risk
//! band, Kelly stake and a ranking score.
//!
//! Leg probabilities are multiplied, i.e. legs are treated as independent
//! events. Fixtures in the same league or on the same day are often
//! correlated, so `combined_probability` is an approximation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::strategy::kelly::KellyCalculator;
use crate::types::{Accumulator, AccumulatorOrigin, Leg, LegSetError, RiskLevel, ValueError};

/// Hard ceiling on legs in a single accumulator.
pub const MAX_LEGS: usize = 6;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulatorConfig {
    pub min_legs: usize,
    pub max_legs: usize,
    /// Total odds below this are low risk.
    pub low_risk_max_odd: f64,
    /// Total odds up to this are medium risk; above is high.
    pub medium_risk_max_odd: f64,
    /// Quality deduction per leg beyond two.
    pub leg_penalty: f64,
    /// Legs per themed accumulator built by the pipeline.
    pub themed_legs: usize,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            min_legs: 2,
            max_legs: MAX_LEGS,
            low_risk_max_odd: 3.0,
            medium_risk_max_odd: 8.0,
            leg_penalty: 0.02,
            themed_legs: 3,
        }
    }
}

impl AccumulatorConfig {
    pub fn risk_for(&self, total_odd: f64) -> RiskLevel {
        if total_odd < self.low_risk_max_odd {
            RiskLevel::Low
        } else if total_odd <= self.medium_risk_max_odd {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Ranking key: EV per unit of payoff standard deviation, minus a flat
/// penalty per extra leg.
pub fn quality_score(expected_value: f64, probability: f64, total_odd: f64, legs: usize, leg_penalty: f64) -> f64 {
    let sigma = total_odd * (probability * (1.0 - probability)).max(0.0).sqrt();
    expected_value / (1.0 + sigma) - leg_penalty * legs.saturating_sub(2) as f64
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AccumulatorComposer {
    config: AccumulatorConfig,
    kelly: KellyCalculator,
}

impl AccumulatorComposer {
    pub fn new(config: AccumulatorConfig, kelly: KellyCalculator) -> Self {
        Self { config, kelly }
    }

    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }

    /// Price a caller-chosen leg list.
    pub fn compose(&self, legs: Vec<Leg>) -> Result<Accumulator, ValueError> {
        self.compose_with_origin(legs, AccumulatorOrigin::Composed)
    }

    pub fn compose_with_origin(&self, legs: Vec<Leg>, origin: AccumulatorOrigin) -> Result<Accumulator, ValueError> {
        self.validate(&legs)?;

        let total_odd: f64 = legs.iter().map(|l| l.odd).product();
        let combined_probability: f64 = legs.iter().map(|l| l.estimated_probability).product();
        let bookmaker_implied_probability: f64 = legs.iter().map(|l| l.implied_probability).product();
        let edge = combined_probability - bookmaker_implied_probability;
        let expected_value = combined_probability * total_odd - 1.0;
        let risk_level = self.config.risk_for(total_odd);
        let suggested_stake = self.kelly.suggest_stake(total_odd, combined_probability, risk_level);
        let quality = quality_score(
            expected_value,
            combined_probability,
            total_odd,
            legs.len(),
            self.config.leg_penalty,
        );

        let acc = Accumulator {
            id: accumulator_id(&legs),
            origin,
            legs,
            total_odd,
            combined_probability,
            bookmaker_implied_probability,
            edge,
            expected_value,
            suggested_stake,
            risk_level,
            quality_score: quality,
        };

        debug!(
            id = %acc.id,
            legs = acc.legs.len(),
            total_odd = format!("{:.2}", acc.total_odd),
            ev = format!("{:+.4}", acc.expected_value),
            risk = %acc.risk_level,
            "Accumulator composed"
        );

        Ok(acc)
    }

    fn validate(&self, legs: &[Leg]) -> Result<(), LegSetError> {
        let min = self.config.min_legs.max(2);
        let max = self.config.max_legs.clamp(min, MAX_LEGS);
        if legs.len() < min {
            return Err(LegSetError::TooFewLegs { count: legs.len(), min });
        }
        if legs.len() > max {
            return Err(LegSetError::TooManyLegs { count: legs.len(), max });
        }

        let mut seen = HashSet::with_capacity(legs.len());
        for leg in legs {
            if !seen.insert(leg.fixture_id.as_str()) {
                return Err(LegSetError::DuplicateFixture(leg.fixture_id.clone()));
            }
            if !leg.odd.is_finite() || leg.odd <= 1.0 {
                return Err(LegSetError::InvalidOdd {
                    fixture_id: leg.fixture_id.clone(),
                    odd: leg.odd,
                });
            }
            for probability in [leg.estimated_probability, leg.implied_probability] {
                if !(0.0..=1.0).contains(&probability) {
                    return Err(LegSetError::InvalidProbability {
                        fixture_id: leg.fixture_id.clone(),
                        probability,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Order-independent id from the legs' fixtures and outcomes.
fn accumulator_id(legs: &[Leg]) -> String {
    let mut keys: Vec<String> = legs
        .iter()
        .map(|l| format!("{}:{:?}", l.fixture_id, l.outcome))
        .collect();
    keys.sort();
    format!("acc-{}", keys.join("+"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
