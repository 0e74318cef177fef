//! Value-edge detection.
//!
//! Compares estimated probabilities to de-vigged market probabilities and
//! identifies actionable outcomes exceeding market-specific thresholds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Estimate, MarketGroup, MarketProbabilities, OutcomeEvaluation, OutcomeProbability};

// ---------------------------------------------------------------------------
// Configuration (defaults, overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Minimum value (percentage points) per market group.
/// Outcomes must exceed these to be considered actionable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub match_result_threshold: f64,
    pub totals_threshold: f64,
    pub btts_threshold: f64,
    /// Estimated probability floor; filters noise on long shots.
    pub min_probability: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            match_result_threshold: 3.0,
            totals_threshold: 3.0,
            btts_threshold: 3.0,
            min_probability: 0.05,
        }
    }
}

impl EdgeConfig {
    /// Get the threshold for a given market group.
    pub fn threshold_for(&self, group: &MarketGroup) -> f64 {
        match group {
            MarketGroup::MatchResult => self.match_result_threshold,
            MarketGroup::Totals => self.totals_threshold,
            MarketGroup::Btts => self.btts_threshold,
        }
    }
}

/// `(estimated − implied) × 100`, rounded to one decimal.
pub fn value_percentage(estimated: f64, implied: f64) -> f64 {
    ((estimated - implied) * 1000.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Edge calculation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EdgeCalculator {
    config: EdgeConfig,
}

impl EdgeCalculator {
    pub fn new(config: EdgeConfig) -> Self {
        Self { config }
    }

    /// Access the edge configuration.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Evaluate one priced outcome against an estimated probability.
    pub fn evaluate(&self, market: &OutcomeProbability, estimated: f64) -> OutcomeEvaluation {
        let edge = estimated - market.devigged;
        let value = value_percentage(estimated, market.devigged);
        let threshold = self.config.threshold_for(&market.outcome.group());
        let actionable = value > threshold && estimated > self.config.min_probability;

        debug!(
            outcome = %market.outcome,
            odd = market.odd,
            value = format!("{value:+.1}"),
            threshold,
            actionable,
            "Outcome evaluated"
        );

        OutcomeEvaluation {
            outcome: market.outcome,
            odd: market.odd,
            raw_implied: market.implied,
            implied_probability: market.devigged,
            estimated_probability: estimated,
            edge,
            value_percentage: value,
            actionable,
        }
    }

    /// Evaluate every priced outcome. Outcomes the estimator did not cover
    /// fall back to the market probability (zero edge).
    pub fn evaluate_all(&self, markets: &MarketProbabilities, estimate: &Estimate) -> Vec<OutcomeEvaluation> {
        markets
            .outcomes()
            .map(|m| {
                let estimated = estimate.probability(m.outcome).unwrap_or(m.devigged);
                self.evaluate(m, estimated)
            })
            .collect()
    }

    /// Highest-value actionable outcome. Ties keep market order.
    pub fn best<'a>(&self, evaluations: &'a [OutcomeEvaluation]) -> Option<&'a OutcomeEvaluation> {
        evaluations
            .iter()
            .filter(|e| e.actionable)
            .fold(None, |best: Option<&OutcomeEvaluation>, e| match best {
                Some(b) if b.value_percentage >= e.value_percentage => Some(b),
                _ => Some(e),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
