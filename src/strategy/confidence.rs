//! Confidence scoring.
//!
//! Maps edge size and signal support to a 0–100 score. Supporting signals
//! raise it; signals pulling the other way cancel strength and add a
//! penalty, so conflicting evidence never averages into a high score.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Score of a recommendation with no edge and no signals.
    pub base: f64,
    pub edge_weight: f64,
    /// Value (percentage points) at which edge points saturate.
    pub edge_saturation: f64,
    pub coverage_weight: f64,
    /// Supporting-signal count at which coverage points saturate.
    pub coverage_saturation: usize,
    pub strength_weight: f64,
    /// Net shift at which strength points saturate.
    pub strength_saturation: f64,
    pub conflict_weight: f64,
    /// Opposing shift at which the conflict penalty saturates.
    pub conflict_saturation: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 20.0,
            edge_weight: 35.0,
            edge_saturation: 15.0,
            coverage_weight: 15.0,
            coverage_saturation: 6,
            strength_weight: 30.0,
            strength_saturation: 0.12,
            conflict_weight: 30.0,
            conflict_saturation: 0.05,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Score a recommendation from its value (percentage points) and the
    /// signed shifts each signal applied to the recommended outcome.
    pub fn score(&self, value_percentage: f64, shifts: &[f64]) -> u8 {
        let c = &self.config;

        let supporting: f64 = shifts.iter().filter(|s| **s > 0.0).sum();
        let opposing: f64 = shifts.iter().filter(|s| **s < 0.0).map(|s| s.abs()).sum();
        let net = (supporting - opposing).max(0.0);
        // Only signals backing the pick count as coverage.
        let backing = shifts.iter().filter(|s| **s > 0.0).count();

        let edge_points = c.edge_weight * saturate(value_percentage.max(0.0), c.edge_saturation);
        let coverage_points =
            c.coverage_weight * saturate(backing as f64, c.coverage_saturation as f64);
        let strength_points = c.strength_weight * saturate(net, c.strength_saturation);
        let conflict_penalty =
            c.conflict_weight * saturate(supporting.min(opposing), c.conflict_saturation);

        let score = c.base + edge_points + coverage_points + strength_points - conflict_penalty;
        score.clamp(0.0, 100.0).round() as u8
    }
}

/// `value / limit`, clamped to [0, 1].
fn saturate(value: f64, limit: f64) -> f64 {
    if limit <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / limit).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
