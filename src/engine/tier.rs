//! Tier gate: truncates engine output to a subscription tier's allowance.
//!
//! Pure filter over already-computed results. Nothing is re-derived or
//! modified, only dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Accumulator, AccumulatorOrigin, AnalysisResult, Tier};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Caps for one tier, as written in `[tiers.*]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    pub max_singles: usize,
    pub max_accumulators: usize,
    /// Whether optimizer-built accumulators are visible at all.
    pub smart_accumulators: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub free: TierLimits,
    pub basic: TierLimits,
    pub advanced: TierLimits,
    pub premium: TierLimits,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            free: TierLimits { max_singles: 2, max_accumulators: 0, smart_accumulators: false },
            basic: TierLimits { max_singles: 5, max_accumulators: 1, smart_accumulators: false },
            advanced: TierLimits { max_singles: 15, max_accumulators: 3, smart_accumulators: true },
            premium: TierLimits { max_singles: 50, max_accumulators: 10, smart_accumulators: true },
        }
    }
}

impl TierTable {
    pub fn limits(&self, tier: Tier) -> TierLimits {
        match tier {
            Tier::Free => self.free,
            Tier::Basic => self.basic,
            Tier::Advanced => self.advanced,
            Tier::Premium => self.premium,
        }
    }

    pub fn config(&self, tier: Tier) -> TierConfig {
        TierConfig::new(tier, self.limits(tier))
    }
}

/// Immutable per-tier gate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    pub tier: Tier,
    pub max_singles: usize,
    pub max_accumulators: usize,
    pub smart_accumulators: bool,
}

impl TierConfig {
    pub fn new(tier: Tier, limits: TierLimits) -> Self {
        Self {
            tier,
            max_singles: limits.max_singles,
            max_accumulators: limits.max_accumulators,
            smart_accumulators: limits.smart_accumulators,
        }
    }
}

/// What a caller at a given tier is allowed to see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierView {
    pub tier: Tier,
    pub results: Vec<AnalysisResult>,
    pub accumulators: Vec<Accumulator>,
    /// Items withheld by the gate.
    pub hidden_results: usize,
    pub hidden_accumulators: usize,
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Keep the first `max_singles` results and `max_accumulators`
/// accumulators, dropping optimizer output first if the tier can't see it.
/// Input order is preserved, so callers sort before gating.
pub fn apply_tier_limits(
    results: Vec<AnalysisResult>,
    accumulators: Vec<Accumulator>,
    config: &TierConfig,
) -> TierView {
    let total_results = results.len();
    let total_accumulators = accumulators.len();

    let mut results = results;
    results.truncate(config.max_singles);

    let mut accumulators: Vec<Accumulator> = accumulators
        .into_iter()
        .filter(|a| config.smart_accumulators || a.origin != AccumulatorOrigin::Smart)
        .collect();
    accumulators.truncate(config.max_accumulators);

    let view = TierView {
        tier: config.tier,
        hidden_results: total_results - results.len(),
        hidden_accumulators: total_accumulators - accumulators.len(),
        results,
        accumulators,
    };

    debug!(
        tier = %view.tier,
        results = view.results.len(),
        hidden_results = view.hidden_results,
        accumulators = view.accumulators.len(),
        hidden_accumulators = view.hidden_accumulators,
        "Tier limits applied"
    );

    view
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
