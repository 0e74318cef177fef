//! Core engine: analyze → compose → optimize → gate.
//!
//! `ValueEngine` wires the strategy layer together from an `AppConfig`
//! and runs a whole slate of fixtures for one subscription tier. The free
//! functions at the bottom are the same operations with default settings.

pub mod analyzer;
pub mod composer;
pub mod optimizer;
pub mod themes;
pub mod tier;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::strategy::confidence::ConfidenceScorer;
use crate::strategy::edge::EdgeCalculator;
use crate::strategy::estimator::SignalWeightedEstimator;
use crate::strategy::kelly::KellyCalculator;
use crate::types::{
    Accumulator, AccumulatorTheme, AnalysisResult, Fixture, Leg, OddsSet, Tier, ValueError,
};

use analyzer::SingleBetAnalyzer;
use composer::AccumulatorComposer;
use optimizer::{OptimizerConstraints, SmartAccumulatorOptimizer};
use tier::{TierConfig, TierTable};

pub use tier::apply_tier_limits;

// ---------------------------------------------------------------------------
// Request / report
// ---------------------------------------------------------------------------

/// One fixture with its bookmaker prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureOdds {
    pub fixture: Fixture,
    pub odds: OddsSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub fixtures: usize,
    pub actionable: usize,
    pub skipped: usize,
    pub accumulators_built: usize,
    pub accumulators_shown: usize,
    pub results_shown: usize,
}

/// Tier-gated output of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    pub tier: Tier,
    pub results: Vec<AnalysisResult>,
    pub accumulators: Vec<Accumulator>,
    pub summary: ReportSummary,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct ValueEngine {
    analyzer: SingleBetAnalyzer,
    composer: AccumulatorComposer,
    optimizer: SmartAccumulatorOptimizer,
    constraints: OptimizerConstraints,
    tiers: TierTable,
}

impl Default for ValueEngine {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl ValueEngine {
    pub fn new(cfg: &AppConfig) -> Self {
        let composer = AccumulatorComposer::new(
            cfg.accumulator.clone(),
            KellyCalculator::new(cfg.stake.clone()),
        );
        Self {
            analyzer: SingleBetAnalyzer::new(
                SignalWeightedEstimator::new(cfg.estimator.clone()),
                EdgeCalculator::new(cfg.analysis.clone()),
                ConfidenceScorer::new(cfg.confidence.clone()),
            ),
            optimizer: SmartAccumulatorOptimizer::new(composer.clone()),
            composer,
            constraints: cfg.optimizer.clone(),
            tiers: cfg.tiers.clone(),
        }
    }

    pub fn analyzer(&self) -> &SingleBetAnalyzer {
        &self.analyzer
    }

    pub fn composer(&self) -> &AccumulatorComposer {
        &self.composer
    }

    pub fn tier_config(&self, tier: Tier) -> TierConfig {
        self.tiers.config(tier)
    }

    /// Analyze fixtures in parallel. Actionable results come first, best
    /// value first; the order never depends on scheduling.
    pub fn analyze_batch(&self, request: &[FixtureOdds]) -> Vec<AnalysisResult> {
        let mut results: Vec<AnalysisResult> = request
            .par_iter()
            .map(|item| self.analyzer.analyze(&item.fixture, &item.odds))
            .collect();
        results.sort_by(rank_results);
        results
    }

    pub fn compose_accumulator(&self, legs: Vec<Leg>) -> Result<Accumulator, ValueError> {
        self.composer.compose(legs)
    }

    /// Optimizer run with the configured default constraints.
    pub fn build_smart_accumulators(&self, pool: &[AnalysisResult]) -> Vec<Accumulator> {
        self.optimizer.build(pool, &self.constraints)
    }

    pub fn build_smart_accumulators_with(
        &self,
        pool: &[AnalysisResult],
        constraints: &OptimizerConstraints,
    ) -> Vec<Accumulator> {
        self.optimizer.build(pool, constraints)
    }

    pub fn themed_accumulator(
        &self,
        pool: &[AnalysisResult],
        theme: AccumulatorTheme,
        legs: usize,
    ) -> Result<Accumulator, ValueError> {
        themes::build_themed_accumulator(&self.composer, pool, theme, legs)
    }

    /// Every theme that has enough qualifying legs and clears the minimum
    /// EV, best quality first.
    pub fn themed_accumulators(&self, pool: &[AnalysisResult]) -> Vec<Accumulator> {
        let legs = self.composer.config().themed_legs;
        let mut built: Vec<Accumulator> = AccumulatorTheme::ALL
            .iter()
            .filter_map(|&theme| match self.themed_accumulator(pool, theme, legs) {
                Ok(acc) if acc.expected_value >= self.constraints.min_total_ev => Some(acc),
                Ok(acc) => {
                    debug!(
                        theme = %theme,
                        ev = format!("{:+.4}", acc.expected_value),
                        "Themed accumulator below minimum EV"
                    );
                    None
                }
                Err(e) => {
                    debug!(theme = %theme, error = %e, "Themed accumulator not built");
                    None
                }
            })
            .collect();
        built.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(Ordering::Equal)
        });
        built
    }

    /// Full pipeline for one tier.
    pub fn run(&self, request: &[FixtureOdds], tier: Tier) -> EngineReport {
        let results = self.analyze_batch(request);
        let actionable = results.iter().filter(|r| !r.is_skip).count();

        let mut accumulators = self.build_smart_accumulators(&results);
        accumulators.extend(self.themed_accumulators(&results));
        let accumulators_built = accumulators.len();

        // Skips are informational; only recommendations count against the cap.
        let recommendations: Vec<AnalysisResult> =
            results.into_iter().filter(|r| !r.is_skip).collect();
        let view = apply_tier_limits(recommendations, accumulators, &self.tier_config(tier));

        let summary = ReportSummary {
            fixtures: request.len(),
            actionable,
            skipped: request.len() - actionable,
            accumulators_built,
            accumulators_shown: view.accumulators.len(),
            results_shown: view.results.len(),
        };

        info!(
            tier = %tier,
            fixtures = summary.fixtures,
            actionable = summary.actionable,
            skipped = summary.skipped,
            accumulators = format!("{}/{}", summary.accumulators_shown, summary.accumulators_built),
            "Pipeline run complete"
        );

        EngineReport {
            tier,
            results: view.results,
            accumulators: view.accumulators,
            summary,
        }
    }
}

fn rank_results(a: &AnalysisResult, b: &AnalysisResult) -> Ordering {
    a.is_skip
        .cmp(&b.is_skip)
        .then_with(|| {
            b.value_percentage
                .partial_cmp(&a.value_percentage)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.fixture_id.cmp(&b.fixture_id))
}

// ---------------------------------------------------------------------------
// Default-configured entry points
// ---------------------------------------------------------------------------

pub fn analyze_fixture(fixture: &Fixture, odds: &OddsSet) -> AnalysisResult {
    SingleBetAnalyzer::default().analyze(fixture, odds)
}

pub fn compose_accumulator(legs: Vec<Leg>) -> Result<Accumulator, ValueError> {
    AccumulatorComposer::default().compose(legs)
}

pub fn build_smart_accumulators(
    pool: &[AnalysisResult],
    constraints: &OptimizerConstraints,
) -> Vec<Accumulator> {
    SmartAccumulatorOptimizer::default().build(pool, constraints)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
