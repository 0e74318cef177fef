//! Smart accumulator search.
//!
//! Searches a pool of per-fixture recommendations for a handful of
//! high-quality accumulators under leg-count, risk-band, league-diversity
//! and minimum-EV constraints.
//!
//! The search is a bounded beam search over legs ranked by value, not an
//! exhaustive enumeration: pools of 50+ fixtures make every combination
//! intractable. Results are good candidates, not a guaranteed global
//! optimum. Work is capped at `beam_width × candidate_pool` compositions
//! per leg count.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use super::composer::{AccumulatorComposer, MAX_LEGS};
use crate::types::{Accumulator, AccumulatorOrigin, AnalysisResult, Leg, RiskLevel};

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConstraints {
    pub min_legs: usize,
    pub max_legs: usize,
    /// Only return accumulators in this band, when set.
    pub target_risk: Option<RiskLevel>,
    pub max_legs_per_league: usize,
    pub min_total_ev: f64,
    pub top_k: usize,
    /// Partial combinations kept per leg count.
    pub beam_width: usize,
    /// Highest-value legs considered at all.
    pub candidate_pool: usize,
}

impl Default for OptimizerConstraints {
    fn default() -> Self {
        Self {
            min_legs: 2,
            max_legs: 4,
            target_risk: None,
            max_legs_per_league: 2,
            min_total_ev: 0.0,
            top_k: 5,
            beam_width: 8,
            candidate_pool: 30,
        }
    }
}

impl OptimizerConstraints {
    /// Bring leg bounds and budgets into a searchable range.
    fn normalized(&self) -> Self {
        let min_legs = self.min_legs.clamp(2, MAX_LEGS);
        Self {
            min_legs,
            max_legs: self.max_legs.clamp(min_legs, MAX_LEGS),
            max_legs_per_league: self.max_legs_per_league.max(1),
            beam_width: self.beam_width.max(1),
            candidate_pool: self.candidate_pool.max(min_legs),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Optimizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SmartAccumulatorOptimizer {
    composer: AccumulatorComposer,
}

impl SmartAccumulatorOptimizer {
    pub fn new(composer: AccumulatorComposer) -> Self {
        Self { composer }
    }

    /// Top-K accumulators by quality score; ties go to fewer legs.
    pub fn build(&self, pool: &[AnalysisResult], constraints: &OptimizerConstraints) -> Vec<Accumulator> {
        let c = constraints.normalized();
        let legs = ranked_legs(pool, c.candidate_pool);

        if legs.len() < c.min_legs || c.top_k == 0 {
            debug!(legs = legs.len(), min_legs = c.min_legs, "Pool too small for accumulators");
            return Vec::new();
        }

        let mut beam: Vec<Vec<usize>> = (0..legs.len()).take(c.beam_width).map(|i| vec![i]).collect();
        let mut candidates: Vec<Accumulator> = Vec::new();
        let mut evaluated = 0usize;

        for size in 2..=c.max_legs {
            let mut expansions: Vec<(Vec<usize>, Accumulator)> = Vec::new();

            for state in &beam {
                let Some(&last) = state.last() else { continue };
                for next in (last + 1)..legs.len() {
                    if !admissible(&legs, state, next, c.max_legs_per_league) {
                        continue;
                    }
                    let mut combo = state.clone();
                    combo.push(next);
                    let chosen: Vec<Leg> = combo.iter().map(|&i| legs[i].clone()).collect();
                    evaluated += 1;
                    match self.composer.compose_with_origin(chosen, AccumulatorOrigin::Smart) {
                        Ok(acc) => expansions.push((combo, acc)),
                        Err(e) => debug!(error = %e, "Candidate rejected"),
                    }
                }
            }

            if expansions.is_empty() {
                break;
            }

            expansions.sort_by(|a, b| rank(&a.1, &b.1));

            if size >= c.min_legs {
                candidates.extend(
                    expansions
                        .iter()
                        .map(|(_, acc)| acc)
                        .filter(|acc| acc.expected_value >= c.min_total_ev)
                        .filter(|acc| c.target_risk.map_or(true, |r| acc.risk_level == r))
                        .cloned(),
                );
            }

            beam = expansions
                .into_iter()
                .take(c.beam_width)
                .map(|(combo, _)| combo)
                .collect();
        }

        candidates.sort_by(rank);
        let mut seen = HashSet::new();
        candidates.retain(|acc| seen.insert(acc.id.clone()));
        candidates.truncate(c.top_k);

        info!(
            pool = pool.len(),
            legs = legs.len(),
            evaluated,
            returned = candidates.len(),
            "Smart accumulator search complete"
        );

        candidates
    }
}

/// Legs from non-skip results, best value first, one per fixture.
fn ranked_legs(pool: &[AnalysisResult], limit: usize) -> Vec<Leg> {
    let mut legs: Vec<Leg> = pool.iter().filter_map(Leg::from_analysis).collect();
    legs.sort_by(|a, b| {
        b.value_percentage
            .partial_cmp(&a.value_percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.fixture_id.cmp(&b.fixture_id))
    });
    let mut seen = HashSet::new();
    legs.retain(|l| seen.insert(l.fixture_id.clone()));
    legs.truncate(limit);
    legs
}

fn admissible(legs: &[Leg], state: &[usize], next: usize, max_per_league: usize) -> bool {
    let candidate = &legs[next];
    if state.iter().any(|&i| legs[i].fixture_id == candidate.fixture_id) {
        return false;
    }
    let mut per_league: HashMap<&str, usize> = HashMap::new();
    for &i in state {
        *per_league.entry(legs[i].league.as_str()).or_default() += 1;
    }
    per_league.get(candidate.league.as_str()).copied().unwrap_or(0) < max_per_league
}

/// Quality descending, then fewer legs, then id for a stable order.
fn rank(a: &Accumulator, b: &Accumulator) -> std::cmp::Ordering {
    b.quality_score
        .partial_cmp(&a.quality_score)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.leg_count().cmp(&b.leg_count()))
        .then_with(|| a.id.cmp(&b.id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
