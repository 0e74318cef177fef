//! Single-fixture analysis.
//!
//! Runs one fixture through normalisation → estimation → edge detection →
//! confidence scoring and returns either a recommendation or a skip
//! verdict. Never fails: malformed input degrades to a skip.

use tracing::{debug, info};

use crate::strategy::confidence::ConfidenceScorer;
use crate::strategy::edge::{value_percentage, EdgeCalculator};
use crate::strategy::estimator::{ProbabilityEstimator, SignalWeightedEstimator};
use crate::strategy::odds::normalize_odds;
use crate::types::{
    AnalysisResult, Estimate, Fixture, OddsSet, OutcomeEvaluation, Polarity, ReasonFactor,
    RecommendedType,
};

pub struct SingleBetAnalyzer<E = SignalWeightedEstimator> {
    estimator: E,
    edge: EdgeCalculator,
    confidence: ConfidenceScorer,
}

impl Default for SingleBetAnalyzer {
    fn default() -> Self {
        Self::new(
            SignalWeightedEstimator::default(),
            EdgeCalculator::default(),
            ConfidenceScorer::default(),
        )
    }
}

impl<E: ProbabilityEstimator> SingleBetAnalyzer<E> {
    pub fn new(estimator: E, edge: EdgeCalculator, confidence: ConfidenceScorer) -> Self {
        Self {
            estimator,
            edge,
            confidence,
        }
    }

    pub fn edge_calculator(&self) -> &EdgeCalculator {
        &self.edge
    }

    /// Evaluate every available market of a fixture and pick the outcome
    /// with the highest actionable value.
    pub fn analyze(&self, fixture: &Fixture, odds: &OddsSet) -> AnalysisResult {
        let markets = normalize_odds(odds);
        if markets.is_empty() {
            debug!(fixture_id = %fixture.id, "No valid markets quoted");
            return skip(fixture, Vec::new(), "No valid markets quoted for this fixture".into());
        }

        let estimate = self.estimator.estimate(fixture, &markets);
        let evaluations = self.edge.evaluate_all(&markets, &estimate);

        let Some(best) = self.edge.best(&evaluations).copied() else {
            let explanation = efficiency_note(&evaluations);
            debug!(fixture_id = %fixture.id, %explanation, "Fixture skipped");
            return skip(fixture, evaluations, explanation);
        };

        let reason_factors = reason_factors(&estimate, &best);
        let shifts: Vec<f64> = estimate
            .contributions(best.outcome)
            .into_iter()
            .map(|(_, shift)| shift)
            .collect();
        let confidence = self.confidence.score(best.value_percentage, &shifts);

        info!(
            fixture_id = %fixture.id,
            outcome = %best.outcome,
            odd = best.odd,
            value = format!("{:+.1}", best.value_percentage),
            confidence,
            "Value found"
        );

        AnalysisResult {
            fixture_id: fixture.id.clone(),
            home_team: fixture.home_team.clone(),
            away_team: fixture.away_team.clone(),
            league: fixture.league.clone(),
            kickoff: fixture.kickoff,
            recommended_type: best.outcome.recommended_type(),
            outcome: Some(best.outcome),
            odd: Some(best.odd),
            implied_probability: best.implied_probability,
            estimated_probability: best.estimated_probability,
            value_percentage: best.value_percentage,
            edge: best.edge,
            confidence,
            explanation: format!(
                "{} priced at {:.1}% but estimated at {:.1}%",
                best.outcome,
                best.implied_probability * 100.0,
                best.estimated_probability * 100.0
            ),
            reason_factors,
            is_skip: false,
            evaluations,
        }
    }
}

/// Signals that moved the chosen outcome, strongest first.
fn reason_factors(estimate: &Estimate, best: &OutcomeEvaluation) -> Vec<ReasonFactor> {
    let mut factors: Vec<ReasonFactor> = estimate
        .contributions(best.outcome)
        .into_iter()
        .map(|(signal, shift)| ReasonFactor {
            name: signal.kind,
            polarity: if shift > 0.0 { Polarity::Positive } else { Polarity::Negative },
            impact: value_percentage(shift, 0.0),
            description: signal.description.clone(),
        })
        .collect();
    factors.sort_by(|a, b| {
        b.impact
            .abs()
            .partial_cmp(&a.impact.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    factors
}

fn efficiency_note(evaluations: &[OutcomeEvaluation]) -> String {
    let closest = evaluations.iter().fold(None, |best: Option<&OutcomeEvaluation>, e| match best {
        Some(b) if b.value_percentage >= e.value_percentage => Some(b),
        _ => Some(e),
    });
    match closest {
        Some(e) => format!(
            "Market is efficiently priced: best value {:+.1} pts on {}",
            e.value_percentage, e.outcome
        ),
        None => "Market is efficiently priced".to_string(),
    }
}

fn skip(fixture: &Fixture, evaluations: Vec<OutcomeEvaluation>, explanation: String) -> AnalysisResult {
    AnalysisResult {
        fixture_id: fixture.id.clone(),
        home_team: fixture.home_team.clone(),
        away_team: fixture.away_team.clone(),
        league: fixture.league.clone(),
        kickoff: fixture.kickoff,
        recommended_type: RecommendedType::Skip,
        outcome: None,
        odd: None,
        implied_probability: 0.0,
        estimated_probability: 0.0,
        value_percentage: 0.0,
        edge: 0.0,
        confidence: 0,
        reason_factors: Vec::new(),
        is_skip: true,
        explanation,
        evaluations,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
