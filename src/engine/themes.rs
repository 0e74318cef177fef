//! Themed accumulators: "all overs", "BTTS treble", "favourites double".
//!
//! Unlike the optimizer these pick a fixed outcome per fixture regardless
//! of which outcome the analyzer recommended, then take the most likely
//! qualifying legs.

use tracing::debug;

use super::composer::AccumulatorComposer;
use crate::types::{
    Accumulator, AccumulatorOrigin, AccumulatorTheme, AnalysisResult, Leg, LegSetError, Outcome,
    OutcomeEvaluation, ValueError,
};

impl AccumulatorTheme {
    pub const ALL: &'static [AccumulatorTheme] = &[
        AccumulatorTheme::OverGoals,
        AccumulatorTheme::Btts,
        AccumulatorTheme::Favourites,
        AccumulatorTheme::HomeWins,
    ];

    /// Minimum estimated probability for a leg to qualify.
    pub fn probability_floor(&self) -> f64 {
        match self {
            AccumulatorTheme::HomeWins => 0.45,
            _ => 0.50,
        }
    }

    /// The evaluated outcome this theme would back on a fixture.
    fn pick<'a>(&self, result: &'a AnalysisResult) -> Option<&'a OutcomeEvaluation> {
        match self {
            AccumulatorTheme::OverGoals => result.evaluation(Outcome::Over),
            AccumulatorTheme::Btts => result.evaluation(Outcome::BttsYes),
            AccumulatorTheme::HomeWins => result.evaluation(Outcome::Home),
            AccumulatorTheme::Favourites => [Outcome::Home, Outcome::Away]
                .iter()
                .filter_map(|o| result.evaluation(*o))
                .min_by(|a, b| a.odd.partial_cmp(&b.odd).unwrap_or(std::cmp::Ordering::Equal)),
        }
    }
}

/// Qualifying legs for a theme, most likely first.
pub fn themed_legs(pool: &[AnalysisResult], theme: AccumulatorTheme) -> Vec<Leg> {
    let floor = theme.probability_floor();
    let mut legs: Vec<Leg> = pool
        .iter()
        .filter(|r| !r.is_skip)
        .filter_map(|r| {
            let evaluation = theme.pick(r)?;
            (evaluation.estimated_probability >= floor && evaluation.edge > 0.0)
                .then(|| Leg::from_evaluation(r, evaluation))
        })
        .collect();
    legs.sort_by(|a, b| {
        b.estimated_probability
            .partial_cmp(&a.estimated_probability)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.fixture_id.cmp(&b.fixture_id))
    });
    legs
}

/// Compose the `legs` most likely qualifying legs for `theme`.
pub fn build_themed_accumulator(
    composer: &AccumulatorComposer,
    pool: &[AnalysisResult],
    theme: AccumulatorTheme,
    legs: usize,
) -> Result<Accumulator, ValueError> {
    let mut candidates = themed_legs(pool, theme);
    debug!(theme = %theme, qualifying = candidates.len(), requested = legs, "Themed leg selection");

    if candidates.len() < legs {
        return Err(LegSetError::TooFewLegs {
            count: candidates.len(),
            min: legs,
        }
        .into());
    }
    candidates.truncate(legs);
    composer.compose_with_origin(candidates, AccumulatorOrigin::Themed(theme))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
