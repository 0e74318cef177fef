//! Probability estimation.
//!
//! Starts from the de-vigged market probability of each outcome and nudges
//! it with bounded, explainable adjustments derived from fixture signals
//! (form, head-to-head, injuries, standings, goal and BTTS trends).
//! With no signal data the estimate is the market itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{
    Estimate, Fixture, FixtureFeatures, MarketProbabilities, Outcome, OutcomeEstimate, Signal,
    SignalKind, ValueError,
};

/// Estimates are always clamped into this band.
pub const MIN_PROBABILITY: f64 = 0.01;
pub const MAX_PROBABILITY: f64 = 0.99;

// ---------------------------------------------------------------------------
// Configuration (defaults, overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Signal weights. Each weight is the largest shift (as a probability
/// fraction) a fully one-sided signal can apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub form_weight: f64,
    pub head_to_head_weight: f64,
    pub injury_weight: f64,
    pub standings_weight: f64,
    pub goal_trend_weight: f64,
    pub btts_trend_weight: f64,
    /// Hard cap on any single signal's shift.
    pub max_signal_shift: f64,
    /// Hard cap on the summed shift applied to one outcome.
    pub max_total_shift: f64,
    /// Number of recent results read from a form string.
    pub form_window: usize,
    /// Meetings required before head-to-head counts.
    pub min_head_to_head: u32,
    /// Absentee difference at which the injury signal saturates.
    pub injury_saturation: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            form_weight: 0.08,
            head_to_head_weight: 0.05,
            injury_weight: 0.06,
            standings_weight: 0.07,
            goal_trend_weight: 0.08,
            btts_trend_weight: 0.08,
            max_signal_shift: 0.15,
            max_total_shift: 0.15,
            form_window: 5,
            min_head_to_head: 3,
            injury_saturation: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Estimator trait
// ---------------------------------------------------------------------------

/// Produces a probability estimate for every priced outcome of a fixture.
///
/// Implementations must be deterministic: same inputs, same output.
#[cfg_attr(test, mockall::automock)]
pub trait ProbabilityEstimator {
    fn estimate(&self, fixture: &Fixture, markets: &MarketProbabilities) -> Estimate;
}

/// Default estimator: de-vigged market baseline plus weighted signal shifts.
#[derive(Debug, Clone, Default)]
pub struct SignalWeightedEstimator {
    config: EstimatorConfig,
}

impl SignalWeightedEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Access the estimator configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Derive every available signal from a feature bundle.
    pub fn signals(&self, features: &FixtureFeatures, markets: &MarketProbabilities) -> Vec<Signal> {
        [
            self.form_signal(features),
            self.head_to_head_signal(features),
            self.injury_signal(features),
            self.standings_signal(features),
            self.goal_trend_signal(features, markets),
            self.btts_trend_signal(features, markets),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn cap(&self, shift: f64) -> f64 {
        shift.clamp(-self.config.max_signal_shift, self.config.max_signal_shift)
    }

    /// Signal that moves home and away in opposite directions, draw untouched.
    fn match_result_signal(&self, kind: SignalKind, shift: f64, description: String) -> Option<Signal> {
        let shift = self.cap(shift);
        if shift == 0.0 || !shift.is_finite() {
            return None;
        }
        Some(Signal {
            kind,
            shifts: vec![(Outcome::Home, shift), (Outcome::Away, -shift)],
            description,
        })
    }

    fn form_signal(&self, features: &FixtureFeatures) -> Option<Signal> {
        let home = features
            .home_form
            .as_deref()
            .and_then(|f| form_score(f, self.config.form_window));
        let away = features
            .away_form
            .as_deref()
            .and_then(|f| form_score(f, self.config.form_window));
        if home.is_none() && away.is_none() {
            return None;
        }
        // A side without a usable form string counts as average.
        let (home, away) = (home.unwrap_or(0.5), away.unwrap_or(0.5));
        self.match_result_signal(
            SignalKind::Form,
            (home - away) * self.config.form_weight,
            format!(
                "Recent form: home {:.0}% of points, away {:.0}%",
                home * 100.0,
                away * 100.0
            ),
        )
    }

    fn head_to_head_signal(&self, features: &FixtureFeatures) -> Option<Signal> {
        let h2h = features.head_to_head?;
        let total = h2h.total();
        if total < self.config.min_head_to_head.max(1) {
            return None;
        }
        let balance = (h2h.home_wins as f64 - h2h.away_wins as f64) / total as f64;
        let sample = (total.min(10) as f64) / 10.0;
        self.match_result_signal(
            SignalKind::HeadToHead,
            balance * sample * self.config.head_to_head_weight,
            format!(
                "Head-to-head: {}W {}D {}L over {} meetings",
                h2h.home_wins, h2h.draws, h2h.away_wins, total
            ),
        )
    }

    fn injury_signal(&self, features: &FixtureFeatures) -> Option<Signal> {
        let injuries = features.injuries?;
        let saturation = self.config.injury_saturation.max(1) as f64;
        let diff = (injuries.away as f64 - injuries.home as f64).clamp(-saturation, saturation);
        self.match_result_signal(
            SignalKind::Injuries,
            diff / saturation * self.config.injury_weight,
            format!(
                "Key absentees: home {}, away {}",
                injuries.home, injuries.away
            ),
        )
    }

    fn standings_signal(&self, features: &FixtureFeatures) -> Option<Signal> {
        let table = features.standings?;
        let size = table.league_size;
        let valid = |p: u32| p >= 1 && p <= size;
        if size < 2 || !valid(table.home_position) || !valid(table.away_position) {
            return None;
        }
        let gap = (table.away_position as f64 - table.home_position as f64) / (size - 1) as f64;
        self.match_result_signal(
            SignalKind::Standings,
            gap * self.config.standings_weight,
            format!(
                "League position: home {} vs away {} of {}",
                table.home_position, table.away_position, size
            ),
        )
    }

    fn goal_trend_signal(&self, features: &FixtureFeatures, markets: &MarketProbabilities) -> Option<Signal> {
        let goals = features.goals?;
        let expected = goals.expected_total();
        if !expected.is_finite() || expected < 0.0 || !markets.total_line.is_finite() {
            return None;
        }
        // A 1.5-goal gap to the line saturates the signal.
        let gap = ((expected - markets.total_line) / 1.5).clamp(-1.0, 1.0);
        let shift = self.cap(gap * self.config.goal_trend_weight);
        if shift == 0.0 {
            return None;
        }
        Some(Signal {
            kind: SignalKind::GoalTrend,
            shifts: vec![(Outcome::Over, shift), (Outcome::Under, -shift)],
            description: format!(
                "Expected {:.2} goals against a {:.1} line",
                expected, markets.total_line
            ),
        })
    }

    fn btts_trend_signal(&self, features: &FixtureFeatures, markets: &MarketProbabilities) -> Option<Signal> {
        let rates = features.btts_rates?;
        if !rates.home.is_finite() || !rates.away.is_finite() {
            return None;
        }
        let observed = ((rates.home + rates.away) / 2.0).clamp(0.0, 1.0);
        let priced = markets
            .get(Outcome::BttsYes)
            .map(|p| p.devigged)
            .unwrap_or(0.5);
        // A 25-point gap to the priced rate saturates the signal.
        let gap = ((observed - priced) / 0.25).clamp(-1.0, 1.0);
        let shift = self.cap(gap * self.config.btts_trend_weight);
        if shift == 0.0 {
            return None;
        }
        Some(Signal {
            kind: SignalKind::BttsTrend,
            shifts: vec![(Outcome::BttsYes, shift), (Outcome::BttsNo, -shift)],
            description: format!(
                "Both teams scored in {:.0}% of recent matches vs {:.0}% priced",
                observed * 100.0,
                priced * 100.0
            ),
        })
    }
}

impl ProbabilityEstimator for SignalWeightedEstimator {
    fn estimate(&self, fixture: &Fixture, markets: &MarketProbabilities) -> Estimate {
        let signals = fixture
            .features
            .as_ref()
            .map(|f| self.signals(f, markets))
            .unwrap_or_default();

        let outcomes = markets
            .outcomes()
            .map(|market| {
                let total: f64 = signals.iter().map(|s| s.shift_for(market.outcome)).sum();
                let total = total.clamp(-self.config.max_total_shift, self.config.max_total_shift);
                OutcomeEstimate {
                    outcome: market.outcome,
                    baseline: market.devigged,
                    estimated: clamp_probability(market.outcome, market.devigged + total),
                }
            })
            .collect();

        debug!(
            fixture_id = %fixture.id,
            signals = signals.len(),
            "Estimate complete"
        );

        Estimate { outcomes, signals }
    }
}

/// Clamp into [MIN_PROBABILITY, MAX_PROBABILITY], logging values that fell
/// outside (0, 1) before clamping.
pub fn clamp_probability(outcome: Outcome, value: f64) -> f64 {
    if !(value > 0.0 && value < 1.0) {
        let err = ValueError::DegenerateProbability { outcome, value };
        warn!(error = %err, "Clamping degenerate probability");
    }
    if value.is_nan() {
        return MIN_PROBABILITY;
    }
    value.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

/// Share of available points (W=3, D=1, L=0) over the most recent `window`
/// results. Unknown characters are ignored.
pub fn form_score(form: &str, window: usize) -> Option<f64> {
    let points: Vec<u32> = form
        .chars()
        .filter_map(|c| match c.to_ascii_uppercase() {
            'W' => Some(3),
            'D' => Some(1),
            'L' => Some(0),
            _ => None,
        })
        .take(window.max(1))
        .collect();
    if points.is_empty() {
        return None;
    }
    Some(points.iter().sum::<u32>() as f64 / (3 * points.len()) as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
