//! Shared types for the VALUEBET engine.
//!
//! These types form the data model used across all modules.
//! Everything here is created fresh per scoring request from
//! caller-supplied fixtures and odds; nothing is persisted.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// A scheduled match between two teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: DateTime<Utc>,
    /// Optional signal bundle consumed by the probability estimator.
    #[serde(default)]
    pub features: Option<FixtureFeatures>,
}

impl Fixture {
    /// "Home v Away" label used in legs and logs.
    pub fn label(&self) -> String {
        format!("{} v {}", self.home_team, self.away_team)
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}, {})",
            self.id,
            self.label(),
            self.league,
            self.kickoff.format("%Y-%m-%d %H:%M"),
        )
    }
}

/// Per-fixture signal data. Every field is individually optional; an empty
/// bundle makes the estimator fall back to the de-vigged market.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureFeatures {
    /// Recent results, most recent first, e.g. "WWDLW".
    #[serde(default)]
    pub home_form: Option<String>,
    #[serde(default)]
    pub away_form: Option<String>,
    #[serde(default)]
    pub head_to_head: Option<HeadToHead>,
    #[serde(default)]
    pub injuries: Option<InjuryReport>,
    #[serde(default)]
    pub standings: Option<Standings>,
    #[serde(default)]
    pub goals: Option<GoalProfile>,
    #[serde(default)]
    pub btts_rates: Option<BttsRates>,
}

impl FixtureFeatures {
    /// True when no signal data is present at all.
    pub fn is_empty(&self) -> bool {
        self.home_form.is_none()
            && self.away_form.is_none()
            && self.head_to_head.is_none()
            && self.injuries.is_none()
            && self.standings.is_none()
            && self.goals.is_none()
            && self.btts_rates.is_none()
    }
}

/// Previous meetings, counted from the current home team's perspective.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HeadToHead {
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
}

impl HeadToHead {
    pub fn total(&self) -> u32 {
        self.home_wins + self.draws + self.away_wins
    }
}

/// Key-player absentee counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InjuryReport {
    pub home: u32,
    pub away: u32,
}

/// League table positions (1 = top).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Standings {
    pub home_position: u32,
    pub away_position: u32,
    pub league_size: u32,
}

/// Average goals per match over recent fixtures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalProfile {
    pub home_scored_avg: f64,
    pub home_conceded_avg: f64,
    pub away_scored_avg: f64,
    pub away_conceded_avg: f64,
}

impl GoalProfile {
    /// Expected total goals from the four averages.
    pub fn expected_total(&self) -> f64 {
        (self.home_scored_avg + self.away_conceded_avg) / 2.0
            + (self.away_scored_avg + self.home_conceded_avg) / 2.0
    }
}

/// Share (0–1) of recent matches in which both teams scored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BttsRates {
    pub home: f64,
    pub away: f64,
}

// ---------------------------------------------------------------------------
// Markets & outcomes
// ---------------------------------------------------------------------------

/// A mutually exclusive group of outcomes, de-vigged together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketGroup {
    MatchResult,
    Totals,
    Btts,
}

impl MarketGroup {
    pub const ALL: &'static [MarketGroup] =
        &[MarketGroup::MatchResult, MarketGroup::Totals, MarketGroup::Btts];

    /// Outcomes that make up this group.
    pub fn outcomes(&self) -> &'static [Outcome] {
        match self {
            MarketGroup::MatchResult => &[Outcome::Home, Outcome::Draw, Outcome::Away],
            MarketGroup::Totals => &[Outcome::Over, Outcome::Under],
            MarketGroup::Btts => &[Outcome::BttsYes, Outcome::BttsNo],
        }
    }
}

impl fmt::Display for MarketGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketGroup::MatchResult => write!(f, "1X2"),
            MarketGroup::Totals => write!(f, "Totals"),
            MarketGroup::Btts => write!(f, "BTTS"),
        }
    }
}

/// A single priced outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Home,
    Draw,
    Away,
    Over,
    Under,
    BttsYes,
    BttsNo,
}

impl Outcome {
    pub const ALL: &'static [Outcome] = &[
        Outcome::Home,
        Outcome::Draw,
        Outcome::Away,
        Outcome::Over,
        Outcome::Under,
        Outcome::BttsYes,
        Outcome::BttsNo,
    ];

    pub fn group(&self) -> MarketGroup {
        match self {
            Outcome::Home | Outcome::Draw | Outcome::Away => MarketGroup::MatchResult,
            Outcome::Over | Outcome::Under => MarketGroup::Totals,
            Outcome::BttsYes | Outcome::BttsNo => MarketGroup::Btts,
        }
    }

    pub fn recommended_type(&self) -> RecommendedType {
        match self {
            Outcome::Home => RecommendedType::HomeWin,
            Outcome::Draw => RecommendedType::Draw,
            Outcome::Away => RecommendedType::AwayWin,
            Outcome::Over => RecommendedType::Over,
            Outcome::Under => RecommendedType::Under,
            Outcome::BttsYes => RecommendedType::Btts,
            Outcome::BttsNo => RecommendedType::BttsNo,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Home => write!(f, "Home"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Away => write!(f, "Away"),
            Outcome::Over => write!(f, "Over"),
            Outcome::Under => write!(f, "Under"),
            Outcome::BttsYes => write!(f, "BTTS Yes"),
            Outcome::BttsNo => write!(f, "BTTS No"),
        }
    }
}

fn default_total_line() -> f64 {
    2.5
}

/// One fixture's quoted decimal odds. A missing or zero value means the
/// outcome is not offered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsSet {
    #[serde(default)]
    pub home: Option<f64>,
    #[serde(default)]
    pub draw: Option<f64>,
    #[serde(default)]
    pub away: Option<f64>,
    #[serde(default)]
    pub over: Option<f64>,
    #[serde(default)]
    pub under: Option<f64>,
    #[serde(default)]
    pub btts_yes: Option<f64>,
    #[serde(default)]
    pub btts_no: Option<f64>,
    /// Goal line for the over/under pair.
    #[serde(default = "default_total_line")]
    pub total_line: f64,
}

impl Default for OddsSet {
    fn default() -> Self {
        Self {
            home: None,
            draw: None,
            away: None,
            over: None,
            under: None,
            btts_yes: None,
            btts_no: None,
            total_line: default_total_line(),
        }
    }
}

impl OddsSet {
    /// Quoted odd for an outcome, as supplied (may be zero or invalid).
    pub fn odd(&self, outcome: Outcome) -> Option<f64> {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
            Outcome::Over => self.over,
            Outcome::Under => self.under,
            Outcome::BttsYes => self.btts_yes,
            Outcome::BttsNo => self.btts_no,
        }
    }

    /// Helper for the common 1X2-only case.
    pub fn match_result(home: f64, draw: f64, away: f64) -> Self {
        Self {
            home: Some(home),
            draw: Some(draw),
            away: Some(away),
            ..Default::default()
        }
    }
}

/// Implied and de-vigged probability of one outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutcomeProbability {
    pub outcome: Outcome,
    pub odd: f64,
    /// 1 / odd
    pub implied: f64,
    /// implied normalised across the group so the group sums to 1.0
    pub devigged: f64,
}

/// A fully quoted, de-vigged market group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupProbabilities {
    pub group: MarketGroup,
    pub outcomes: Vec<OutcomeProbability>,
    /// Bookmaker margin: sum of implied probabilities − 1.
    pub overround: f64,
}

/// A market group excluded from computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableMarket {
    pub group: MarketGroup,
    pub reason: String,
}

/// Output of odds normalisation for one fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketProbabilities {
    pub available: Vec<GroupProbabilities>,
    pub unavailable: Vec<UnavailableMarket>,
    /// Goal line the totals group is priced around.
    pub total_line: f64,
}

impl MarketProbabilities {
    /// Look up a priced outcome, if its group is available.
    pub fn get(&self, outcome: Outcome) -> Option<&OutcomeProbability> {
        self.available
            .iter()
            .filter(|g| g.group == outcome.group())
            .flat_map(|g| g.outcomes.iter())
            .find(|o| o.outcome == outcome)
    }

    /// Every priced outcome across all available groups.
    pub fn outcomes(&self) -> impl Iterator<Item = &OutcomeProbability> {
        self.available.iter().flat_map(|g| g.outcomes.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Estimates
// ---------------------------------------------------------------------------

/// Named input signal used by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Form,
    HeadToHead,
    Injuries,
    Standings,
    GoalTrend,
    BttsTrend,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Form => write!(f, "Form"),
            SignalKind::HeadToHead => write!(f, "Head-to-head"),
            SignalKind::Injuries => write!(f, "Injuries"),
            SignalKind::Standings => write!(f, "Standings"),
            SignalKind::GoalTrend => write!(f, "Goal trend"),
            SignalKind::BttsTrend => write!(f, "BTTS trend"),
        }
    }
}

/// One signal's bounded probability adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    /// Probability shift per affected outcome (fraction, not points).
    pub shifts: Vec<(Outcome, f64)>,
    pub description: String,
}

impl Signal {
    pub fn shift_for(&self, outcome: Outcome) -> f64 {
        self.shifts
            .iter()
            .find(|(o, _)| *o == outcome)
            .map(|(_, s)| *s)
            .unwrap_or(0.0)
    }
}

/// Baseline and adjusted probability of one outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutcomeEstimate {
    pub outcome: Outcome,
    /// De-vigged market probability.
    pub baseline: f64,
    /// Signal-adjusted probability, clamped to [0.01, 0.99].
    pub estimated: f64,
}

/// Estimator output for one fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Estimate {
    pub outcomes: Vec<OutcomeEstimate>,
    pub signals: Vec<Signal>,
}

impl Estimate {
    pub fn probability(&self, outcome: Outcome) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.outcome == outcome)
            .map(|o| o.estimated)
    }

    /// Signals that moved the given outcome, with their signed shift.
    pub fn contributions(&self, outcome: Outcome) -> Vec<(&Signal, f64)> {
        self.signals
            .iter()
            .map(|s| (s, s.shift_for(outcome)))
            .filter(|(_, shift)| *shift != 0.0)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Analysis result
// ---------------------------------------------------------------------------

/// Verdict for a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedType {
    HomeWin,
    AwayWin,
    Draw,
    Over,
    Under,
    Btts,
    BttsNo,
    Skip,
}

impl fmt::Display for RecommendedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendedType::HomeWin => write!(f, "HOME_WIN"),
            RecommendedType::AwayWin => write!(f, "AWAY_WIN"),
            RecommendedType::Draw => write!(f, "DRAW"),
            RecommendedType::Over => write!(f, "OVER"),
            RecommendedType::Under => write!(f, "UNDER"),
            RecommendedType::Btts => write!(f, "BTTS"),
            RecommendedType::BttsNo => write!(f, "BTTS_NO"),
            RecommendedType::Skip => write!(f, "SKIP"),
        }
    }
}

/// Direction in which a signal moved the recommended outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// A named driver of the estimate, kept for auditability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonFactor {
    pub name: SignalKind,
    pub polarity: Polarity,
    /// Signed shift in percentage points.
    pub impact: f64,
    pub description: String,
}

/// Edge evaluation of one priced outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutcomeEvaluation {
    pub outcome: Outcome,
    pub odd: f64,
    /// Raw 1 / odd.
    pub raw_implied: f64,
    /// De-vigged implied probability.
    pub implied_probability: f64,
    pub estimated_probability: f64,
    /// estimated − implied, exact.
    pub edge: f64,
    /// edge × 100, rounded to one decimal.
    pub value_percentage: f64,
    pub actionable: bool,
}

/// Per-fixture recommendation (or skip verdict).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub fixture_id: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: DateTime<Utc>,
    pub recommended_type: RecommendedType,
    pub outcome: Option<Outcome>,
    pub odd: Option<f64>,
    pub implied_probability: f64,
    pub estimated_probability: f64,
    pub value_percentage: f64,
    pub edge: f64,
    /// 0–100
    pub confidence: u8,
    pub reason_factors: Vec<ReasonFactor>,
    pub is_skip: bool,
    pub explanation: String,
    /// Every priced outcome, in market order.
    pub evaluations: Vec<OutcomeEvaluation>,
}

impl AnalysisResult {
    pub fn label(&self) -> String {
        format!("{} v {}", self.home_team, self.away_team)
    }

    /// Evaluation of a specific outcome, if it was priced.
    pub fn evaluation(&self, outcome: Outcome) -> Option<&OutcomeEvaluation> {
        self.evaluations.iter().find(|e| e.outcome == outcome)
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_skip {
            return write!(f, "{} SKIP: {}", self.label(), self.explanation);
        }
        write!(
            f,
            "{} {} @ {:.2} | est={:.1}% impl={:.1}% value={:+.1} | conf={}",
            self.label(),
            self.recommended_type,
            self.odd.unwrap_or(0.0),
            self.estimated_probability * 100.0,
            self.implied_probability * 100.0,
            self.value_percentage,
            self.confidence,
        )
    }
}

// ---------------------------------------------------------------------------
// Accumulators
// ---------------------------------------------------------------------------

/// One fixture + chosen outcome, the unit of an accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub fixture_id: String,
    pub label: String,
    pub league: String,
    pub outcome: Outcome,
    pub odd: f64,
    pub estimated_probability: f64,
    /// De-vigged implied probability.
    pub implied_probability: f64,
    pub value_percentage: f64,
}

impl Leg {
    /// Leg for the recommended outcome of a result; `None` for skips.
    pub fn from_analysis(result: &AnalysisResult) -> Option<Self> {
        if result.is_skip {
            return None;
        }
        let outcome = result.outcome?;
        let evaluation = result.evaluation(outcome)?;
        Some(Self::from_evaluation(result, evaluation))
    }

    /// Leg for an arbitrary evaluated outcome of a (non-skip) result.
    pub fn from_evaluation(result: &AnalysisResult, evaluation: &OutcomeEvaluation) -> Self {
        Self {
            fixture_id: result.fixture_id.clone(),
            label: result.label(),
            league: result.league.clone(),
            outcome: evaluation.outcome,
            odd: evaluation.odd,
            estimated_probability: evaluation.estimated_probability,
            implied_probability: evaluation.implied_probability,
            value_percentage: evaluation.value_percentage,
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {:.2} (est {:.0}%)",
            self.label,
            self.outcome,
            self.odd,
            self.estimated_probability * 100.0,
        )
    }
}

/// Risk band derived from the total odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Leg-selection theme for caller-requested accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccumulatorTheme {
    OverGoals,
    Btts,
    Favourites,
    HomeWins,
}

impl fmt::Display for AccumulatorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulatorTheme::OverGoals => write!(f, "Over goals"),
            AccumulatorTheme::Btts => write!(f, "Both teams to score"),
            AccumulatorTheme::Favourites => write!(f, "Favourites"),
            AccumulatorTheme::HomeWins => write!(f, "Home wins"),
        }
    }
}

/// How an accumulator was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulatorOrigin {
    Composed,
    Themed(AccumulatorTheme),
    Smart,
}

/// A multi-leg bet.
///
/// `combined_probability` multiplies the legs' estimated probabilities and
/// so assumes the legs are statistically independent. Correlated fixtures
/// (same league, same day) make this an approximation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accumulator {
    /// Deterministic id built from the legs' fixture ids.
    pub id: String,
    pub origin: AccumulatorOrigin,
    pub legs: Vec<Leg>,
    pub total_odd: f64,
    pub combined_probability: f64,
    pub bookmaker_implied_probability: f64,
    /// combined − bookmaker implied
    pub edge: f64,
    /// combined × total_odd − 1
    pub expected_value: f64,
    /// Fraction of bankroll.
    pub suggested_stake: f64,
    pub risk_level: RiskLevel,
    pub quality_score: f64,
}

impl Accumulator {
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Suggested stake for a concrete bankroll, rounded to cents.
    pub fn stake_amount(&self, bankroll: Decimal) -> Decimal {
        let fraction = Decimal::from_f64(self.suggested_stake).unwrap_or(Decimal::ZERO);
        (bankroll * fraction)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .max(Decimal::ZERO)
    }

    pub fn contains_fixture(&self, fixture_id: &str) -> bool {
        self.legs.iter().any(|l| l.fixture_id == fixture_id)
    }
}

impl fmt::Display for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-fold @ {:.2} | p={:.1}% ev={:+.3} | risk={} stake={:.2}% | q={:.3}",
            self.legs.len(),
            self.total_odd,
            self.combined_probability * 100.0,
            self.expected_value,
            self.risk_level,
            self.suggested_stake * 100.0,
            self.quality_score,
        )
    }
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Subscription access tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Basic,
    Advanced,
    Premium,
}

impl Tier {
    pub const ALL: &'static [Tier] = &[Tier::Free, Tier::Basic, Tier::Advanced, Tier::Premium];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Free => write!(f, "free"),
            Tier::Basic => write!(f, "basic"),
            Tier::Advanced => write!(f, "advanced"),
            Tier::Premium => write!(f, "premium"),
        }
    }
}

/// Parse a tier name (case-insensitive).
impl std::str::FromStr for Tier {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "basic" => Ok(Tier::Basic),
            "advanced" | "pro" => Ok(Tier::Advanced),
            "premium" | "vip" => Ok(Tier::Premium),
            _ => Err(ValueError::Config(format!("Unknown tier: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons an accumulator leg list is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LegSetError {
    #[error("accumulator needs at least {min} legs, got {count}")]
    TooFewLegs { count: usize, min: usize },

    #[error("accumulator allows at most {max} legs, got {count}")]
    TooManyLegs { count: usize, max: usize },

    #[error("fixture {0} appears in more than one leg")]
    DuplicateFixture(String),

    #[error("leg on fixture {fixture_id} has invalid odd {odd}")]
    InvalidOdd { fixture_id: String, odd: f64 },

    #[error("leg on fixture {fixture_id} has probability {probability} outside [0, 1]")]
    InvalidProbability { fixture_id: String, probability: f64 },
}

/// Domain-specific error types for VALUEBET.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("Market unavailable ({group}): {reason}")]
    MissingMarket { group: MarketGroup, reason: String },

    #[error("Invalid leg set: {0}")]
    InvalidLegSet(#[from] LegSetError),

    #[error("Degenerate probability for {outcome}: {value:.4}")]
    DegenerateProbability { outcome: Outcome, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
