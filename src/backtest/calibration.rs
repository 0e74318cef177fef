//! Calibration module.
//!
//! Measures how well settled recommendations' estimated probabilities match
//! what actually happened, and whether they beat the de-vigged market
//! price. Computes Brier scores per market group and a calibration curve.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::types::{AnalysisResult, MarketGroup};

// ---------------------------------------------------------------------------
// Calibration data
// ---------------------------------------------------------------------------

/// A single settled recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub fixture_id: String,
    pub group: MarketGroup,
    pub estimated_probability: f64,
    /// De-vigged market probability for the same outcome.
    pub implied_probability: f64,
    pub won: bool,
}

impl CalibrationPoint {
    /// Point for a settled recommendation; `None` for skips.
    pub fn from_settled(result: &AnalysisResult, won: bool) -> Option<Self> {
        if result.is_skip {
            return None;
        }
        let outcome = result.outcome?;
        Some(Self {
            fixture_id: result.fixture_id.clone(),
            group: outcome.group(),
            estimated_probability: result.estimated_probability,
            implied_probability: result.implied_probability,
            won,
        })
    }
}

/// Calibration analysis results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub total_predictions: usize,
    pub overall_brier: f64,
    /// Brier score of the market's own de-vigged price on the same bets.
    pub market_brier: f64,
    pub group_brier: HashMap<MarketGroup, f64>,
    /// For each 10% bin, the predicted vs actual rate.
    pub calibration_curve: Vec<CalibrationBucket>,
    pub diagnosis: CalibrationDiagnosis,
}

impl CalibrationReport {
    /// Positive when the estimates beat the market price.
    pub fn skill_vs_market(&self) -> f64 {
        self.market_brier - self.overall_brier
    }
}

/// A bucket in the calibration curve (e.g., all predictions between 0.60-0.70).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationBucket {
    pub bin_start: f64,
    pub bin_end: f64,
    pub mean_predicted: f64,
    pub actual_rate: f64,
    pub count: usize,
    /// |mean_predicted - actual_rate|
    pub deviation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalibrationDiagnosis {
    WellCalibrated,
    OverConfident,    // Predicted probabilities too extreme
    UnderConfident,   // Predicted probabilities too central
    InsufficientData,
}

// ---------------------------------------------------------------------------
// Calibrator
// ---------------------------------------------------------------------------

const MIN_POINTS: usize = 20;
const MIN_BUCKET: usize = 3;
const TOLERANCE: f64 = 0.05;

pub struct Calibrator {
    points: Vec<CalibrationPoint>,
    num_bins: usize,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calibrator {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            num_bins: 10,
        }
    }

    pub fn add_point(&mut self, point: CalibrationPoint) {
        self.points.push(point);
    }

    pub fn add_points(&mut self, points: impl IntoIterator<Item = CalibrationPoint>) {
        self.points.extend(points);
    }

    /// Record a settled recommendation. Skips are ignored; returns whether
    /// a point was added.
    pub fn record(&mut self, result: &AnalysisResult, won: bool) -> bool {
        match CalibrationPoint::from_settled(result, won) {
            Some(point) => {
                self.points.push(point);
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn report(&self) -> CalibrationReport {
        if self.points.is_empty() {
            return CalibrationReport {
                total_predictions: 0,
                overall_brier: 0.0,
                market_brier: 0.0,
                group_brier: HashMap::new(),
                calibration_curve: Vec::new(),
                diagnosis: CalibrationDiagnosis::InsufficientData,
            };
        }

        let all: Vec<&CalibrationPoint> = self.points.iter().collect();
        let overall_brier = brier(&all, |p| p.estimated_probability);
        let market_brier = brier(&all, |p| p.implied_probability);

        let mut by_group: HashMap<MarketGroup, Vec<&CalibrationPoint>> = HashMap::new();
        for p in &self.points {
            by_group.entry(p.group).or_default().push(p);
        }
        let group_brier = by_group
            .into_iter()
            .map(|(group, points)| (group, brier(&points, |p| p.estimated_probability)))
            .collect();

        let calibration_curve = self.calibration_curve();
        let diagnosis = self.diagnose(&calibration_curve);

        debug!(
            points = self.points.len(),
            brier = format!("{overall_brier:.4}"),
            market_brier = format!("{market_brier:.4}"),
            diagnosis = ?diagnosis,
            "Calibration report"
        );

        CalibrationReport {
            total_predictions: self.points.len(),
            overall_brier,
            market_brier,
            group_brier,
            calibration_curve,
            diagnosis,
        }
    }

    fn calibration_curve(&self) -> Vec<CalibrationBucket> {
        let bin_width = 1.0 / self.num_bins as f64;
        let last = self.num_bins - 1;
        let mut bins: Vec<Vec<&CalibrationPoint>> = vec![Vec::new(); self.num_bins];
        for p in &self.points {
            let index = ((p.estimated_probability / bin_width).floor().max(0.0) as usize).min(last);
            bins[index].push(p);
        }

        bins.into_iter()
            .enumerate()
            .map(|(i, in_bin)| {
                let bin_start = i as f64 * bin_width;
                let bin_end = bin_start + bin_width;
                let count = in_bin.len();
                if count == 0 {
                    return CalibrationBucket {
                        bin_start,
                        bin_end,
                        mean_predicted: (bin_start + bin_end) / 2.0,
                        actual_rate: 0.0,
                        count,
                        deviation: 0.0,
                    };
                }
                let mean_predicted =
                    in_bin.iter().map(|p| p.estimated_probability).sum::<f64>() / count as f64;
                let actual_rate = in_bin.iter().filter(|p| p.won).count() as f64 / count as f64;
                CalibrationBucket {
                    bin_start,
                    bin_end,
                    mean_predicted,
                    actual_rate,
                    count,
                    deviation: (mean_predicted - actual_rate).abs(),
                }
            })
            .collect()
    }

    /// Extreme bins that land further from the truth than predicted point to
    /// over-confidence; the reverse to under-confidence.
    fn diagnose(&self, curve: &[CalibrationBucket]) -> CalibrationDiagnosis {
        let populated: Vec<&CalibrationBucket> = curve.iter().filter(|b| b.count >= MIN_BUCKET).collect();
        if populated.len() < 3 || self.points.len() < MIN_POINTS {
            return CalibrationDiagnosis::InsufficientData;
        }

        let mut over = 0;
        let mut under = 0;
        for bucket in populated {
            if bucket.deviation < TOLERANCE {
                continue;
            }
            let mid = (bucket.bin_start + bucket.bin_end) / 2.0;
            let too_extreme = if mid < 0.3 {
                bucket.actual_rate > bucket.mean_predicted
            } else if mid > 0.7 {
                bucket.actual_rate < bucket.mean_predicted
            } else {
                continue;
            };
            if too_extreme {
                over += 1;
            } else {
                under += 1;
            }
        }

        if over > under + 1 {
            CalibrationDiagnosis::OverConfident
        } else if under > over + 1 {
            CalibrationDiagnosis::UnderConfident
        } else {
            CalibrationDiagnosis::WellCalibrated
        }
    }
}

/// Brier = (1/N) · Σ(predicted − outcome)². 0.0 is perfect, 0.25 is a coin flip.
fn brier(points: &[&CalibrationPoint], predicted: impl Fn(&CalibrationPoint) -> f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .map(|&p| {
            let outcome = if p.won { 1.0 } else { 0.0 };
            (predicted(p) - outcome).powi(2)
        })
        .sum();
    sum / points.len() as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, RecommendedType};
    use chrono::Utc;

    fn make_point(estimated: f64, won: bool) -> CalibrationPoint {
        make_group_point(MarketGroup::MatchResult, estimated, won)
    }

    fn make_group_point(group: MarketGroup, estimated: f64, won: bool) -> CalibrationPoint {
        CalibrationPoint {
            fixture_id: "test".into(),
            group,
            estimated_probability: estimated,
            implied_probability: 0.5,
            won,
        }
    }

    fn make_result(skip: bool) -> AnalysisResult {
        AnalysisResult {
            fixture_id: "f1".into(),
            home_team: "Lyon".into(),
            away_team: "Nice".into(),
            league: "Ligue1".into(),
            kickoff: Utc::now(),
            recommended_type: if skip { RecommendedType::Skip } else { RecommendedType::Btts },
            outcome: if skip { None } else { Some(Outcome::BttsYes) },
            odd: if skip { None } else { Some(1.85) },
            implied_probability: 0.51,
            estimated_probability: 0.58,
            value_percentage: 7.0,
            edge: 0.07,
            confidence: 55,
            reason_factors: Vec::new(),
            is_skip: skip,
            explanation: String::new(),
            evaluations: Vec::new(),
        }
    }

    #[test]
    fn test_sharp_predictions_score_well() {
        let mut cal = Calibrator::new();
        for _ in 0..10 {
            cal.add_point(make_point(0.90, true));
            cal.add_point(make_point(0.10, false));
        }
        let report = cal.report();
        assert!(report.overall_brier < 0.05, "Brier: {}", report.overall_brier);
        assert!(report.skill_vs_market() > 0.0);
    }

    #[test]
    fn test_inverted_predictions_score_badly() {
        let mut cal = Calibrator::new();
        for _ in 0..10 {
            cal.add_point(make_point(0.90, false));
            cal.add_point(make_point(0.10, true));
        }
        let report = cal.report();
        assert!(report.overall_brier > 0.5, "Brier: {}", report.overall_brier);
        assert!(report.skill_vs_market() < 0.0);
    }

    #[test]
    fn test_empty_calibrator() {
        let report = Calibrator::new().report();
        assert_eq!(report.total_predictions, 0);
        assert_eq!(report.diagnosis, CalibrationDiagnosis::InsufficientData);
    }

    #[test]
    fn test_insufficient_data() {
        let mut cal = Calibrator::new();
        for _ in 0..5 {
            cal.add_point(make_point(0.70, true));
        }
        assert_eq!(cal.report().diagnosis, CalibrationDiagnosis::InsufficientData);
    }

    #[test]
    fn test_group_brier() {
        let mut cal = Calibrator::new();
        cal.add_point(make_group_point(MarketGroup::Totals, 0.80, true));
        cal.add_point(make_group_point(MarketGroup::Btts, 0.80, false));

        let report = cal.report();
        // Totals: (0.8 - 1.0)² = 0.04, Btts: (0.8 - 0.0)² = 0.64
        assert!(report.group_brier[&MarketGroup::Totals] < 0.1);
        assert!(report.group_brier[&MarketGroup::Btts] > 0.5);
        assert!(!report.group_brier.contains_key(&MarketGroup::MatchResult));
    }

    #[test]
    fn test_calibration_curve_buckets() {
        let mut cal = Calibrator::new();
        for _ in 0..10 {
            cal.add_point(make_point(0.25, true));
            cal.add_point(make_point(0.75, false));
        }
        cal.add_point(make_point(1.0, true));
        let curve = cal.report().calibration_curve;
        assert_eq!(curve.len(), 10);

        let bucket_25 = curve.iter().find(|b| b.bin_start <= 0.25 && b.bin_end > 0.25).unwrap();
        assert_eq!(bucket_25.count, 10);
        assert!((bucket_25.actual_rate - 1.0).abs() < 1e-10);
        assert_eq!(curve[9].count, 1);
    }

    #[test]
    fn test_overconfidence_detected() {
        let mut cal = Calibrator::new();
        // Low bins hit far more often than predicted, high bins far less.
        for _ in 0..10 {
            cal.add_point(make_point(0.05, true));
            cal.add_point(make_point(0.15, true));
            cal.add_point(make_point(0.85, false));
            cal.add_point(make_point(0.95, false));
        }
        assert_eq!(cal.report().diagnosis, CalibrationDiagnosis::OverConfident);
    }

    #[test]
    fn test_coin_flip_brier() {
        let mut cal = Calibrator::new();
        for _ in 0..50 {
            cal.add_point(make_point(0.50, true));
            cal.add_point(make_point(0.50, false));
        }
        let report = cal.report();
        assert!((report.overall_brier - 0.25).abs() < 0.01, "Brier: {}", report.overall_brier);
    }

    #[test]
    fn test_record_ignores_skips() {
        let mut cal = Calibrator::new();
        assert!(cal.record(&make_result(false), true));
        assert!(!cal.record(&make_result(true), false));
        assert_eq!(cal.count(), 1);

        let point = CalibrationPoint::from_settled(&make_result(false), true).unwrap();
        assert_eq!(point.group, MarketGroup::Btts);
        assert_eq!(point.estimated_probability, 0.58);
    }
}
