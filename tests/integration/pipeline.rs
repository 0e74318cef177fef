//! End-to-end pipeline tests.

use std::collections::{HashMap, HashSet};

use valuebet::backtest::calibration::Calibrator;
use valuebet::config::AppConfig;
use valuebet::engine::optimizer::OptimizerConstraints;
use valuebet::types::{
    AccumulatorOrigin, Leg, LegSetError, MarketGroup, Outcome, RecommendedType, Tier, ValueError,
};
use valuebet::{
    analyze_fixture, apply_tier_limits, build_smart_accumulators, compose_accumulator,
    normalize_odds, FixtureOdds, ValueEngine,
};

use crate::support::*;

#[test]
fn test_slate_recommendations() {
    let engine = ValueEngine::default();
    let slate = make_slate(10);
    let results = engine.analyze_batch(&slate);
    assert_eq!(results.len(), slate.len());

    let by_id: HashMap<&str, _> = results.iter().map(|r| (r.fixture_id.as_str(), r)).collect();

    for i in 0..10 {
        let r = by_id[format!("home{i:02}").as_str()];
        assert_eq!(r.recommended_type, RecommendedType::HomeWin, "{}", r.fixture_id);
        assert!(r.value_percentage > 3.0);
        assert!(r.confidence >= 80, "confidence {}", r.confidence);
        assert!(!r.reason_factors.is_empty());
    }

    for i in 0..3 {
        let r = by_id[format!("goals{i}").as_str()];
        assert!(matches!(r.recommended_type, RecommendedType::Over | RecommendedType::Btts));
    }

    assert!(by_id["efficient"].is_skip);
    assert!(by_id["unpriced"].is_skip);
    assert!(by_id["unpriced"].evaluations.is_empty());
}

#[test]
fn test_actionable_results_obey_value_contract() {
    let engine = ValueEngine::default();
    for r in engine.analyze_batch(&make_slate(12)).iter().filter(|r| !r.is_skip) {
        assert_eq!(r.edge, r.estimated_probability - r.implied_probability);
        assert_eq!(
            r.value_percentage,
            ((r.estimated_probability - r.implied_probability) * 1000.0).round() / 10.0
        );
        assert!(r.odd.is_some());
        assert!(r.outcome.is_some());
    }
}

#[test]
fn test_no_features_trusts_market() {
    let slate = make_slate(0);
    let efficient = slate.iter().find(|f| f.fixture.id == "efficient").unwrap();
    let result = analyze_fixture(&efficient.fixture, &efficient.odds);
    let markets = normalize_odds(&efficient.odds);

    assert!(result.is_skip);
    assert_eq!(result.evaluations.len(), 7);
    for e in &result.evaluations {
        let devigged = markets.get(e.outcome).unwrap().devigged;
        assert_eq!(e.estimated_probability, devigged);
        assert_eq!(e.value_percentage, 0.0);
    }
}

#[test]
fn test_devigged_groups_sum_to_one() {
    for item in make_slate(6) {
        let markets = normalize_odds(&item.odds);
        for group in &markets.available {
            let sum: f64 = group.outcomes.iter().map(|o| o.devigged).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{} {:?}", item.fixture.id, group.group);
        }
    }
}

#[test]
fn test_conflicting_signals_lower_confidence() {
    let aligned = FixtureOdds {
        fixture: make_fixture("aligned", "EPL", 0, Some(home_favoured())),
        odds: full_odds(2.3, 3.3, 3.2),
    };
    let mixed = FixtureOdds {
        fixture: make_fixture("mixed", "EPL", 0, Some(conflicting())),
        odds: full_odds(2.3, 3.3, 3.2),
    };
    let a = analyze_fixture(&aligned.fixture, &aligned.odds);
    let m = analyze_fixture(&mixed.fixture, &mixed.odds);
    assert!(!a.is_skip);
    assert!(m.confidence < a.confidence, "mixed {} vs aligned {}", m.confidence, a.confidence);
}

#[test]
fn test_smart_accumulators_respect_constraints() {
    let engine = ValueEngine::default();
    let results = engine.analyze_batch(&make_slate(20));
    let skipped: HashSet<&str> = results
        .iter()
        .filter(|r| r.is_skip)
        .map(|r| r.fixture_id.as_str())
        .collect();

    let accs = engine.build_smart_accumulators(&results);
    assert!(!accs.is_empty());
    assert!(accs.len() <= 5);

    for acc in &accs {
        assert!(acc.leg_count() >= 2 && acc.leg_count() <= 4);
        assert!(acc.expected_value >= 0.0);
        assert!(acc.legs.iter().all(|l| !skipped.contains(l.fixture_id.as_str())));

        let mut per_league: HashMap<&str, usize> = HashMap::new();
        for leg in &acc.legs {
            *per_league.entry(leg.league.as_str()).or_default() += 1;
        }
        assert!(per_league.values().all(|&n| n <= 2));

        let odd: f64 = acc.legs.iter().map(|l| l.odd).product();
        let prob: f64 = acc.legs.iter().map(|l| l.estimated_probability).product();
        assert_eq!(acc.total_odd, odd);
        assert_eq!(acc.combined_probability, prob);
    }

    for pair in accs.windows(2) {
        assert!(pair[0].quality_score >= pair[1].quality_score);
    }
}

#[test]
fn test_optimizer_target_risk() {
    let engine = ValueEngine::default();
    let results = engine.analyze_batch(&make_slate(15));
    let constraints = OptimizerConstraints {
        target_risk: Some(valuebet::types::RiskLevel::Medium),
        ..Default::default()
    };
    let accs = build_smart_accumulators(&results, &constraints);
    assert!(accs.iter().all(|a| a.risk_level == valuebet::types::RiskLevel::Medium));
}

#[test]
fn test_compose_from_results() {
    let engine = ValueEngine::default();
    let results = engine.analyze_batch(&make_slate(4));
    let legs: Vec<Leg> = results.iter().filter_map(Leg::from_analysis).take(2).collect();
    assert_eq!(legs.len(), 2);

    let acc = compose_accumulator(legs.clone()).unwrap();
    assert_eq!(acc.total_odd, legs[0].odd * legs[1].odd);
    assert_eq!(
        acc.combined_probability,
        legs[0].estimated_probability * legs[1].estimated_probability
    );
    assert_eq!(acc.origin, AccumulatorOrigin::Composed);
    assert!(acc.suggested_stake >= 0.0 && acc.suggested_stake <= 0.05);
}

#[test]
fn test_compose_rejections() {
    let engine = ValueEngine::default();
    let results = engine.analyze_batch(&make_slate(3));
    let leg = Leg::from_analysis(&results[0]).unwrap();

    let single = compose_accumulator(vec![leg.clone()]).unwrap_err();
    assert!(matches!(single, ValueError::InvalidLegSet(LegSetError::TooFewLegs { .. })));

    let duplicate = engine.compose_accumulator(vec![leg.clone(), leg]).unwrap_err();
    assert!(matches!(duplicate, ValueError::InvalidLegSet(LegSetError::DuplicateFixture(_))));
    assert!(duplicate.to_string().contains("Invalid leg set"));
}

#[test]
fn test_tier_caps_for_every_tier() {
    let engine = ValueEngine::default();
    let slate = make_slate(25);
    for &tier in Tier::ALL {
        let report = engine.run(&slate, tier);
        let config = engine.tier_config(tier);
        assert!(report.results.len() <= config.max_singles, "{tier}");
        assert!(report.accumulators.len() <= config.max_accumulators, "{tier}");
        assert!(report.results.iter().all(|r| !r.is_skip));
        if !config.smart_accumulators {
            assert!(report.accumulators.iter().all(|a| a.origin != AccumulatorOrigin::Smart));
        }
        assert_eq!(report.summary.fixtures, slate.len());
        assert_eq!(report.summary.results_shown, report.results.len());
    }
}

#[test]
fn test_basic_tier_gets_themed_accumulator() {
    let engine = ValueEngine::default();
    let report = engine.run(&make_slate(8), Tier::Basic);
    assert_eq!(report.accumulators.len(), 1);
    assert!(matches!(report.accumulators[0].origin, AccumulatorOrigin::Themed(_)));
}

#[test]
fn test_gate_does_not_alter_results() {
    let engine = ValueEngine::default();
    let results: Vec<_> = engine
        .analyze_batch(&make_slate(10))
        .into_iter()
        .filter(|r| !r.is_skip)
        .collect();
    let accs = engine.build_smart_accumulators(&results);

    let view = apply_tier_limits(results.clone(), accs, &engine.tier_config(Tier::Advanced));
    for (shown, original) in view.results.iter().zip(&results) {
        assert_eq!(shown.fixture_id, original.fixture_id);
        assert_eq!(shown.value_percentage, original.value_percentage);
        assert_eq!(shown.confidence, original.confidence);
    }
}

#[test]
fn test_config_threshold_changes_output() {
    let cfg = AppConfig::from_toml(
        r#"
        [analysis]
        match_result_threshold = 50.0
        totals_threshold = 50.0
        btts_threshold = 50.0
        "#,
    )
    .unwrap();
    let engine = ValueEngine::new(&cfg);
    let report = engine.run(&make_slate(6), Tier::Premium);
    assert_eq!(report.summary.actionable, 0);
    assert!(report.results.is_empty());
    assert!(report.accumulators.is_empty());
}

#[test]
fn test_report_serializes() {
    let engine = ValueEngine::default();
    let report = engine.run(&make_slate(4), Tier::Premium);
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"HOME_WIN\""));
    assert!(json.contains("\"tier\":\"premium\""));

    let slate_json = serde_json::to_string(&make_slate(2)).unwrap();
    let parsed: Vec<FixtureOdds> = serde_json::from_str(&slate_json).unwrap();
    assert_eq!(parsed.len(), make_slate(2).len());
}

#[test]
fn test_calibration_from_settled_results() {
    let engine = ValueEngine::default();
    let results = engine.analyze_batch(&make_slate(10));
    let mut cal = Calibrator::new();
    let recorded = results
        .iter()
        .enumerate()
        .filter(|(i, r)| cal.record(r, i % 3 != 0))
        .count();

    assert_eq!(recorded, results.iter().filter(|r| !r.is_skip).count());
    let report = cal.report();
    assert_eq!(report.total_predictions, recorded);
    assert!(report.group_brier.contains_key(&MarketGroup::MatchResult));
    assert!(report.overall_brier >= 0.0 && report.overall_brier <= 1.0);
    assert!(results
        .iter()
        .filter(|r| !r.is_skip)
        .all(|r| r.outcome != Some(Outcome::Draw)));
}
