//! Deterministic fixture and odds builders shared by the integration tests.

use chrono::{Duration, TimeZone, Utc};

use valuebet::types::{
    BttsRates, Fixture, FixtureFeatures, GoalProfile, HeadToHead, InjuryReport, OddsSet, Standings,
};
use valuebet::FixtureOdds;

pub const LEAGUES: [&str; 5] = ["EPL", "LaLiga", "SerieA", "Bundesliga", "Ligue1"];

pub fn make_fixture(id: &str, league: &str, offset_hours: i64, features: Option<FixtureFeatures>) -> Fixture {
    let base = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
    Fixture {
        id: id.to_string(),
        home_team: format!("{id} United"),
        away_team: format!("{id} City"),
        league: league.to_string(),
        kickoff: base + Duration::hours(offset_hours),
        features,
    }
}

/// Features that point clearly at a home win.
pub fn home_favoured() -> FixtureFeatures {
    FixtureFeatures {
        home_form: Some("WWWDW".into()),
        away_form: Some("LLDLL".into()),
        head_to_head: Some(HeadToHead { home_wins: 5, draws: 2, away_wins: 1 }),
        injuries: Some(InjuryReport { home: 0, away: 3 }),
        standings: Some(Standings { home_position: 2, away_position: 17, league_size: 20 }),
        ..Default::default()
    }
}

/// Features that point at goals at both ends.
pub fn goals_expected() -> FixtureFeatures {
    FixtureFeatures {
        goals: Some(GoalProfile {
            home_scored_avg: 2.4,
            home_conceded_avg: 1.5,
            away_scored_avg: 1.6,
            away_conceded_avg: 2.0,
        }),
        btts_rates: Some(BttsRates { home: 0.75, away: 0.70 }),
        ..Default::default()
    }
}

/// Home/away signals that cancel out.
pub fn conflicting() -> FixtureFeatures {
    FixtureFeatures {
        home_form: Some("WWWWW".into()),
        away_form: Some("LLLLL".into()),
        standings: Some(Standings { home_position: 19, away_position: 1, league_size: 20 }),
        injuries: Some(InjuryReport { home: 5, away: 0 }),
        ..Default::default()
    }
}

pub fn full_odds(home: f64, draw: f64, away: f64) -> OddsSet {
    OddsSet {
        over: Some(1.95),
        under: Some(1.90),
        btts_yes: Some(1.90),
        btts_no: Some(1.95),
        ..OddsSet::match_result(home, draw, away)
    }
}

/// A mixed slate: `n` home-value fixtures spread across leagues, plus goal
/// fixtures, an efficiently priced fixture and one with no usable odds.
pub fn make_slate(n: usize) -> Vec<FixtureOdds> {
    let mut slate: Vec<FixtureOdds> = (0..n)
        .map(|i| FixtureOdds {
            fixture: make_fixture(&format!("home{i:02}"), LEAGUES[i % LEAGUES.len()], i as i64, Some(home_favoured())),
            odds: full_odds(2.0 + (i % 6) as f64 * 0.1, 3.4, 3.9),
        })
        .collect();

    slate.extend((0..3).map(|i| FixtureOdds {
        fixture: make_fixture(&format!("goals{i}"), LEAGUES[(i + 2) % LEAGUES.len()], 30 + i as i64, Some(goals_expected())),
        odds: full_odds(2.5, 3.3, 2.9),
    }));

    slate.push(FixtureOdds {
        fixture: make_fixture("efficient", "EPL", 40, None),
        odds: full_odds(2.2, 3.3, 3.4),
    });
    slate.push(FixtureOdds {
        fixture: make_fixture("unpriced", "EPL", 41, None),
        odds: OddsSet {
            home: Some(0.0),
            ..Default::default()
        },
    });

    slate
}
