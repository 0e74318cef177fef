//! Odds normalisation.
//!
//! Converts decimal odds to implied probabilities and removes the
//! bookmaker margin within each mutually exclusive market group.

use tracing::debug;

use crate::types::{
    GroupProbabilities, MarketGroup, MarketProbabilities, OddsSet, OutcomeProbability,
    UnavailableMarket, ValueError,
};

/// Normalise every market group of an odds set.
///
/// Groups with an absent, zero or sub-1.0 odd are reported as unavailable
/// rather than failing the whole fixture.
pub fn normalize_odds(odds: &OddsSet) -> MarketProbabilities {
    let mut probabilities = MarketProbabilities {
        total_line: odds.total_line,
        ..Default::default()
    };

    for group in MarketGroup::ALL {
        match normalize_group(odds, *group) {
            Ok(g) => probabilities.available.push(g),
            Err(e) => {
                debug!(group = %group, error = %e, "Market excluded");
                probabilities.unavailable.push(UnavailableMarket {
                    group: *group,
                    reason: e.to_string(),
                });
            }
        }
    }

    probabilities
}

/// De-vig one group against its own outcomes only.
pub fn normalize_group(odds: &OddsSet, group: MarketGroup) -> Result<GroupProbabilities, ValueError> {
    let mut quoted = Vec::with_capacity(group.outcomes().len());

    for outcome in group.outcomes() {
        let odd = match odds.odd(*outcome) {
            None => {
                return Err(ValueError::MissingMarket {
                    group,
                    reason: format!("no odd quoted for {outcome}"),
                })
            }
            Some(o) if !o.is_finite() || o <= 1.0 => {
                return Err(ValueError::MissingMarket {
                    group,
                    reason: format!("odd {o} for {outcome} is not a valid price"),
                })
            }
            Some(o) => o,
        };
        quoted.push((*outcome, odd, 1.0 / odd));
    }

    let book: f64 = quoted.iter().map(|(_, _, implied)| implied).sum();

    let outcomes = quoted
        .into_iter()
        .map(|(outcome, odd, implied)| OutcomeProbability {
            outcome,
            odd,
            implied,
            devigged: implied / book,
        })
        .collect();

    Ok(GroupProbabilities {
        group,
        outcomes,
        overround: book - 1.0,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn full_odds() -> OddsSet {
        OddsSet {
            home: Some(1.50),
            draw: Some(4.00),
            away: Some(6.50),
            over: Some(1.90),
            under: Some(1.95),
            btts_yes: Some(1.80),
            btts_no: Some(2.00),
            total_line: 2.5,
        }
    }

    #[test]
    fn test_devigged_groups_sum_to_one() {
        let probs = normalize_odds(&full_odds());
        assert_eq!(probs.available.len(), 3);
        assert!(probs.unavailable.is_empty());
        for group in &probs.available {
            let sum: f64 = group.outcomes.iter().map(|o| o.devigged).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{} sums to {sum}", group.group);
        }
    }

    #[test]
    fn test_match_result_example() {
        let probs = normalize_odds(&OddsSet::match_result(1.50, 4.00, 6.50));
        let home = probs.get(Outcome::Home).unwrap();
        let draw = probs.get(Outcome::Draw).unwrap();
        let away = probs.get(Outcome::Away).unwrap();

        assert!((home.implied - 0.667).abs() < 1e-3);
        assert!((draw.implied - 0.25).abs() < 1e-9);
        assert!((away.implied - 0.154).abs() < 1e-3);

        assert!((home.devigged - 0.622).abs() < 1e-3);
        assert!((draw.devigged - 0.233).abs() < 1e-3);
        assert!((away.devigged - 0.144).abs() < 1e-3);

        let group = &probs.available[0];
        assert!((group.overround - 0.0705).abs() < 1e-3);
    }

    #[test]
    fn test_missing_outcome_excludes_group() {
        let mut odds = full_odds();
        odds.draw = None;
        let probs = normalize_odds(&odds);
        assert!(probs.get(Outcome::Home).is_none());
        assert!(probs.get(Outcome::Over).is_some());
        assert_eq!(probs.unavailable.len(), 1);
        assert_eq!(probs.unavailable[0].group, MarketGroup::MatchResult);
    }

    #[test]
    fn test_zero_odd_is_unavailable_not_zero_probability() {
        let mut odds = full_odds();
        odds.under = Some(0.0);
        let result = normalize_group(&odds, MarketGroup::Totals);
        assert!(matches!(result, Err(ValueError::MissingMarket { group: MarketGroup::Totals, .. })));
    }

    #[test]
    fn test_odd_at_or_below_one_rejected() {
        let mut odds = full_odds();
        odds.btts_yes = Some(1.0);
        assert!(normalize_group(&odds, MarketGroup::Btts).is_err());
        odds.btts_yes = Some(f64::NAN);
        assert!(normalize_group(&odds, MarketGroup::Btts).is_err());
    }

    #[test]
    fn test_totals_devigged_against_own_complement() {
        let probs = normalize_odds(&full_odds());
        let over = probs.get(Outcome::Over).unwrap();
        let under = probs.get(Outcome::Under).unwrap();
        assert!((over.devigged + under.devigged - 1.0).abs() < 1e-9);
        // Shorter price keeps the larger share.
        assert!(over.devigged > under.devigged);
    }

    #[test]
    fn test_empty_odds_set() {
        let probs = normalize_odds(&OddsSet::default());
        assert!(probs.is_empty());
        assert_eq!(probs.unavailable.len(), 3);
    }
}
