//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::types::Tier;

/// VALUEBET - value-edge analysis and accumulator composition for sports odds.
#[derive(Parser, Debug)]
#[command(name = "valuebet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file with the fixtures and odds to analyze
    pub fixtures: PathBuf,

    /// Subscription tier: free, basic, advanced (pro) or premium (vip)
    #[arg(default_value = "free")]
    pub tier: Tier,

    /// Path to configuration file (defaults to $VALUEBET_CONFIG or config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_defaults_to_free() {
        let cli = Cli::try_parse_from(["valuebet", "slate.json"]).unwrap();
        assert_eq!(cli.fixtures, PathBuf::from("slate.json"));
        assert_eq!(cli.tier, Tier::Free);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_tier_aliases_and_config() {
        let cli = Cli::try_parse_from(["valuebet", "slate.json", "VIP", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.tier, Tier::Premium);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_rejects_unknown_tier() {
        assert!(Cli::try_parse_from(["valuebet", "slate.json", "gold"]).is_err());
    }

    #[test]
    fn test_fixtures_required() {
        assert!(Cli::try_parse_from(["valuebet"]).is_err());
    }
}
