//! VALUEBET: value-edge analysis and accumulator composition for sports odds
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point. The core is pure: no I/O, no shared state.

pub mod backtest;
pub mod cli;
pub mod config;
pub mod engine;
pub mod strategy;
pub mod types;

pub use engine::{
    analyze_fixture, apply_tier_limits, build_smart_accumulators, compose_accumulator, EngineReport,
    FixtureOdds, ValueEngine,
};
pub use strategy::odds::normalize_odds;
