//! portcheck -- switch port commissioning diagnostics.
//!
//! Turns the free-form output of RouterOS `cable-test` and `bandwidth-test`
//! into structured results, judges them against health thresholds, and drives
//! the loopback / link / throughput procedure over a pluggable command runner.

pub mod bandwidth;
pub mod cable;
pub mod config;
pub mod parse;
pub mod session;
pub mod verdict;

pub use bandwidth::BandwidthTestResult;
pub use cable::{CableTestReport, WirePair};
pub use config::{Config, Thresholds};
pub use parse::ParseError;
