//! Stats module - descriptive statistics over raw codes

mod calculator;

pub use calculator::{CodeStats, StatsCalculator};
