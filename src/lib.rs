//! SurveyScope - Health Survey Recoding & Descriptive Statistics Pipeline
//!
//! Loads a fixed-schema health-survey CSV, recodes integer survey codes into
//! labeled categories, imputes missing values (median for numeric cells,
//! "Unknown" for categorical ones), and aggregates frequency tables for a
//! chart-rendering presentation layer.
//!
//! The pipeline is a one-shot batch: load → recode → count. The codebook
//! (rename map plus per-column code tables) is built once at startup and
//! passed by reference to every stage.

pub mod data;
pub mod report;
pub mod stats;

pub use data::{
    Codebook, ColumnSpec, LoadError, NormalizedRecord, NormalizedValue, RawRecord, RawValue,
    RecodeError, RecodeOutcome, RecodeSummary, Recoder, SchemaError,
};
pub use report::{count_by, cross_tab, CrossTable, FrequencyTable, ReportError, SurveyReport};
pub use stats::{CodeStats, StatsCalculator};
