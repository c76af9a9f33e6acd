//! Report module - frequency aggregation and report assembly

mod builder;
mod frequency;

pub use builder::{ReportError, SurveyReport};
pub use frequency::{count_by, cross_tab, CrossTable, FrequencyTable};
