//! Report Builder Module
//! One-shot batch pipeline: load → recode → frequency tables.

use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{
    load, Codebook, LoadError, RawRecord, RecodeError, RecodeSummary, Recoder, SchemaError,
};
use crate::report::frequency::{count_by, cross_tab, CrossTable, FrequencyTable};
use crate::stats::{CodeStats, StatsCalculator};

/// The five one-way chart columns, in report order.
const CHART_COLUMNS: [&str; 5] = [
    "Doctors Visited",
    "Age Group",
    "Physical Health",
    "Employment Status",
    "Trouble Sleeping",
];

/// The grouped-bar cross-tabulation: sleep-disrupting stress by medication.
const SLEEP_CROSS_TAB: (&str, &str) = ("Stress Impact", "Medication Impact");

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Recode(#[from] RecodeError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the presentation layer needs for one report build: the six
/// chart tables, per-column descriptive stats, and the warning summary.
#[derive(Debug, Serialize)]
pub struct SurveyReport {
    pub summary: RecodeSummary,
    pub column_stats: Vec<CodeStats>,
    pub tables: Vec<FrequencyTable>,
    pub sleep_factors: CrossTable,
}

impl SurveyReport {
    /// Build the report from a survey CSV on disk.
    pub fn build(path: &Path, codebook: &Codebook) -> Result<Self, ReportError> {
        let raw = load(path, codebook)?;
        Self::from_raw_records(&raw, codebook)
    }

    /// Build the report from already-loaded raw records.
    pub fn from_raw_records(raw: &[RawRecord], codebook: &Codebook) -> Result<Self, ReportError> {
        // Descriptive stats come from the raw code stage, before recoding
        let column_stats = codebook
            .columns()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let cells: Vec<_> = raw.iter().filter_map(|r| r.get(i).cloned()).collect();
                StatsCalculator::code_stats(spec.display_name(), &cells)
            })
            .collect();

        let outcome = Recoder::new(codebook).recode(raw)?;
        if outcome.summary.empty_input {
            warn!("input contained no rows; report tables will be all zeros");
        }

        let tables = CHART_COLUMNS
            .iter()
            .map(|column| count_by(&outcome.records, codebook, column))
            .collect::<Result<Vec<_>, _>>()?;
        let sleep_factors = cross_tab(
            &outcome.records,
            codebook,
            SLEEP_CROSS_TAB.0,
            SLEEP_CROSS_TAB.1,
        )?;

        debug!(
            tables = tables.len(),
            rows = outcome.summary.rows_out,
            "report assembled"
        );
        Ok(Self {
            summary: outcome.summary,
            column_stats,
            tables,
            sleep_factors,
        })
    }

    /// Frequency table for one chart column.
    pub fn table(&self, column: &str) -> Option<&FrequencyTable> {
        self.tables.iter().find(|t| t.column == column)
    }

    /// Serialize tables and warning summary for the presentation layer.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawValue;

    // One full NPHA row: doctors, age, three health ratings, employment,
    // five sleep factors, trouble sleeping, prescription, race, gender.
    fn row(codes: [i64; 15]) -> RawRecord {
        RawRecord::new(codes.iter().map(|&c| RawValue::Code(c)).collect())
    }

    fn sample_rows() -> Vec<RawRecord> {
        vec![
            row([1, 1, 1, 2, 3, 1, 1, 0, 0, 0, 0, 1, 3, 1, 2]),
            row([2, 2, 3, 3, 4, 3, 1, 1, 1, 0, 0, 2, 1, 1, 1]),
            row([2, 1, 5, 4, 3, 3, 0, 0, 1, 1, 0, 3, 2, 4, 2]),
        ]
    }

    #[test]
    fn report_has_five_tables_and_the_cross_tab() {
        let codebook = Codebook::npha();
        let report = SurveyReport::from_raw_records(&sample_rows(), &codebook).unwrap();

        assert_eq!(report.tables.len(), 5);
        assert_eq!(report.column_stats.len(), 15);
        let doctors = report.table("Doctors Visited").unwrap();
        assert_eq!(doctors.get("0-1 doctors"), Some(1));
        assert_eq!(doctors.get("2-3 doctors"), Some(2));
        assert_eq!(doctors.get("4 or more doctors"), Some(0));

        assert_eq!(report.sleep_factors.rows_column, "Stress Impact");
        assert_eq!(report.sleep_factors.get("Yes", "Yes"), Some(1));
        assert_eq!(report.sleep_factors.get("Yes", "No"), Some(1));
        assert_eq!(report.sleep_factors.get("No", "No"), Some(1));
        assert_eq!(report.sleep_factors.get("No", "Yes"), Some(0));
    }

    #[test]
    fn empty_input_builds_an_all_zero_report() {
        let codebook = Codebook::npha();
        let report = SurveyReport::from_raw_records(&[], &codebook).unwrap();
        assert!(report.summary.empty_input);
        for table in &report.tables {
            assert_eq!(table.total(), 0);
        }
        assert_eq!(report.sleep_factors.total(), 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let codebook = Codebook::npha();
        let report = SurveyReport::from_raw_records(&sample_rows(), &codebook).unwrap();
        let json = report.to_json().unwrap();
        assert!(json.contains("Doctors Visited"));
        assert!(json.contains("rows_out"));
    }
}
