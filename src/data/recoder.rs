//! Survey Recoder Module
//! The pipeline core: categorical recoding and missing-value imputation.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use super::codebook::Codebook;
use super::record::{NormalizedRecord, NormalizedValue, RawRecord, RawValue};
use crate::stats::StatsCalculator;

#[derive(Error, Debug)]
pub enum RecodeError {
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Warning counts accumulated over one batch.
///
/// Recoverable problems never abort the batch; they are tallied here so the
/// report can state how much of the data was affected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecodeSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows excluded because a text cell matched no declared label.
    pub rows_flagged: usize,
    /// Missing numeric cells filled with the column median.
    pub median_imputed: usize,
    /// Cells filled with the literal "Unknown" category.
    pub unknown_imputed: usize,
    /// Integer codes with no entry in their column's code table.
    pub unmapped_codes: usize,
    pub empty_input: bool,
}

#[derive(Debug)]
pub struct RecodeOutcome {
    pub records: Vec<NormalizedRecord>,
    pub summary: RecodeSummary,
}

/// Transforms raw records into normalized records.
///
/// Holds no state beyond a reference to the codebook, which is injected at
/// construction and never mutated.
///
/// The transform runs in two stages per column, and the order is
/// correctness-critical: medians are computed over raw integer codes for the
/// whole batch *before* any code is turned into a label, then the code table
/// is applied. The `RawValue`/`NormalizedValue` split makes mixing the stages
/// a type error.
pub struct Recoder<'a> {
    codebook: &'a Codebook,
}

impl<'a> Recoder<'a> {
    pub fn new(codebook: &'a Codebook) -> Self {
        Self { codebook }
    }

    /// Recode a batch of raw records.
    ///
    /// Cell policy:
    /// - `Code` with a code-table entry becomes that label; without one it
    ///   becomes `Unknown` and is counted as an unmapped code.
    /// - `Missing` is filled with the column's batch median code when the
    ///   column has numeric data, otherwise with `Unknown`.
    /// - `Text` equal to a declared label (or "Unknown") passes through
    ///   unchanged, so recoding already-normalized data is a no-op; any other
    ///   text flags the row, which is excluded from the output and counted.
    ///
    /// Only a schema-level violation (wrong row width) is fatal.
    pub fn recode(&self, rows: &[RawRecord]) -> Result<RecodeOutcome, RecodeError> {
        let width = self.codebook.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RecodeError::RowWidth {
                    row: i,
                    found: row.len(),
                    expected: width,
                });
            }
        }

        let mut summary = RecodeSummary {
            rows_in: rows.len(),
            empty_input: rows.is_empty(),
            ..Default::default()
        };
        if summary.empty_input {
            warn!("recoder received zero rows");
        }

        // Code-stage medians over the whole batch, before any label exists
        let medians: Vec<Option<i64>> = (0..width)
            .map(|ci| {
                let codes: Vec<i64> = rows
                    .iter()
                    .filter_map(|row| match row.values()[ci] {
                        RawValue::Code(code) => Some(code),
                        _ => None,
                    })
                    .collect();
                StatsCalculator::median_code(&codes)
            })
            .collect();

        let mut records = Vec::with_capacity(rows.len());
        'rows: for (ri, row) in rows.iter().enumerate() {
            let mut values = Vec::with_capacity(width);
            for (ci, (cell, spec)) in row
                .values()
                .iter()
                .zip(self.codebook.columns())
                .enumerate()
            {
                let value = match cell {
                    RawValue::Code(code) => match spec.label_for(*code) {
                        Some(label) => NormalizedValue::Label(label.to_string()),
                        None => {
                            warn!(
                                column = spec.display_name(),
                                code, "code not in code table, imputed as Unknown"
                            );
                            summary.unmapped_codes += 1;
                            NormalizedValue::Unknown
                        }
                    },
                    RawValue::Missing => match medians[ci].and_then(|m| spec.label_for(m)) {
                        Some(label) => {
                            summary.median_imputed += 1;
                            NormalizedValue::Label(label.to_string())
                        }
                        None => {
                            summary.unknown_imputed += 1;
                            NormalizedValue::Unknown
                        }
                    },
                    RawValue::Text(text) => {
                        if text == "Unknown" {
                            NormalizedValue::Unknown
                        } else if spec.has_label(text) {
                            NormalizedValue::Label(text.clone())
                        } else {
                            warn!(
                                row = ri,
                                column = spec.display_name(),
                                value = %text,
                                "text matches no declared label, row excluded"
                            );
                            summary.rows_flagged += 1;
                            continue 'rows;
                        }
                    }
                };
                values.push(value);
            }
            records.push(NormalizedRecord::new(values));
        }

        summary.rows_out = records.len();
        Ok(RecodeOutcome { records, summary })
    }
}
