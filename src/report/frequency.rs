//! Frequency Aggregation Module
//! One-way and two-way category counts in declared label order.

use serde::Serialize;
use tracing::warn;

use crate::data::{Codebook, NormalizedRecord, NormalizedValue, SchemaError};

/// Category → count mapping for one column.
///
/// Entries follow the code table's declared order and every declared label is
/// present even at zero, so charts render empty bars rather than dropping
/// categories. "Unknown" appears as a trailing entry only when observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub column: String,
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tally how many records hold each category of one column.
pub fn count_by(
    records: &[NormalizedRecord],
    codebook: &Codebook,
    column: &str,
) -> Result<FrequencyTable, SchemaError> {
    let index = codebook.index_of_display(column)?;
    let spec = &codebook.columns()[index];

    let mut entries: Vec<(String, u64)> = spec.labels().map(|l| (l.to_string(), 0)).collect();
    let mut unknown = 0u64;

    for record in records {
        match record.get(index) {
            None => continue,
            Some(NormalizedValue::Unknown) => unknown += 1,
            Some(NormalizedValue::Label(label)) => {
                if let Some(entry) = entries.iter_mut().find(|(l, _)| l == label) {
                    entry.1 += 1;
                } else {
                    warn!(column, label = %label, "label outside declared set, ignored");
                }
            }
        }
    }

    if unknown > 0 {
        entries.push(("Unknown".to_string(), unknown));
    }

    Ok(FrequencyTable {
        column: column.to_string(),
        entries,
    })
}

/// Category-pair → count mapping for two columns, used for grouped bars.
///
/// Both axes follow declared label order, zero-filled, with "Unknown"
/// appended per axis only when observed in that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTable {
    pub rows_column: String,
    pub cols_column: String,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl CrossTable {
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Count for one (row, column) label pair.
    pub fn get(&self, row: &str, col: &str) -> Option<u64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.col_labels.iter().position(|l| l == col)?;
        Some(self.counts[r][c])
    }

    /// Counts for one row category, in column label order.
    pub fn row(&self, row: &str) -> Option<&[u64]> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        Some(&self.counts[r])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Tally records per (row category, column category) pair.
pub fn cross_tab(
    records: &[NormalizedRecord],
    codebook: &Codebook,
    rows_column: &str,
    cols_column: &str,
) -> Result<CrossTable, SchemaError> {
    let ri = codebook.index_of_display(rows_column)?;
    let ci = codebook.index_of_display(cols_column)?;
    let row_spec = &codebook.columns()[ri];
    let col_spec = &codebook.columns()[ci];

    let mut row_labels: Vec<String> = row_spec.labels().map(String::from).collect();
    let mut col_labels: Vec<String> = col_spec.labels().map(String::from).collect();
    if records
        .iter()
        .any(|r| matches!(r.get(ri), Some(NormalizedValue::Unknown)))
    {
        row_labels.push("Unknown".to_string());
    }
    if records
        .iter()
        .any(|r| matches!(r.get(ci), Some(NormalizedValue::Unknown)))
    {
        col_labels.push("Unknown".to_string());
    }

    let mut counts = vec![vec![0u64; col_labels.len()]; row_labels.len()];
    for record in records {
        let (Some(row_value), Some(col_value)) = (record.get(ri), record.get(ci)) else {
            continue;
        };
        let Some(r) = row_labels.iter().position(|l| l == row_value.as_str()) else {
            warn!(column = rows_column, label = row_value.as_str(), "label outside declared set, ignored");
            continue;
        };
        let Some(c) = col_labels.iter().position(|l| l == col_value.as_str()) else {
            warn!(column = cols_column, label = col_value.as_str(), "label outside declared set, ignored");
            continue;
        };
        counts[r][c] += 1;
    }

    Ok(CrossTable {
        rows_column: rows_column.to_string(),
        cols_column: cols_column.to_string(),
        row_labels,
        col_labels,
        counts,
    })
}
