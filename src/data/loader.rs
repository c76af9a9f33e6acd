//! CSV Survey Loader Module
//! Reads the delimited survey file into raw records using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::codebook::{Codebook, SchemaError};
use super::record::{RawRecord, RawValue};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Load a survey CSV and validate its header against the codebook.
///
/// Schema inference is disabled so every cell arrives as a string; cells are
/// then parsed deterministically into `Code`, `Text`, or `Missing`. Input row
/// order is preserved.
pub fn load(path: &Path, codebook: &Codebook) -> Result<Vec<RawRecord>, LoadError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;
    from_dataframe(&df, codebook)
}

/// Validate an already-loaded DataFrame and extract raw records from it.
///
/// The header must carry exactly the codebook's raw column names; a missing
/// or unexpected column is fatal. Column order in the file is irrelevant;
/// records are emitted in codebook order.
pub fn from_dataframe(df: &DataFrame, codebook: &Codebook) -> Result<Vec<RawRecord>, LoadError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for spec in codebook.columns() {
        if !names.iter().any(|n| n == spec.raw_name()) {
            return Err(SchemaError::MissingColumn(spec.raw_name().to_string()).into());
        }
    }
    for name in &names {
        if codebook.index_of_raw(name).is_none() {
            return Err(SchemaError::UnexpectedColumn(name.clone()).into());
        }
    }

    // Column handles in codebook order
    let mut columns = Vec::with_capacity(codebook.len());
    for spec in codebook.columns() {
        let ca = df.column(spec.raw_name())?.str()?.clone();
        columns.push(ca);
    }

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let values = columns.iter().map(|ca| parse_cell(ca.get(i))).collect();
        records.push(RawRecord::new(values));
    }

    debug!(rows = records.len(), "loaded survey rows");
    Ok(records)
}

fn parse_cell(cell: Option<&str>) -> RawValue {
    match cell {
        None => RawValue::Missing,
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                RawValue::Missing
            } else if let Ok(code) = trimmed.parse::<i64>() {
                RawValue::Code(code)
            } else {
                RawValue::Text(trimmed.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::codebook::ColumnSpec;

    fn two_column_codebook() -> Codebook {
        Codebook::new(vec![
            ColumnSpec::new("a", "Alpha", &[(1, "one"), (2, "two")]),
            ColumnSpec::new("b", "Beta", &[(0, "no"), (1, "yes")]),
        ])
    }

    fn df(a: &[Option<&str>], b: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![
            Column::new("a".into(), a.to_vec()),
            Column::new("b".into(), b.to_vec()),
        ])
        .unwrap()
    }

    #[test]
    fn parses_codes_text_and_missing() {
        let codebook = two_column_codebook();
        let df = df(
            &[Some("1"), Some(" 2 "), Some("one"), None, Some("")],
            &[Some("0"), Some("1"), Some("0"), Some("1"), Some("-3")],
        );
        let records = from_dataframe(&df, &codebook).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].values()[0], RawValue::Code(1));
        assert_eq!(records[1].values()[0], RawValue::Code(2));
        assert_eq!(records[2].values()[0], RawValue::Text("one".into()));
        assert_eq!(records[3].values()[0], RawValue::Missing);
        assert_eq!(records[4].values()[0], RawValue::Missing);
        assert_eq!(records[4].values()[1], RawValue::Code(-3));
    }

    #[test]
    fn missing_column_is_fatal() {
        let codebook = two_column_codebook();
        let df = DataFrame::new(vec![Column::new("a".into(), vec![Some("1")])]).unwrap();
        let err = from_dataframe(&df, &codebook).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Schema(SchemaError::MissingColumn(name)) if name == "b"
        ));
    }

    #[test]
    fn unexpected_column_is_fatal() {
        let codebook = two_column_codebook();
        let df = DataFrame::new(vec![
            Column::new("a".into(), vec![Some("1")]),
            Column::new("b".into(), vec![Some("0")]),
            Column::new("c".into(), vec![Some("9")]),
        ])
        .unwrap();
        let err = from_dataframe(&df, &codebook).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Schema(SchemaError::UnexpectedColumn(name)) if name == "c"
        ));
    }

    #[test]
    fn records_follow_codebook_order_not_file_order() {
        let codebook = two_column_codebook();
        // File has b before a
        let df = DataFrame::new(vec![
            Column::new("b".into(), vec![Some("1")]),
            Column::new("a".into(), vec![Some("2")]),
        ])
        .unwrap();
        let records = from_dataframe(&df, &codebook).unwrap();
        assert_eq!(records[0].values()[0], RawValue::Code(2)); // a
        assert_eq!(records[0].values()[1], RawValue::Code(1)); // b
    }

    #[test]
    fn header_only_input_yields_zero_rows() {
        let codebook = two_column_codebook();
        let df = df(&[], &[]);
        let records = from_dataframe(&df, &codebook).unwrap();
        assert!(records.is_empty());
    }
}
