//! Statistics Calculator Module
//! Descriptive statistics over raw survey codes, including the batch medians
//! used for imputation.

use serde::Serialize;

use crate::data::RawValue;

/// Descriptive summary of one column's raw integer codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeStats {
    pub column: String,
    /// Non-missing numeric cells.
    pub count: usize,
    pub missing: usize,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub mean: Option<f64>,
    pub median: Option<i64>,
}

/// Handles statistical calculations over the raw code stage.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute the median of a slice of values. Returns NaN on empty input.
    pub fn median(values: &[f64]) -> f64 {
        let n = values.len();
        if n == 0 {
            return f64::NAN;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Median of a set of integer codes, typed back to an integer.
    ///
    /// An even-sized set can land between two codes; the midpoint is rounded
    /// half away from zero so the result is always a representable code value.
    pub fn median_code(codes: &[i64]) -> Option<i64> {
        if codes.is_empty() {
            return None;
        }
        let values: Vec<f64> = codes.iter().map(|&c| c as f64).collect();
        Some(Self::median(&values).round() as i64)
    }

    /// Summarize one column of raw cells.
    ///
    /// Text cells carry no numeric information and contribute to neither
    /// `count` nor `missing`.
    pub fn code_stats(column: &str, cells: &[RawValue]) -> CodeStats {
        let mut codes: Vec<i64> = Vec::with_capacity(cells.len());
        let mut missing = 0usize;
        for cell in cells {
            match cell {
                RawValue::Code(code) => codes.push(*code),
                RawValue::Missing => missing += 1,
                RawValue::Text(_) => {}
            }
        }

        let count = codes.len();
        let mean = if count > 0 {
            Some(codes.iter().map(|&c| c as f64).sum::<f64>() / count as f64)
        } else {
            None
        };

        CodeStats {
            column: column.to_string(),
            count,
            missing,
            min: codes.iter().min().copied(),
            max: codes.iter().max().copied(),
            mean,
            median: Self::median_code(&codes),
        }
    }
}
