//! Record Types Module
//! Raw and normalized row representations shared by the loader and recoder.

use std::fmt;

use super::codebook::{Codebook, SchemaError};

/// A single raw cell as read from the survey file.
///
/// Cells are integer codes in the observed dataset; `Text` covers label-form
/// input (re-running the recoder over its own output) and `Missing` is the
/// internal sentinel for absent or empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Code(i64),
    Text(String),
    Missing,
}

/// One respondent's raw answers, ordered by codebook column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    values: Vec<RawValue>,
}

impl RawRecord {
    pub fn new(values: Vec<RawValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[RawValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RawValue> {
        self.values.get(index)
    }
}

/// A recoded cell: a label drawn from the column's code table, or `Unknown`.
///
/// Raw codes and empty cells never survive into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedValue {
    Label(String),
    Unknown,
}

impl NormalizedValue {
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedValue::Label(label) => label,
            NormalizedValue::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One respondent's recoded answers, ordered by codebook column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    values: Vec<NormalizedValue>,
}

impl NormalizedRecord {
    pub(crate) fn new(values: Vec<NormalizedValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[NormalizedValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&NormalizedValue> {
        self.values.get(index)
    }

    /// Look up a field by its human-readable column name.
    pub fn field<'a>(
        &'a self,
        codebook: &Codebook,
        display_name: &str,
    ) -> Result<&'a NormalizedValue, SchemaError> {
        let index = codebook.index_of_display(display_name)?;
        Ok(&self.values[index])
    }

    /// Convert back into raw (label-form) cells.
    ///
    /// Feeding the result through the recoder again is a no-op.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new(
            self.values
                .iter()
                .map(|v| RawValue::Text(v.as_str().to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_displays_as_literal() {
        assert_eq!(NormalizedValue::Unknown.to_string(), "Unknown");
        assert_eq!(
            NormalizedValue::Label("Retired".into()).to_string(),
            "Retired"
        );
    }

    #[test]
    fn to_raw_produces_label_text() {
        let record = NormalizedRecord::new(vec![
            NormalizedValue::Label("50-64".into()),
            NormalizedValue::Unknown,
        ]);
        let raw = record.to_raw();
        assert_eq!(raw.values()[0], RawValue::Text("50-64".into()));
        assert_eq!(raw.values()[1], RawValue::Text("Unknown".into()));
    }
}
