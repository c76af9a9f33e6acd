//! Survey Codebook Module
//! Static rename map and per-column code tables for the survey instrument.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Required column missing from input: '{0}'")]
    MissingColumn(String),
    #[error("Unexpected column in input: '{0}'")]
    UnexpectedColumn(String),
    #[error("No column named '{0}' in the codebook")]
    UnknownColumn(String),
}

/// Specification for one survey column: its raw header name, the
/// human-readable name it is renamed to, and the code table mapping integer
/// codes to category labels in declared order.
///
/// Pairing both names in one struct makes the rename map total by
/// construction: a column cannot exist without a display name.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    raw_name: String,
    display_name: String,
    codes: Vec<(i64, String)>,
}

impl ColumnSpec {
    pub fn new(raw_name: &str, display_name: &str, codes: &[(i64, &str)]) -> Self {
        Self {
            raw_name: raw_name.to_string(),
            display_name: display_name.to_string(),
            codes: codes
                .iter()
                .map(|(code, label)| (*code, label.to_string()))
                .collect(),
        }
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Label for an integer code, if the code is declared.
    pub fn label_for(&self, code: i64) -> Option<&str> {
        self.codes
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| label.as_str())
    }

    /// Declared labels in declared order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(|(_, label)| label.as_str())
    }

    /// Whether a string is one of this column's declared labels.
    pub fn has_label(&self, label: &str) -> bool {
        self.codes.iter().any(|(_, l)| l == label)
    }
}

/// The full set of column specifications for one survey instrument.
///
/// Built once at startup and passed by reference to the loader, recoder, and
/// aggregator; never mutated.
#[derive(Debug, Clone)]
pub struct Codebook {
    columns: Vec<ColumnSpec>,
}

impl Codebook {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of a column by human-readable name.
    pub fn index_of_display(&self, display_name: &str) -> Result<usize, SchemaError> {
        self.columns
            .iter()
            .position(|c| c.display_name == display_name)
            .ok_or_else(|| SchemaError::UnknownColumn(display_name.to_string()))
    }

    /// Index of a column by raw header name, if present.
    pub fn index_of_raw(&self, raw_name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.raw_name == raw_name)
    }

    pub fn column(&self, display_name: &str) -> Result<&ColumnSpec, SchemaError> {
        self.index_of_display(display_name).map(|i| &self.columns[i])
    }

    /// The 15-column National Poll on Healthy Aging (NPHA) instrument.
    ///
    /// Raw header names are reproduced verbatim from the upstream file,
    /// including its misspellings ("Phyiscal Health", "Uknown Keeps Patient
    /// from Sleeping").
    pub fn npha() -> Self {
        let health: &[(i64, &str)] = &[
            (-1, "Refused"),
            (1, "Excellent"),
            (2, "Very Good"),
            (3, "Good"),
            (4, "Fair"),
            (5, "Poor"),
        ];
        let yes_no: &[(i64, &str)] = &[(0, "No"), (1, "Yes")];

        Self::new(vec![
            ColumnSpec::new(
                "Number of Doctors Visited",
                "Doctors Visited",
                &[
                    (1, "0-1 doctors"),
                    (2, "2-3 doctors"),
                    (3, "4 or more doctors"),
                ],
            ),
            ColumnSpec::new("Age", "Age Group", &[(1, "50-64"), (2, "65-80")]),
            ColumnSpec::new("Phyiscal Health", "Physical Health", health),
            ColumnSpec::new("Mental Health", "Mental Health", health),
            ColumnSpec::new("Dental Health", "Dental Health", health),
            ColumnSpec::new(
                "Employment",
                "Employment Status",
                &[
                    (-1, "Refused"),
                    (1, "Working full-time"),
                    (2, "Working part-time"),
                    (3, "Retired"),
                    (4, "Not working at this time"),
                ],
            ),
            ColumnSpec::new(
                "Stress Keeps Patient from Sleeping",
                "Stress Impact",
                yes_no,
            ),
            ColumnSpec::new(
                "Medication Keeps Patient from Sleeping",
                "Medication Impact",
                yes_no,
            ),
            ColumnSpec::new("Pain Keeps Patient from Sleeping", "Pain Impact", yes_no),
            ColumnSpec::new(
                "Bathroom Needs Keeps Patient from Sleeping",
                "Bathroom Needs Impact",
                yes_no,
            ),
            ColumnSpec::new(
                "Uknown Keeps Patient from Sleeping",
                "Unknown Impact",
                yes_no,
            ),
            ColumnSpec::new(
                "Trouble Sleeping",
                "Trouble Sleeping",
                &[(-1, "Refused"), (1, "Yes"), (2, "No"), (3, "Sometimes")],
            ),
            ColumnSpec::new(
                "Prescription Sleep Medication",
                "Prescription Medication",
                &[
                    (-1, "Refused"),
                    (1, "Use regularly"),
                    (2, "Use occasionally"),
                    (3, "Do not use"),
                ],
            ),
            ColumnSpec::new(
                "Race",
                "Race Ethnicity",
                &[
                    (-2, "Not asked"),
                    (-1, "Refused"),
                    (1, "White, Non-Hispanic"),
                    (2, "Black, Non-Hispanic"),
                    (3, "Other, Non-Hispanic"),
                    (4, "Hispanic"),
                    (5, "2+ Races, Non-Hispanic"),
                ],
            ),
            ColumnSpec::new(
                "Gender",
                "Gender",
                &[(-2, "Not asked"), (-1, "Refused"), (1, "Male"), (2, "Female")],
            ),
        ])
    }
}
