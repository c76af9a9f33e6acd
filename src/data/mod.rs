//! Data module - survey loading, codebook, and recoding

mod codebook;
mod loader;
mod record;
mod recoder;

pub use codebook::{Codebook, ColumnSpec, SchemaError};
pub use loader::{from_dataframe, load, LoadError};
pub use record::{NormalizedRecord, NormalizedValue, RawRecord, RawValue};
pub use recoder::{RecodeError, RecodeOutcome, RecodeSummary, Recoder};
