//! Error types surfaced by the survey loader and the scatter brush parser.

use thiserror::Error;

/// Errors that abort loading a survey dataset.
///
/// Loading is all-or-nothing: the first bad row or header stops the load and
/// no partial dataset is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("required column `{column}` is missing from the header")]
    MissingColumn { column: &'static str },

    #[error("row {row}: required field `{column}` is missing or empty")]
    MissingValue { row: usize, column: &'static str },

    #[error("row {row}: field `{column}` has invalid value {value:?}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A brush rectangle could not be parsed from its `x0,y0,x1,y1` text form.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid brush selection {0:?}, expected four comma-separated numbers x0,y0,x1,y1")]
pub struct BrushParseError(pub String);
