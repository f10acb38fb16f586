// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Three error families, one per thing that can go wrong in the
// forecasting pipeline:
//
//   DataError   — the input table is missing columns, has bad
//                 cells, or the year filter kept nothing
//   ShapeError  — a split or window request does not fit the
//                 data (e.g. asking for the 3-D shape of an
//                 empty window set)
//   ScalerError — the min-max scaler was used before fitting,
//                 fitted twice, or fitted on a flat series
//
// These are plain enums built with `thiserror`, so the layers
// above can wrap them in `anyhow::Error` with extra context while
// tests can still match on the exact variant.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("required column '{0}' is not present in the table")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' is empty")]
    MissingValue { row: usize, column: String },

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue { row: usize, column: String, value: String },

    #[error("no rows with a year between {from} and {to}")]
    NoRowsInRange { from: i32, to: i32 },

    #[error("row {row}: year {current} comes after {previous}; series is not in chronological order")]
    NotChronological { row: usize, previous: i32, current: i32 },

    #[error("invalid year range: {from} > {to}")]
    InvalidYearRange { from: i32, to: i32 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    #[error("window width must be positive")]
    ZeroWidth,

    #[error("window set is empty; there is nothing to reshape")]
    EmptyWindowSet,

    #[error("window {index} has length {actual}, expected {expected}")]
    WindowLength { index: usize, expected: usize, actual: usize },

    #[error("{windows} windows but {labels} labels")]
    LabelCount { windows: usize, labels: usize },

    #[error("invalid split: training={training}, validation={validation}")]
    InvalidSplit { training: f64, validation: f64 },

    #[error("expected {expected} predictions, got {actual}")]
    PredictionCount { expected: usize, actual: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScalerError {
    #[error("scaler has not been fitted")]
    NotFitted,

    #[error("scaler is already fitted; refitting on other data is not allowed")]
    AlreadyFitted,

    #[error("cannot fit scaler on an empty slice")]
    EmptyInput,

    #[error("cannot fit scaler: every value equals {0}, so max - min is zero")]
    ZeroRange(f64),
}
