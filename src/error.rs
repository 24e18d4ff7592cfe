use thiserror::Error;

/// Errors returned by clustering and ingestion in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset has no instances, or instances have no attributes.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Vectors (or dataset rows) have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A CSV field could not be read as a number.
    #[error("line {line}, field {field}: cannot parse {value:?} as a number")]
    Parse {
        /// 1-based line number in the input.
        line: u64,
        /// 0-based field index within the record.
        field: usize,
        /// The offending field, trimmed.
        value: String,
    },

    /// Malformed CSV input.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// I/O failure while reading input.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
