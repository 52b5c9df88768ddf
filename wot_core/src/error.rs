use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TunerError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("log format error: {0}")]
    LogFormat(#[from] LogFormatError),
    #[error(
        "bin index out of range at log line {line}: rpm index {rpm_idx}, load index {load_idx} (valid 1..={size})"
    )]
    IndexRange {
        line: u64,
        rpm_idx: i64,
        load_idx: i64,
        size: usize,
    },
    #[error("io error: {0}")]
    Io(String),
}

/// Why a log could not be turned into samples.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogFormatError {
    #[error("column '{0}' not found in log header")]
    MissingColumn(String),
    #[error("line {line}: column '{column}' has invalid value {value:?}")]
    BadField {
        line: u64,
        column: String,
        value: String,
    },
    #[error("line {line}: no value for column '{column}'")]
    ShortRow { line: u64, column: String },
    #[error("{0}")]
    Unreadable(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
