use std::num::ParseIntError;

use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Malformed instruction streams fed to the batch driver.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum DriverError {
    #[error("expected a `#` batch header, found `{0}`")]
    ExpectedHeader(String),

    #[error("batch header is missing its instruction count")]
    MissingBatchSize,

    #[error("expected instruction `I` or `F`, found `{0}`")]
    UnknownInstruction(String),

    #[error("instruction `{0}` is missing its key operand")]
    MissingKey(String),

    #[error("batch declared {expected} inserts but the stream ended after {found}")]
    TruncatedBatch { expected: usize, found: usize },
}

#[derive(Debug, ThisError, PartialEq, Clone)]
pub enum Error {
    #[error("failed to parse number: {0}")]
    InvalidNumber(String),

    #[error("failed to parse key: {0}")]
    InvalidKey(String),

    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("io error: {0}")]
    Io(String),
}

impl From<ParseIntError> for Error {
    fn from(error: ParseIntError) -> Self {
        Error::InvalidNumber(format!("{}", error))
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(format!("{}", error))
    }
}
