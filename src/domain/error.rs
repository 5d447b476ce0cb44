//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for capindex.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price table has no rows")]
    EmptyInput,

    #[error("insufficient data: {months} distinct calendar month(s), need at least 2")]
    InsufficientData { months: usize },

    #[error("invalid date range {start} to {end}: {reason}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    #[error("export requested before a successful calculation")]
    NotCalculated,

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&IndexError> for std::process::ExitCode {
    fn from(err: &IndexError) -> Self {
        let code: u8 = match err {
            IndexError::Io(_) => 1,
            IndexError::ConfigParse { .. }
            | IndexError::ConfigMissing { .. }
            | IndexError::ConfigInvalid { .. } => 2,
            IndexError::EmptyInput
            | IndexError::InsufficientData { .. }
            | IndexError::MalformedRow { .. } => 3,
            IndexError::InvalidDateRange { .. } | IndexError::NotCalculated => 4,
        };
        std::process::ExitCode::from(code)
    }
}
