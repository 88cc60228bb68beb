//! Scanner resource errors
use crate::config::compile_time::scanner::MAX_FILE_NESTING;
use crate::logging::codes;

/// Failures that stop scanning. Everything else is reported and resynchronized.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScannerError {
    #[error("maximum file nesting depth exceeded: {depth} open sources (max {MAX_FILE_NESTING})")]
    NestingTooDeep { depth: usize },

    #[error("cannot open input file: \"{path}\": {message}")]
    OpenFailed { path: String, message: String },
}

impl ScannerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScannerError::NestingTooDeep { .. } => codes::lexical::NESTING_TOO_DEEP,
            ScannerError::OpenFailed { .. } => codes::lexical::SOURCE_OPEN_FAILED,
        }
    }
}

pub type ScannerResult<T> = Result<T, ScannerError>;
