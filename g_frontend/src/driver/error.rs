use crate::imports::ImportError;
use crate::lexical::ScannerError;
use crate::logging::codes;
use crate::symbols::SymbolError;

/// Failures that stop a run. Everything else is reported and counted.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Scanning failed: {0}")]
    Scanner(#[from] ScannerError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Symbol table failed: {0}")]
    Symbol(#[from] SymbolError),

    #[error("Cannot write output: {message}")]
    Output { message: String },
}

impl DriverError {
    pub fn output(err: std::io::Error) -> Self {
        Self::Output {
            message: err.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DriverError::Scanner(e) => e.error_code(),
            DriverError::Import(e) => e.error_code(),
            DriverError::Symbol(e) => e.error_code(),
            DriverError::Output { .. } => codes::imports::IO_ERROR,
        }
    }
}
