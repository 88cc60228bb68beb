//! Symbol table errors

use crate::logging::codes;

pub type SymbolResult<T> = Result<T, SymbolError>;

/// Names are carried undecorated, ready for diagnostics
#[derive(Debug, Clone, thiserror::Error)]
pub enum SymbolError {
    #[error("name already exists: {name}")]
    AlreadyExists { name: String },

    #[error("name not found: {name}")]
    NotFound { name: String },

    #[error("value for {name} does not match its {expected} type")]
    PayloadMismatch { name: String, expected: String },

    #[error("symbol {name} could not be encoded: {message}")]
    Encoding { name: String, message: String },
}

impl SymbolError {
    pub fn already_exists(name: &str) -> Self {
        Self::AlreadyExists {
            name: name.to_string(),
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    pub fn payload_mismatch(name: &str, expected: &str) -> Self {
        Self::PayloadMismatch {
            name: name.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn encoding(name: &str, err: impl std::fmt::Display) -> Self {
        Self::Encoding {
            name: name.to_string(),
            message: err.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SymbolError::AlreadyExists { .. } => codes::symbols::DUPLICATE_SYMBOL,
            SymbolError::NotFound { .. } => codes::symbols::SYMBOL_NOT_FOUND,
            SymbolError::PayloadMismatch { .. } => codes::symbols::PAYLOAD_MISMATCH,
            SymbolError::Encoding { .. } => codes::symbols::SYMBOL_ENCODING,
        }
    }
}
