//! Error types for the hash table

use crate::logging::codes::{self, Code};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashTableError {
    #[error("key already exists: {key}")]
    AlreadyExists { key: String },

    #[error("key not found: {key}")]
    NotFound { key: String },

    #[error("empty value for key: {key}")]
    EmptyValue { key: String },
}

impl HashTableError {
    pub fn already_exists(key: &str) -> Self {
        Self::AlreadyExists {
            key: key.to_string(),
        }
    }

    pub fn not_found(key: &str) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    pub fn empty_value(key: &str) -> Self {
        Self::EmptyValue {
            key: key.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::AlreadyExists { .. } => codes::hashtable::KEY_EXISTS,
            Self::NotFound { .. } => codes::hashtable::KEY_NOT_FOUND,
            Self::EmptyValue { .. } => codes::hashtable::EMPTY_VALUE,
        }
    }
}

pub type HashTableResult<T> = Result<T, HashTableError>;
