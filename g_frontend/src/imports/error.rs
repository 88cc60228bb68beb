use crate::logging::codes;
use std::path::PathBuf;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    #[error("cannot find import \"{name}\" (searched: {})", display_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("invalid import name: \"{name}\"")]
    InvalidName { name: String },
}

impl ImportError {
    pub fn invalid_name(name: &str) -> Self {
        Self::InvalidName {
            name: name.escape_default().to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ImportError::NotFound { .. } => codes::imports::FILE_NOT_FOUND,
            ImportError::InvalidName { .. } => codes::imports::INVALID_PATH,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no directories".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
