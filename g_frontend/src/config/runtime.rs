// RUNTIME PREFERENCES (User Experience)

use crate::config::compile_time::imports::DEFAULT_SEARCH_PATH;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerPreferences {
    /// Whether unrecognized bytes produce a warning (they are skipped either way)
    pub warn_unrecognized_characters: bool,

    /// Whether opening and closing sources is logged at debug level
    pub log_source_transitions: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            warn_unrecognized_characters: env::var(env_vars::SCANNER_WARN_UNRECOGNIZED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_source_transitions: env::var(env_vars::SCANNER_LOG_SOURCES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreferences {
    /// Directories searched first, in order (the `-i` list)
    pub search_path: Vec<PathBuf>,

    /// Whether the `G_INCLUDE` list is searched after `search_path`
    pub use_include_env: bool,
}

impl Default for ImportPreferences {
    fn default() -> Self {
        let raw = env::var(env_vars::IMPORT_PATH).unwrap_or_else(|_| DEFAULT_SEARCH_PATH.to_string());
        Self {
            search_path: split_search_path(&raw),
            use_include_env: env::var(env_vars::IMPORT_USE_INCLUDE_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl ImportPreferences {
    /// Prepend a directory given on the command line
    pub fn add_directory<P: AsRef<Path>>(&mut self, dir: P) {
        self.search_path.insert(0, dir.as_ref().to_path_buf());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to print a cargo-style report grouped by source at exit
    pub enable_cargo_style_output: bool,

    /// Verbosity from 0 to 50, raises `min_log_level` when set
    pub verbosity: u8,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            enable_cargo_style_output: env::var(env_vars::LOGGING_CARGO_STYLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            verbosity: env::var(env_vars::VERBOSE)
                .ok()
                .and_then(|v| v.parse().ok())
                .map(|v: u8| v.min(MAX_VERBOSITY))
                .unwrap_or(0),
        }
    }
}

/// Highest accepted verbosity
pub const MAX_VERBOSITY: u8 = 50;

impl LoggingPreferences {
    /// Level actually applied: verbosity can only make logging chattier
    pub fn effective_log_level(&self) -> LogLevel {
        let from_verbosity = match self.verbosity {
            0 => LogLevel::Error,
            1..=9 => LogLevel::Info,
            _ => LogLevel::Debug,
        };
        self.min_log_level.max(from_verbosity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Split a colon separated directory list, dropping empty entries
pub fn split_search_path(raw: &str) -> Vec<PathBuf> {
    raw.split(':')
        .filter(|part| !part.trim().is_empty())
        .map(|part| PathBuf::from(part.trim()))
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid configuration file {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub scanner: ScannerPreferences,
    #[serde(default)]
    pub imports: ImportPreferences,
    #[serde(default)]
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load preferences from a TOML file; missing sections fall back to the environment
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `G_CONFIG_FILE` when set, otherwise the environment defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(env_vars::CONFIG_FILE) {
            Ok(path) => Self::from_toml_file(path),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Scanner
    pub const SCANNER_WARN_UNRECOGNIZED: &str = "G_SCANNER_WARN_UNRECOGNIZED";
    pub const SCANNER_LOG_SOURCES: &str = "G_SCANNER_LOG_SOURCES";

    // Imports
    pub const IMPORT_PATH: &str = "G_IMPORT_PATH";
    pub const IMPORT_USE_INCLUDE_ENV: &str = "G_IMPORT_USE_INCLUDE";
    pub const INCLUDE: &str = "G_INCLUDE";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "G_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "G_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "G_LOGGING_CARGO_STYLE";
    pub const VERBOSE: &str = "G_VERBOSE";

    // Whole-config file
    pub const CONFIG_FILE: &str = "G_CONFIG_FILE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("WARN"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("loud"), None);
    }

    #[test]
    fn test_split_search_path() {
        let dirs = split_search_path(".:include::/usr/share/g ");
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("."),
                PathBuf::from("include"),
                PathBuf::from("/usr/share/g")
            ]
        );
    }

    #[test]
    fn test_verbosity_raises_level() {
        let mut prefs = LoggingPreferences {
            use_structured_logging: false,
            min_log_level: LogLevel::Warning,
            enable_cargo_style_output: false,
            verbosity: 0,
        };
        assert_eq!(prefs.effective_log_level(), LogLevel::Warning);

        prefs.verbosity = 3;
        assert_eq!(prefs.effective_log_level(), LogLevel::Info);

        prefs.verbosity = 50;
        assert_eq!(prefs.effective_log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_add_directory_takes_priority() {
        let mut prefs = ImportPreferences {
            search_path: vec![PathBuf::from(".")],
            use_include_env: false,
        };
        prefs.add_directory("lib");
        assert_eq!(prefs.search_path[0], PathBuf::from("lib"));
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [scanner]
            warn_unrecognized_characters = false
            log_source_transitions = true

            [imports]
            search_path = ["lib", "vendor"]
            use_include_env = false
            "#,
        )
        .unwrap();

        assert!(!config.scanner.warn_unrecognized_characters);
        assert_eq!(config.imports.search_path.len(), 2);
        assert!(!config.imports.use_include_env);
    }

    #[test]
    fn test_runtime_config_rejects_bad_toml() {
        let result = RuntimeConfig::from_toml_str("[scanner\nbroken");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
