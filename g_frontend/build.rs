// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    buffer: BufferLimits,
    hashtable: HashTableLimits,
    scanner: ScannerLimits,
    imports: ImportSettings,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct BufferLimits {
    initial_capacity: usize,
}

#[derive(serde::Deserialize)]
struct HashTableLimits {
    initial_capacity: usize,
    max_load: f64,
}

#[derive(serde::Deserialize)]
struct ScannerLimits {
    max_file_nesting: usize,
}

#[derive(serde::Deserialize)]
struct ImportSettings {
    source_extension: String,
    default_search_path: String,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_events_per_file: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=G_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=G_CONFIG_DIR");

    let profile = env::var("G_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("G_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of g_frontend directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig) {
    if !config.buffer.initial_capacity.is_power_of_two() || config.buffer.initial_capacity < 2 {
        panic!("buffer.initial_capacity must be a power of two and at least 2");
    }

    // Linear probing masks with capacity - 1
    if !config.hashtable.initial_capacity.is_power_of_two() {
        panic!("hashtable.initial_capacity must be a power of two");
    }

    if !(config.hashtable.max_load > 0.0 && config.hashtable.max_load < 1.0) {
        panic!("hashtable.max_load must be between 0 and 1 (exclusive)");
    }

    // Room for at least one entry before the first growth
    if (config.hashtable.initial_capacity as f64) * config.hashtable.max_load < 3.0 {
        panic!("hashtable.initial_capacity is too small for the configured max_load");
    }

    if config.scanner.max_file_nesting == 0 {
        panic!("scanner.max_file_nesting must allow at least one open source");
    }

    if config.imports.source_extension.is_empty() || config.imports.source_extension.contains('.')
    {
        panic!("imports.source_extension must be a bare extension such as \"g\"");
    }

    if config.logging.max_log_events_per_file > config.logging.log_buffer_size {
        panic!("logging.max_log_events_per_file exceeds logging.log_buffer_size");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod buffer {{
        pub const INITIAL_CAPACITY: usize = {};
    }}

    pub mod hashtable {{
        pub const INITIAL_CAPACITY: usize = {};
        pub const MAX_LOAD: f64 = {:?};
    }}

    pub mod scanner {{
        pub const MAX_FILE_NESTING: usize = {};
    }}

    pub mod imports {{
        pub const SOURCE_EXTENSION: &str = {:?};
        pub const DEFAULT_SEARCH_PATH: &str = {:?};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.buffer.initial_capacity,
        config.hashtable.initial_capacity,
        config.hashtable.max_load,
        config.scanner.max_file_nesting,
        config.imports.source_extension,
        config.imports.default_search_path,
        config.logging.log_buffer_size,
        config.logging.max_log_events_per_file,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
