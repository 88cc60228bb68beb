//! Configuration module for the G front end
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

// Fixed format constants and runtime preferences
pub mod constants;
pub mod runtime;

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_constants_are_consistent() {
        assert!(compile_time::buffer::INITIAL_CAPACITY.is_power_of_two());
        assert!(compile_time::hashtable::INITIAL_CAPACITY.is_power_of_two());
        assert!(compile_time::hashtable::MAX_LOAD > 0.0 && compile_time::hashtable::MAX_LOAD < 1.0);
        assert!(compile_time::scanner::MAX_FILE_NESTING > 0);
        assert!(!compile_time::imports::SOURCE_EXTENSION.starts_with('.'));
    }
}
