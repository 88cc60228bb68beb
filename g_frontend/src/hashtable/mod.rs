//! String-keyed storage engine for the symbol table

pub mod error;
pub mod table;

pub use error::{HashTableError, HashTableResult};
pub use table::HashTable;

use crate::config::constants::hashing::{FNV_OFFSET_BASIS, FNV_PRIME};

/// 32-bit FNV-1a over raw bytes
pub fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a(b""), 0x811c_9dc5);
        assert_eq!(fnv1a(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a(b"foobar"), 0xbf9c_f968);
    }
}
