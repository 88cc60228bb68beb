//! Fixed constants that define data formats rather than limits.
//!
//! Unlike the generated `compile_time` limits these are not configurable: changing any of
//! them changes the meaning of hashed keys, escapes, or diagnostics.

pub mod hashing {
    /// FNV-1a 32-bit offset basis
    pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

    /// FNV-1a 32-bit prime
    pub const FNV_PRIME: u32 = 16_777_619;
}

pub mod escapes {
    /// `\x` escapes take at most this many hex digits (one 32-bit word)
    pub const MAX_HEX_DIGITS: usize = 8;

    /// `\d` escapes take at most this many decimal digits after an optional sign
    pub const MAX_DECIMAL_DIGITS: usize = 10;

    /// `\0` escapes take at most this many octal digits (one byte)
    pub const MAX_OCTAL_DIGITS: usize = 3;
}

pub mod sources {
    /// Name reported when no source is open
    pub const NO_OPEN_FILE: &str = "no open file";

    /// Line and column reported when no source is open
    pub const NO_POSITION: i32 = -1;
}

pub mod decoration {
    /// Prefix of a name component in a decorated key
    pub const NAME_MARKER: u8 = b'$';

    /// Prefix of a type component in a decorated key
    pub const TYPE_MARKER: u8 = b'@';
}
