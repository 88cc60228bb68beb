//! Growable byte buffer used to accumulate lexemes and decorated names.
//!
//! The buffer tracks a logical capacity that doubles whenever an append would not leave room
//! for a trailing terminator, so `capacity() >= len() + 1` always holds. `reset` clears the
//! contents but keeps the allocation.

use crate::config::compile_time::buffer::INITIAL_CAPACITY;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
        }
    }

    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.append_str(text);
        buffer
    }

    /// Make room for `additional` bytes plus the terminator slot
    fn grow_for(&mut self, additional: usize) {
        if self.bytes.len() + additional + 1 > self.capacity {
            while self.bytes.len() + additional + 1 > self.capacity {
                self.capacity <<= 1;
            }
            self.bytes.reserve(self.capacity - self.bytes.len());
        }
    }

    /// Logical clear; the allocation is kept
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    pub fn append(&mut self, byte: u8) {
        self.grow_for(1);
        self.bytes.push(byte);
    }

    pub fn append_str(&mut self, text: &str) {
        self.append_bytes(text.as_bytes());
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.grow_for(bytes.len());
        self.bytes.extend_from_slice(bytes);
    }

    /// Append the minimal big-endian encoding of `value`.
    ///
    /// Leading zero bytes of the 32-bit two's complement form are dropped and the remaining
    /// bytes are written raw. Zero is written as a single zero byte.
    pub fn append_packed_int(&mut self, value: i32) {
        let raw = (value as u32).to_be_bytes();
        match raw.iter().position(|&b| b != 0) {
            Some(first) => self.append_bytes(&raw[first..]),
            None => self.append(0),
        }
    }

    /// Cut the contents back to `length` bytes; longer lengths are ignored
    pub fn truncate(&mut self, length: usize) {
        self.bytes.truncate(length);
    }

    /// Borrowed view, valid until the next mutating call
    pub fn contents(&self) -> &[u8] {
        &self.bytes
    }

    /// Contents as text, replacing invalid UTF-8
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn last(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpack(bytes: &[u8]) -> i32 {
        bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32) as i32
    }

    #[test]
    fn test_initial_state() {
        let buffer = ByteBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), INITIAL_CAPACITY);
        assert_eq!(buffer.contents(), b"");
    }

    #[test]
    fn test_capacity_doubles_and_keeps_terminator_room() {
        let mut buffer = ByteBuffer::new();
        for (i, byte) in b"abcdefghijklmnopqrstuvwxyz".iter().enumerate() {
            buffer.append(*byte);
            assert!(buffer.capacity() >= buffer.len() + 1, "after {} appends", i + 1);
            assert!(buffer.capacity().is_power_of_two());
        }
        assert_eq!(buffer.text(), "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(buffer.capacity(), 32);
    }

    #[test]
    fn test_reset_keeps_allocation() {
        let mut buffer = ByteBuffer::with_text("a fairly long lexeme");
        let capacity = buffer.capacity();
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), capacity);

        buffer.append_str("x");
        assert_eq!(buffer.to_string(), "x");
    }

    #[test]
    fn test_truncate() {
        let mut buffer = ByteBuffer::with_text("$cls$meth@int");
        buffer.truncate(4);
        assert_eq!(buffer.text(), "$cls");
        buffer.truncate(100);
        assert_eq!(buffer.text(), "$cls");
        assert_eq!(buffer.last(), Some(b's'));
    }

    #[test]
    fn test_packed_int_zero_is_one_byte() {
        let mut buffer = ByteBuffer::new();
        buffer.append_packed_int(0);
        assert_eq!(buffer.contents(), &[0u8]);
    }

    #[test]
    fn test_packed_int_minimal_encoding() {
        let mut buffer = ByteBuffer::new();
        buffer.append_packed_int(0x41);
        assert_eq!(buffer.contents(), b"A");

        buffer.reset();
        buffer.append_packed_int(0x4142);
        assert_eq!(buffer.contents(), b"AB");

        buffer.reset();
        buffer.append_packed_int(0x0001_0000);
        assert_eq!(buffer.contents(), &[1u8, 0, 0]);

        buffer.reset();
        buffer.append_packed_int(-1);
        assert_eq!(buffer.contents(), &[0xffu8, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_packed_int_recovers_value() {
        for value in [
            123,
            234,
            345,
            0,
            10_230_495,
            -123,
            -234,
            i32::MIN,
            i32::MAX,
        ] {
            let mut buffer = ByteBuffer::new();
            buffer.append_packed_int(value);
            assert!(!buffer.is_empty() && buffer.len() <= 4);
            assert_eq!(unpack(buffer.contents()), value, "value {}", value);
        }
    }
}
