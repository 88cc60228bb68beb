//! Source locations for diagnostics and token dumps
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a byte stream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Bytes consumed from the start of the source (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Position after consuming one byte
    pub fn advance(self, byte: u8) -> Self {
        match byte {
            b'\n' => Self::new(self.offset + 1, self.line + 1, 1),
            _ => Self::new(self.offset + 1, self.line, self.column + 1),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range of source text, start inclusive and end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering the single byte at `pos`
    pub fn single(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos.advance(b' '),
        }
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start().advance(b'a').advance(b'b');
        assert_eq!(pos, Position::new(2, 1, 3));

        let next_line = pos.advance(b'\n');
        assert_eq!(next_line, Position::new(3, 2, 1));
    }

    #[test]
    fn test_single_span() {
        let span = Span::single(Position::new(4, 2, 7));
        assert_eq!(span.len(), 1);
        assert_eq!(span.end().column, 8);
        assert_eq!(span.to_string(), "2:7-8");
    }

    #[test]
    fn test_multiline_span_display() {
        let span = Span::new(Position::new(0, 1, 5), Position::new(20, 3, 2));
        assert_eq!(span.to_string(), "1:5-3:2");
        assert!(!span.is_empty());
    }
}
