//! Character sources and the per-source read position
use crate::utils::Position;
use std::io::{self, BufReader, Bytes, Read};

/// One unit of scanner input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanChar {
    Byte(u8),
    /// The active source is exhausted; a parent may still have input
    EndOfFrame,
    /// No source is open at all
    EndOfInput,
}

impl ScanChar {
    pub fn byte(self) -> Option<u8> {
        match self {
            ScanChar::Byte(b) => Some(b),
            _ => None,
        }
    }

    /// Rendering used inside diagnostics
    pub fn describe(self) -> String {
        match self {
            ScanChar::Byte(b) => char::from(b).escape_default().to_string(),
            ScanChar::EndOfFrame => "end of file".to_string(),
            ScanChar::EndOfInput => "end of input".to_string(),
        }
    }
}

/// Whitespace as the scanner sees it, vertical tab included
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Result of reading one byte from a frame
#[derive(Debug)]
pub(crate) enum FrameRead {
    Byte(u8),
    End,
    Failed(io::Error),
}

/// An open source on the scanner's stack
pub struct SourceFrame {
    name: String,
    bytes: Bytes<BufReader<Box<dyn Read>>>,
    pushback: Vec<u8>,
    position: Position,
    last_column: u32,
    exhausted: bool,
}

impl SourceFrame {
    pub fn new(name: impl Into<String>, reader: Box<dyn Read>) -> Self {
        Self {
            name: name.into(),
            bytes: BufReader::new(reader).bytes(),
            pushback: Vec::new(),
            position: Position::start(),
            last_column: 1,
            exhausted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Next byte, updating line and column. Once the stream ends every later read is `End`.
    pub(crate) fn read(&mut self) -> FrameRead {
        let byte = match self.pushback.pop() {
            Some(byte) => byte,
            None if self.exhausted => return FrameRead::End,
            None => match self.bytes.next() {
                Some(Ok(byte)) => byte,
                Some(Err(err)) => {
                    self.exhausted = true;
                    return FrameRead::Failed(err);
                }
                None => {
                    self.exhausted = true;
                    return FrameRead::End;
                }
            },
        };

        if byte == b'\n' {
            self.last_column = self.position.column;
        }
        self.position = self.position.advance(byte);
        FrameRead::Byte(byte)
    }

    /// Un-read a byte. Only the most recent newline's column is remembered.
    pub fn unread(&mut self, byte: u8) {
        self.pushback.push(byte);
        self.position.offset = self.position.offset.saturating_sub(1);
        if byte == b'\n' {
            self.position.line = self.position.line.saturating_sub(1).max(1);
            self.position.column = self.last_column;
        } else {
            self.position.column = self.position.column.saturating_sub(1).max(1);
        }
    }
}

impl std::fmt::Debug for SourceFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFrame")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("pushback", &self.pushback)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}
