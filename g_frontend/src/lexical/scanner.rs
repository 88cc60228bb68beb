//! The token scanner and its stack of open sources.
//!
//! `next_token` classifies one token at a time; the text of the last token stays in the
//! lexeme buffer until the next call. Sources nest: opening a file while another is being
//! scanned suspends the outer one until the inner one is exhausted.

use super::error::{ScannerError, ScannerResult};
use super::source::{is_space, FrameRead, ScanChar, SourceFrame};
use crate::buffer::ByteBuffer;
use crate::config::compile_time::scanner::MAX_FILE_NESTING;
use crate::config::constants::sources::{NO_OPEN_FILE, NO_POSITION};
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::logging::{Reporter, SourceLocation};
use crate::tokens::{lookup_keyword, TokenClass, TokenKind};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Per-scanner counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub literal_tokens: usize,
    pub error_tokens: usize,
    pub sources_opened: usize,
    pub max_depth: usize,
}

impl ScanMetrics {
    fn record_token(&mut self, kind: TokenKind) {
        if kind == TokenKind::EndOfInput {
            return;
        }
        self.total_tokens += 1;
        match kind.class() {
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::Identifier => self.identifier_tokens += 1,
            TokenClass::Literal => self.literal_tokens += 1,
            TokenClass::Control => self.error_tokens += 1,
            TokenClass::Operator | TokenClass::Punctuation => {}
        }
    }

    fn record_open(&mut self, depth: usize) {
        self.sources_opened += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

pub struct Scanner {
    frames: Vec<SourceFrame>,
    pub(super) lexeme: ByteBuffer,
    reporter: Reporter,
    preferences: ScannerPreferences,
    metrics: ScanMetrics,
    token_line: i32,
    token_column: i32,
    completion_logged: bool,
}

impl Scanner {
    pub fn new(reporter: Reporter) -> Self {
        Self::with_preferences(reporter, ScannerPreferences::default())
    }

    pub fn with_preferences(reporter: Reporter, preferences: ScannerPreferences) -> Self {
        Self {
            frames: Vec::new(),
            lexeme: ByteBuffer::new(),
            reporter,
            preferences,
            metrics: ScanMetrics::default(),
            token_line: NO_POSITION,
            token_column: NO_POSITION,
            completion_logged: false,
        }
    }

    // ========================================================================
    // Source stack
    // ========================================================================

    /// Open `path` and make it the active source
    pub fn open_source<P: AsRef<Path>>(&mut self, path: P) -> ScannerResult<()> {
        let path = path.as_ref();
        let name = path.display().to_string();
        self.check_depth()?;

        let file = File::open(path).map_err(|err| {
            let err = ScannerError::OpenFailed {
                path: name.clone(),
                message: err.to_string(),
            };
            self.reporter.fatal(err.error_code(), &err.to_string());
            err
        })?;

        self.push_frame(SourceFrame::new(name, Box::new(file)));
        Ok(())
    }

    /// Make any readable stream the active source
    pub fn push_source(&mut self, name: &str, reader: Box<dyn Read>) -> ScannerResult<()> {
        self.check_depth()?;
        self.push_frame(SourceFrame::new(name, reader));
        Ok(())
    }

    fn check_depth(&self) -> ScannerResult<()> {
        if self.frames.len() >= MAX_FILE_NESTING {
            let err = ScannerError::NestingTooDeep {
                depth: self.frames.len() + 1,
            };
            self.reporter.fatal(err.error_code(), &err.to_string());
            return Err(err);
        }
        Ok(())
    }

    fn push_frame(&mut self, frame: SourceFrame) {
        if self.preferences.log_source_transitions {
            log_debug!("Source opened",
                "name" => frame.name(),
                "depth" => self.frames.len() + 1
            );
        }
        self.frames.push(frame);
        self.completion_logged = false;
        self.metrics.record_open(self.frames.len());
    }

    /// Close the active source; returns false when none was open
    fn pop_source(&mut self) -> bool {
        match self.frames.pop() {
            Some(frame) => {
                if self.preferences.log_source_transitions {
                    log_debug!("Source closed",
                        "name" => frame.name(),
                        "lines" => frame.line(),
                        "depth" => self.frames.len()
                    );
                }
                true
            }
            None => false,
        }
    }

    /// Number of open sources
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    // ========================================================================
    // Character primitives
    // ========================================================================

    pub(super) fn next_char(&mut self) -> ScanChar {
        let Some(frame) = self.frames.last_mut() else {
            return ScanChar::EndOfInput;
        };

        match frame.read() {
            FrameRead::Byte(b) => ScanChar::Byte(b),
            FrameRead::End => ScanChar::EndOfFrame,
            FrameRead::Failed(err) => {
                let message = format!("read failed: {}", err);
                let location = self.location();
                self.reporter
                    .syntax(codes::lexical::READ_FAILURE, &location, &message);
                ScanChar::EndOfFrame
            }
        }
    }

    /// Un-read a character. End markers need no push back since they repeat.
    pub(super) fn push_back(&mut self, ch: ScanChar) {
        if let (ScanChar::Byte(b), Some(frame)) = (ch, self.frames.last_mut()) {
            frame.unread(b);
        }
    }

    pub(super) fn skip_whitespace(&mut self) {
        loop {
            match self.next_char() {
                ScanChar::Byte(b) if is_space(b) => {}
                other => {
                    self.push_back(other);
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// Scan the next token. Comments and ignored bytes never surface; once every source
    /// is exhausted this keeps returning `EndOfInput`.
    pub fn next_token(&mut self) -> TokenKind {
        let kind = loop {
            self.skip_whitespace();
            self.lexeme.reset();
            self.token_line = self.current_line();
            self.token_column = self.current_column();

            let token = match self.next_char() {
                ScanChar::EndOfInput => Some(TokenKind::EndOfInput),
                ScanChar::EndOfFrame => {
                    self.pop_source();
                    if self.frames.is_empty() {
                        Some(TokenKind::EndOfInput)
                    } else {
                        None
                    }
                }
                ScanChar::Byte(b'"') => Some(self.read_quoted(b'"')),
                ScanChar::Byte(b'\'') => Some(self.read_quoted(b'\'')),
                ScanChar::Byte(b'/') => self.comment_or_slash(),
                ScanChar::Byte(b) if b.is_ascii_digit() => Some(self.read_number(b)),
                ScanChar::Byte(b) if b.is_ascii_alphabetic() || b == b'_' => {
                    Some(self.read_word(b))
                }
                ScanChar::Byte(b) => self.read_punct(b),
            };

            if let Some(kind) = token {
                break kind;
            }
        };

        self.metrics.record_token(kind);
        if kind == TokenKind::EndOfInput && !self.completion_logged {
            self.completion_logged = true;
            log_debug!("Input exhausted",
                "tokens" => self.metrics.total_tokens,
                "keywords" => self.metrics.keyword_tokens,
                "identifiers" => self.metrics.identifier_tokens,
                "errors" => self.metrics.error_tokens,
                "sources" => self.metrics.sources_opened
            );
        }
        kind
    }

    fn read_word(&mut self, first: u8) -> TokenKind {
        self.lexeme.append(first);
        loop {
            match self.next_char() {
                ScanChar::Byte(b) if b.is_ascii_alphanumeric() || b == b'_' => self.lexeme.append(b),
                other => {
                    self.push_back(other);
                    break;
                }
            }
        }
        lookup_keyword(self.lexeme.contents())
    }

    /// Operators, with one character of lookahead for the two-character forms
    fn read_punct(&mut self, first: u8) -> Option<TokenKind> {
        self.lexeme.append(first);
        let kind = match first {
            b'*' => TokenKind::Mul,
            b'%' => TokenKind::Mod,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'[' => TokenKind::OpenSquare,
            b']' => TokenKind::CloseSquare,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'.' => TokenKind::Dot,
            b'|' => TokenKind::Or,
            b'&' => TokenKind::And,
            b'=' => self.pair(&[(b'=', TokenKind::Equality)], TokenKind::Assign),
            b'<' => self.pair(
                &[(b'=', TokenKind::Lte), (b'>', TokenKind::Neq)],
                TokenKind::Lt,
            ),
            b'>' => self.pair(&[(b'=', TokenKind::Gte)], TokenKind::Gt),
            b'-' => self.pair(&[(b'-', TokenKind::Dec)], TokenKind::Sub),
            b'+' => self.pair(&[(b'+', TokenKind::Inc)], TokenKind::Add),
            b'!' => self.pair(&[(b'=', TokenKind::Neq)], TokenKind::Not),
            other => {
                self.lexeme.reset();
                if self.preferences.warn_unrecognized_characters {
                    let message = format!(
                        "unrecognized character in input: '{}' (0x{:02X}). Ignored.",
                        ScanChar::Byte(other).describe(),
                        other
                    );
                    let location = self.location();
                    self.reporter
                        .warning(codes::lexical::INVALID_CHARACTER, &location, &message);
                }
                return None;
            }
        };
        Some(kind)
    }

    fn pair(&mut self, seconds: &[(u8, TokenKind)], single: TokenKind) -> TokenKind {
        let next = self.next_char();
        if let Some(b) = next.byte() {
            if let Some((_, kind)) = seconds.iter().find(|(second, _)| *second == b) {
                self.lexeme.append(b);
                return *kind;
            }
        }
        self.push_back(next);
        single
    }

    /// Pull one token and require `kind`
    pub fn expect(&mut self, kind: TokenKind) -> TokenKind {
        let got = self.next_token();
        if got == kind {
            return got;
        }
        let message = format!("expected a {} but got a {}.", kind, got);
        self.report_syntax(codes::syntax::UNEXPECTED_TOKEN, &message);
        TokenKind::Error
    }

    /// Pull one token and require any of `kinds`
    pub fn expect_any(&mut self, kinds: &[TokenKind]) -> TokenKind {
        let got = self.next_token();
        if kinds.contains(&got) {
            return got;
        }
        let expected = kinds
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!("expected {} but got a {}.", expected, got);
        self.report_syntax(codes::syntax::UNEXPECTED_TOKEN, &message);
        TokenKind::Error
    }

    pub(super) fn report_syntax(&self, code: crate::logging::Code, message: &str) {
        let location = self.location();
        self.reporter.syntax(code, &location, message);
    }

    pub(super) fn report_warning(&self, code: crate::logging::Code, message: &str) {
        let location = self.location();
        self.reporter.warning(code, &location, message);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current_source_name(&self) -> &str {
        self.frames.last().map_or(NO_OPEN_FILE, SourceFrame::name)
    }

    pub fn current_line(&self) -> i32 {
        self.frames
            .last()
            .map_or(NO_POSITION, |frame| frame.line() as i32)
    }

    pub fn current_column(&self) -> i32 {
        self.frames
            .last()
            .map_or(NO_POSITION, |frame| frame.column() as i32)
    }

    /// Where the scanner is now, for diagnostics
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(
            self.current_source_name(),
            self.current_line(),
            self.current_column(),
        )
    }

    /// Where the last token started
    pub fn token_location(&self) -> SourceLocation {
        SourceLocation::new(
            self.current_source_name(),
            self.token_line,
            self.token_column,
        )
    }

    /// Copy of the last token's text, invalid UTF-8 replaced
    pub fn current_lexeme_text(&self) -> String {
        self.lexeme.text().into_owned()
    }

    pub fn current_lexeme_bytes(&self) -> &[u8] {
        self.lexeme.contents()
    }

    pub fn token_name(kind: TokenKind) -> &'static str {
        kind.name()
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("frames", &self.frames)
            .field("lexeme", &self.lexeme)
            .field("metrics", &self.metrics)
            .finish()
    }
}
