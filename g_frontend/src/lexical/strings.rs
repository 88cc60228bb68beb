//! Quoted strings.
//!
//! Double-quoted strings process escapes; single-quoted strings are copied raw. Both may be
//! continued by a comma followed by another segment in the same quote style, with whitespace
//! and comments allowed on either side of the comma:
//!
//! ```text
//! "first half", // comment
//!     "second half"
//! ```

use super::scanner::Scanner;
use super::source::ScanChar;
use crate::config::constants::escapes::{MAX_DECIMAL_DIGITS, MAX_HEX_DIGITS, MAX_OCTAL_DIGITS};
use crate::logging::codes;
use crate::tokens::TokenKind;

impl Scanner {
    /// Entered after the opening quote
    pub(super) fn read_quoted(&mut self, quote: u8) -> TokenKind {
        let escapes = quote == b'"';
        loop {
            match self.next_char() {
                ScanChar::Byte(b'\n') => {
                    self.lexeme.reset();
                    self.push_back(ScanChar::Byte(b'\n'));
                    self.report_syntax(
                        codes::lexical::LINE_BREAK_IN_STRING,
                        "line breaks are not allowed in a string.",
                    );
                    return TokenKind::Error;
                }
                ScanChar::Byte(b) if b == quote => {
                    if !self.string_continues(quote) {
                        return TokenKind::QStrg;
                    }
                }
                ScanChar::Byte(b'\\') if escapes => {
                    if !self.read_escape() {
                        return self.unterminated_string();
                    }
                }
                ScanChar::Byte(b) => self.lexeme.append(b),
                ScanChar::EndOfFrame | ScanChar::EndOfInput => return self.unterminated_string(),
            }
        }
    }

    fn unterminated_string(&mut self) -> TokenKind {
        self.report_syntax(codes::lexical::UNTERMINATED_STRING, "unterminated string");
        TokenKind::Error
    }

    /// After a closing quote: true when another segment follows
    fn string_continues(&mut self, quote: u8) -> bool {
        self.skip_trivia();
        match self.next_char() {
            ScanChar::Byte(b',') => {
                self.skip_trivia();
                match self.next_char() {
                    ScanChar::Byte(b) if b == quote => true,
                    other => {
                        self.push_back(other);
                        self.report_syntax(
                            codes::lexical::INVALID_STRING_CONTINUATION,
                            "invalid string continuation. Expected to start another string segment.",
                        );
                        false
                    }
                }
            }
            other => {
                self.push_back(other);
                false
            }
        }
    }

    /// Entered after a backslash. Returns false when the source ended mid-escape.
    fn read_escape(&mut self) -> bool {
        let byte = match self.next_char() {
            ScanChar::Byte(b) => b,
            ScanChar::EndOfFrame | ScanChar::EndOfInput => return false,
        };

        match byte {
            b'x' | b'X' => self.numeric_escape(16, MAX_HEX_DIGITS, false),
            b'd' | b'D' => self.numeric_escape(10, MAX_DECIMAL_DIGITS, true),
            b'0' => self.numeric_escape(8, MAX_OCTAL_DIGITS, false),
            b'n' => self.lexeme.append(b'\n'),
            b'r' => self.lexeme.append(b'\r'),
            b't' => self.lexeme.append(b'\t'),
            b'b' => self.lexeme.append(0x08),
            b'f' => self.lexeme.append(0x0c),
            b'v' => self.lexeme.append(0x0b),
            other => self.lexeme.append(other),
        }
        true
    }

    /// `\x` and `\d` append the value packed; `\0` appends a single byte
    fn numeric_escape(&mut self, radix: u32, max_digits: usize, signed: bool) {
        let mut digits = String::new();

        if signed {
            match self.next_char() {
                ScanChar::Byte(sign @ (b'+' | b'-')) => digits.push(char::from(sign)),
                other => self.push_back(other),
            }
        }
        let sign_len = digits.len();

        let mut stop = None;
        while digits.len() - sign_len < max_digits {
            match self.next_char() {
                ScanChar::Byte(b) if char::from(b).is_digit(radix) => digits.push(char::from(b)),
                other => {
                    stop = Some(other);
                    break;
                }
            }
        }
        if let Some(other) = stop {
            self.push_back(other);
        }

        if digits.len() == sign_len {
            let kind = match radix {
                16 => "hex",
                8 => "octal",
                _ => "decimal",
            };
            let shown = stop.map_or_else(String::new, ScanChar::describe);
            let message = format!(
                "invalid {kind} escape code in string: '{shown}' is not a {kind} digit. Ignored."
            );
            self.report_warning(codes::lexical::INVALID_ESCAPE, &message);
            return;
        }

        match radix {
            8 => {
                let value = u32::from_str_radix(&digits, 8).unwrap_or(0);
                self.lexeme.append(value as u8);
            }
            16 => {
                let value = u32::from_str_radix(&digits, 16).unwrap_or(0);
                self.lexeme.append_packed_int(value as i32);
            }
            _ => {
                let value = digits.parse::<i64>().unwrap_or(0);
                self.lexeme.append_packed_int(value as i32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Reporter;
    use std::io::Cursor;

    fn scanner_over(text: &str) -> Scanner {
        let mut scanner = Scanner::new(Reporter::quiet());
        scanner
            .push_source("strings.g", Box::new(Cursor::new(text.as_bytes().to_vec())))
            .unwrap();
        scanner
    }

    fn single_string(text: &str) -> Vec<u8> {
        let mut scanner = scanner_over(text);
        assert_eq!(scanner.next_token(), TokenKind::QStrg, "scanning {}", text);
        scanner.current_lexeme_bytes().to_vec()
    }

    #[test]
    fn test_plain_strings() {
        assert_eq!(single_string("\"hello world\""), b"hello world");
        assert_eq!(single_string("'raw \\n text'"), b"raw \\n text");
        assert_eq!(single_string("\"\""), b"");
    }

    #[test]
    fn test_continuation_joins_segments() {
        let mut scanner = scanner_over("\"abc\", \"def\" next");
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "abcdef");
        assert_eq!(scanner.next_token(), TokenKind::Symbol);
        assert_eq!(scanner.reporter().error_count(), 0);
    }

    #[test]
    fn test_continuation_allows_comments_around_comma() {
        let text = "'one' /* a */ , // b\n   'two',\n'three';";
        let mut scanner = scanner_over(text);
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "onetwothree");
        assert_eq!(scanner.next_token(), TokenKind::Semicolon);
    }

    #[test]
    fn test_continuation_requires_same_quote() {
        let mut scanner = scanner_over("\"abc\", 'def'");
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "abc");
        assert_eq!(scanner.reporter().error_count(), 1);
        assert!(scanner.reporter().lines()[0].ends_with(
            "invalid string continuation. Expected to start another string segment."
        ));

        // the other segment is left for the next token
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "def");
    }

    #[test]
    fn test_string_without_comma_ends() {
        let mut scanner = scanner_over("\"abc\" \"def\"");
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "abc");
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "def");
    }

    #[test]
    fn test_line_break_in_string() {
        let mut scanner = scanner_over("\"broken\nnext");
        assert_eq!(scanner.next_token(), TokenKind::Error);
        assert!(scanner.current_lexeme_bytes().is_empty());
        assert!(scanner.reporter().lines()[0]
            .ends_with("line breaks are not allowed in a string."));

        assert_eq!(scanner.next_token(), TokenKind::Symbol);
        assert_eq!(scanner.current_lexeme_text(), "next");
        assert_eq!(scanner.current_line(), 2);
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = scanner_over("'open ended");
        assert_eq!(scanner.next_token(), TokenKind::Error);
        assert!(scanner.reporter().lines()[0].ends_with("unterminated string"));
        assert_eq!(scanner.next_token(), TokenKind::EndOfInput);
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(single_string(r#""\x41\x42""#), b"AB");
        assert_eq!(single_string(r#""\x4142z""#), b"ABz");
        assert_eq!(single_string(r#""\X0""#), &[0u8]);
    }

    #[test]
    fn test_hex_escape_stops_after_eight_digits() {
        assert_eq!(single_string(r#""\x414243449""#), b"ABCD9");
    }

    #[test]
    fn test_decimal_escapes() {
        assert_eq!(single_string(r#""\d65\d+66""#), b"AB");
        assert_eq!(single_string(r#""\d-1""#), &[0xffu8, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_octal_escapes() {
        assert_eq!(single_string(r#""\0101\0102x""#), b"ABx");
        assert_eq!(single_string(r#""\01017""#), b"A7");
    }

    #[test]
    fn test_character_escapes() {
        assert_eq!(
            single_string(r#""\n\r\t\b\f\v\\\"\'\q""#),
            b"\n\r\t\x08\x0c\x0b\\\"'q"
        );
    }

    #[test]
    fn test_escape_without_digits_is_ignored() {
        let mut scanner = scanner_over(r#""a\xzb\0""#);
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "azb");

        let reporter = scanner.reporter();
        assert_eq!(reporter.warning_count(), 2);
        assert_eq!(reporter.error_count(), 0);
        let lines = reporter.lines();
        assert!(lines[0].ends_with("invalid hex escape code in string: 'z' is not a hex digit. Ignored."));
        assert!(lines[1].ends_with(
            "invalid octal escape code in string: '\\\"' is not a octal digit. Ignored."
        ));
    }

    #[test]
    fn test_decimal_escape_without_digits() {
        let mut scanner = scanner_over(r#""\d-x""#);
        assert_eq!(scanner.next_token(), TokenKind::QStrg);
        assert_eq!(scanner.current_lexeme_text(), "x");
        assert!(scanner.reporter().lines()[0].contains("invalid decimal escape code"));
    }

    #[test]
    fn test_single_quotes_keep_backslashes() {
        assert_eq!(single_string(r"'\x41'"), br"\x41");
    }
}
