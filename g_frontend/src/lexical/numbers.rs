//! Numeric literals: hex, octal, decimal and float
use super::scanner::Scanner;
use super::source::ScanChar;
use crate::logging::codes;
use crate::tokens::TokenKind;

impl Scanner {
    /// Entered with the first digit already read
    pub(super) fn read_number(&mut self, first: u8) -> TokenKind {
        self.lexeme.append(first);
        if first != b'0' {
            return self.read_decimal();
        }

        match self.next_char() {
            ScanChar::Byte(x @ (b'x' | b'X')) => {
                self.lexeme.append(x);
                self.read_hex()
            }
            ScanChar::Byte(b'.') => {
                self.lexeme.append(b'.');
                self.read_float()
            }
            ScanChar::Byte(b) if b.is_ascii_digit() => {
                self.push_back(ScanChar::Byte(b));
                self.read_octal()
            }
            other => {
                self.push_back(other);
                TokenKind::INum
            }
        }
    }

    /// Append the run of bytes matching `accept`; returns how many were taken
    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> usize {
        let mut taken = 0;
        loop {
            match self.next_char() {
                ScanChar::Byte(b) if accept(b) => {
                    self.lexeme.append(b);
                    taken += 1;
                }
                other => {
                    self.push_back(other);
                    return taken;
                }
            }
        }
    }

    fn read_hex(&mut self) -> TokenKind {
        if self.take_while(|b| b.is_ascii_hexdigit()) == 0 {
            self.report_syntax(codes::lexical::MALFORMED_NUMBER, "malformed hex number");
            return TokenKind::Error;
        }
        TokenKind::UNum
    }

    /// The whole digit run is taken; an 8 or 9 anywhere in it makes it malformed
    fn read_octal(&mut self) -> TokenKind {
        self.take_while(|b| b.is_ascii_digit());
        if self.lexeme.contents().iter().any(|&b| b == b'8' || b == b'9') {
            let message = format!("malformed octal number: {}", self.lexeme);
            self.report_syntax(codes::lexical::MALFORMED_NUMBER, &message);
            return TokenKind::Error;
        }
        TokenKind::ONum
    }

    fn read_decimal(&mut self) -> TokenKind {
        self.take_while(|b| b.is_ascii_digit());
        match self.next_char() {
            ScanChar::Byte(b'.') => {
                self.lexeme.append(b'.');
                self.read_float()
            }
            other => {
                self.push_back(other);
                TokenKind::INum
            }
        }
    }

    /// Entered after the decimal point
    fn read_float(&mut self) -> TokenKind {
        self.take_while(|b| b.is_ascii_digit());

        match self.next_char() {
            ScanChar::Byte(e @ (b'e' | b'E')) => self.lexeme.append(e),
            other => {
                self.push_back(other);
                return TokenKind::FNum;
            }
        }

        match self.next_char() {
            ScanChar::Byte(sign @ (b'+' | b'-')) => self.lexeme.append(sign),
            other => self.push_back(other),
        }

        if self.take_while(|b| b.is_ascii_digit()) == 0 {
            let message = format!("malformed float number: {}", self.lexeme);
            self.report_syntax(codes::lexical::MALFORMED_NUMBER, &message);
            return TokenKind::Error;
        }
        TokenKind::FNum
    }
}
