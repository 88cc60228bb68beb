//! Comments and inter-token trivia
use super::scanner::Scanner;
use super::source::ScanChar;
use crate::logging::codes;
use crate::tokens::TokenKind;

impl Scanner {
    /// Entered after a `/`. Returns `None` when a comment was consumed.
    pub(super) fn comment_or_slash(&mut self) -> Option<TokenKind> {
        match self.next_char() {
            ScanChar::Byte(b'/') => {
                self.skip_line_comment();
                None
            }
            ScanChar::Byte(b'*') => {
                self.skip_block_comment();
                None
            }
            other => {
                self.push_back(other);
                self.lexeme.append(b'/');
                Some(TokenKind::Slash)
            }
        }
    }

    /// Consume through the end of the line, newline included
    fn skip_line_comment(&mut self) {
        loop {
            match self.next_char() {
                ScanChar::Byte(b'\n') => return,
                ScanChar::Byte(_) => {}
                ScanChar::EndOfFrame | ScanChar::EndOfInput => return,
            }
        }
    }

    /// Consume through `*/`. Returns false when the source ended first.
    fn skip_block_comment(&mut self) -> bool {
        let mut seen_star = false;
        loop {
            match self.next_char() {
                ScanChar::Byte(b'*') => seen_star = true,
                ScanChar::Byte(b'/') if seen_star => return true,
                ScanChar::Byte(_) => seen_star = false,
                ScanChar::EndOfFrame | ScanChar::EndOfInput => {
                    self.report_syntax(codes::lexical::UNTERMINATED_COMMENT, "unterminated comment");
                    return false;
                }
            }
        }
    }

    /// Skip whitespace and comments without producing a token
    pub(super) fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            match self.next_char() {
                ScanChar::Byte(b'/') => match self.next_char() {
                    ScanChar::Byte(b'/') => self.skip_line_comment(),
                    ScanChar::Byte(b'*') => {
                        if !self.skip_block_comment() {
                            return;
                        }
                    }
                    other => {
                        self.push_back(other);
                        self.push_back(ScanChar::Byte(b'/'));
                        return;
                    }
                },
                other => {
                    self.push_back(other);
                    return;
                }
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
            .push_source("comments.g", Box::new(Cursor::new(text.as_bytes().to_vec())))
            .unwrap();
        scanner
    }

    #[test]
    fn test_comments_produce_no_tokens() {
        let mut scanner = scanner_over("a // line comment\n/* block\n ** comment */ b");
        assert_eq!(scanner.next_token(), TokenKind::Symbol);
        assert_eq!(scanner.next_token(), TokenKind::Symbol);
        assert_eq!(scanner.current_lexeme_text(), "b");
        assert_eq!(scanner.current_line(), 3);
        assert_eq!(scanner.next_token(), TokenKind::EndOfInput);
    }

    #[test]
    fn test_line_comment_at_end_of_source() {
        let mut scanner = scanner_over("x // no newline");
        assert_eq!(scanner.next_token(), TokenKind::Symbol);
        assert_eq!(scanner.next_token(), TokenKind::EndOfInput);
        assert_eq!(scanner.reporter().error_count(), 0);
    }

    #[test]
    fn test_slash_is_division() {
        let mut scanner = scanner_over("a / b");
        scanner.next_token();
        assert_eq!(scanner.next_token(), TokenKind::Slash);
        assert_eq!(scanner.current_lexeme_text(), "/");
        assert_eq!(scanner.next_token(), TokenKind::Symbol);
    }

    #[test]
    fn test_unterminated_comment() {
        let mut scanner = scanner_over("a /* never closed *");
        assert_eq!(scanner.next_token(), TokenKind::Symbol);
        assert_eq!(scanner.next_token(), TokenKind::EndOfInput);
        assert_eq!(scanner.reporter().error_count(), 1);
        assert!(scanner.reporter().lines()[0].ends_with("unterminated comment"));
    }

    #[test]
    fn test_trivia_restores_lone_slash() {
        let mut scanner = scanner_over("  /x");
        scanner.skip_trivia();
        assert_eq!(scanner.next_token(), TokenKind::Slash);
        assert_eq!(scanner.next_token(), TokenKind::Symbol);
        assert_eq!(scanner.current_lexeme_text(), "x");
    }
}
