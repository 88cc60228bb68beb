//! Token kinds, their display names and the reserved word table
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the scanner can classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    // === CONTROL ===
    /// No token was produced (comment, ignored byte)
    None,
    Error,
    EndOfInput,

    // === WORDS AND LITERALS ===
    Symbol,
    /// `0x` hex literal
    UNum,
    /// Decimal integer literal
    INum,
    FNum,
    ONum,
    /// Single or double quoted string
    QStrg,

    // === PUNCTUATION AND OPERATORS ===
    Slash,
    Mul,
    Mod,
    Comma,
    Semicolon,
    Colon,
    OpenSquare,
    CloseSquare,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Dot,
    /// `=` assignment
    Assign,
    Lt,
    Gt,
    Sub,
    Add,
    Not,
    /// `==` or `equ`
    Equality,
    Lte,
    Gte,
    Dec,
    Inc,
    Neq,
    And,
    Or,

    // === KEYWORDS ===
    As,
    Bool,
    Break,
    Case,
    Class,
    Constructor,
    Continue,
    Create,
    Default,
    Destroy,
    Destructor,
    Dict,
    Do,
    Else,
    Entry,
    Except,
    False,
    Float,
    For,
    If,
    Import,
    Inline,
    Int,
    List,
    Map,
    Namespace,
    Private,
    Protected,
    Public,
    Raise,
    Return,
    String,
    Super,
    Switch,
    True,
    Try,
    UInt,
    Void,
    While,
}

/// Coarse grouping used by the driver when skipping definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Control,
    Literal,
    Identifier,
    Operator,
    Punctuation,
    Keyword,
}

impl TokenKind {
    /// Human-readable name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Error => "ERROR",
            Self::EndOfInput => "END OF INPUT",
            Self::Symbol => "symbol",
            Self::UNum => "unsigned number",
            Self::INum => "signed number",
            Self::FNum => "float number",
            Self::ONum => "octal number",
            Self::QStrg => "quoted string",
            Self::Slash => "'/'",
            Self::Mul => "'*'",
            Self::Mod => "'%'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::OpenSquare => "'['",
            Self::CloseSquare => "']'",
            Self::OpenCurly => "'{'",
            Self::CloseCurly => "'}'",
            Self::OpenParen => "'('",
            Self::CloseParen => "')'",
            Self::Dot => "'.'",
            Self::Assign => "'='",
            Self::Lt => "'<' or 'lt'",
            Self::Gt => "'>' or 'gt'",
            Self::Sub => "'-'",
            Self::Add => "'+'",
            Self::Not => "'!' or 'not'",
            Self::Equality => "'==' or 'equ'",
            Self::Lte => "'<=' or 'lte'",
            Self::Gte => "'>=' or 'gte'",
            Self::Dec => "'decrement'",
            Self::Inc => "'increment'",
            Self::Neq => "'!=' or 'neq'",
            Self::And => "'&' or 'and'",
            Self::Or => "'|' or 'or'",
            Self::As => "'as'",
            Self::Bool => "'bool'",
            Self::Break => "'break'",
            Self::Case => "'case'",
            Self::Class => "'class'",
            Self::Constructor => "'constructor'",
            Self::Continue => "'continue'",
            Self::Create => "'create'",
            Self::Default => "'default'",
            Self::Destroy => "'destroy'",
            Self::Destructor => "'destructor'",
            Self::Dict => "'dict'",
            Self::Do => "'do'",
            Self::Else => "'else'",
            Self::Entry => "'entry'",
            Self::Except => "'except'",
            Self::False => "'false'",
            Self::Float => "'float'",
            Self::For => "'for'",
            Self::If => "'if'",
            Self::Import => "'import'",
            Self::Inline => "'inline'",
            Self::Int => "'int'",
            Self::List => "'list'",
            Self::Map => "'map'",
            Self::Namespace => "'namespace'",
            Self::Private => "'private'",
            Self::Protected => "'protected'",
            Self::Public => "'public'",
            Self::Raise => "'raise'",
            Self::Return => "'return'",
            Self::String => "'string'",
            Self::Super => "'super'",
            Self::Switch => "'switch'",
            Self::True => "'true'",
            Self::Try => "'try'",
            Self::UInt => "'uint'",
            Self::Void => "'void'",
            Self::While => "'while'",
        }
    }

    pub fn class(self) -> TokenClass {
        match self {
            Self::None | Self::Error | Self::EndOfInput => TokenClass::Control,
            Self::UNum | Self::INum | Self::FNum | Self::ONum | Self::QStrg => TokenClass::Literal,
            Self::Symbol => TokenClass::Identifier,
            Self::Slash
            | Self::Mul
            | Self::Mod
            | Self::Assign
            | Self::Lt
            | Self::Gt
            | Self::Sub
            | Self::Add
            | Self::Not
            | Self::Equality
            | Self::Lte
            | Self::Gte
            | Self::Dec
            | Self::Inc
            | Self::Neq
            | Self::And
            | Self::Or => TokenClass::Operator,
            Self::Comma
            | Self::Semicolon
            | Self::Colon
            | Self::OpenSquare
            | Self::CloseSquare
            | Self::OpenCurly
            | Self::CloseCurly
            | Self::OpenParen
            | Self::CloseParen
            | Self::Dot => TokenClass::Punctuation,
            _ => TokenClass::Keyword,
        }
    }

    /// Whether the lexeme carries meaning beyond the kind itself
    pub fn has_lexeme(self) -> bool {
        matches!(self.class(), TokenClass::Literal | TokenClass::Identifier)
    }

    pub fn is_visibility(self) -> bool {
        matches!(self, Self::Public | Self::Private | Self::Protected)
    }

    /// Built-in type names usable in declarations and decorations
    pub fn is_type_name(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::UInt
                | Self::Float
                | Self::Bool
                | Self::String
                | Self::Dict
                | Self::Map
                | Self::List
                | Self::Void
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words, sorted by byte order for binary search
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("as", TokenKind::As),
    ("bool", TokenKind::Bool),
    ("break", TokenKind::Break),
    ("case", TokenKind::Case),
    ("class", TokenKind::Class),
    ("constructor", TokenKind::Constructor),
    ("continue", TokenKind::Continue),
    ("create", TokenKind::Create),
    ("default", TokenKind::Default),
    ("destroy", TokenKind::Destroy),
    ("destructor", TokenKind::Destructor),
    ("dict", TokenKind::Dict),
    ("do", TokenKind::Do),
    ("else", TokenKind::Else),
    ("entry", TokenKind::Entry),
    ("equ", TokenKind::Equality),
    ("except", TokenKind::Except),
    ("false", TokenKind::False),
    ("float", TokenKind::Float),
    ("for", TokenKind::For),
    ("gt", TokenKind::Gt),
    ("gte", TokenKind::Gte),
    ("if", TokenKind::If),
    ("import", TokenKind::Import),
    ("inline", TokenKind::Inline),
    ("int", TokenKind::Int),
    ("list", TokenKind::List),
    ("lt", TokenKind::Lt),
    ("lte", TokenKind::Lte),
    ("map", TokenKind::Map),
    ("namespace", TokenKind::Namespace),
    ("neq", TokenKind::Neq),
    ("not", TokenKind::Not),
    ("or", TokenKind::Or),
    ("private", TokenKind::Private),
    ("protected", TokenKind::Protected),
    ("public", TokenKind::Public),
    ("raise", TokenKind::Raise),
    ("return", TokenKind::Return),
    ("string", TokenKind::String),
    ("super", TokenKind::Super),
    ("switch", TokenKind::Switch),
    ("true", TokenKind::True),
    ("try", TokenKind::Try),
    ("uint", TokenKind::UInt),
    ("void", TokenKind::Void),
    ("while", TokenKind::While),
];

/// Classify a scanned word: a reserved word's kind, otherwise `Symbol`
pub fn lookup_keyword(word: &[u8]) -> TokenKind {
    KEYWORDS
        .binary_search_by(|(keyword, _)| keyword.as_bytes().cmp(word))
        .map(|index| KEYWORDS[index].1)
        .unwrap_or(TokenKind::Symbol)
}

/// A token together with its text and where it started, as produced by a token dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedToken {
    pub kind: TokenKind,
    pub text: std::string::String,
    pub file: std::string::String,
    pub line: i32,
    pub column: i32,
}

impl fmt::Display for ScannedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}: token: {}",
            self.file, self.line, self.column, self.kind
        )?;
        if self.kind.has_lexeme() {
            write!(f, " '{}'", self.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_is_sorted() {
        assert!(KEYWORDS
            .windows(2)
            .all(|pair| pair[0].0.as_bytes() < pair[1].0.as_bytes()));
        assert_eq!(KEYWORDS.len(), 48);
    }

    #[test]
    fn test_every_keyword_is_found() {
        for (word, kind) in KEYWORDS {
            assert_eq!(lookup_keyword(word.as_bytes()), *kind, "keyword {}", word);
        }
    }

    #[test]
    fn test_no_prefix_matching() {
        assert_eq!(lookup_keyword(b"class"), TokenKind::Class);
        assert_eq!(lookup_keyword(b"classify"), TokenKind::Symbol);
        assert_eq!(lookup_keyword(b"clas"), TokenKind::Symbol);
        assert_eq!(lookup_keyword(b"gt"), TokenKind::Gt);
        assert_eq!(lookup_keyword(b"gte"), TokenKind::Gte);
        assert_eq!(lookup_keyword(b""), TokenKind::Symbol);
    }

    #[test]
    fn test_operator_words_share_operator_kinds() {
        assert_eq!(lookup_keyword(b"equ"), TokenKind::Equality);
        assert_eq!(lookup_keyword(b"neq"), TokenKind::Neq);
        assert_eq!(lookup_keyword(b"and"), TokenKind::And);
        assert_eq!(TokenKind::Neq.name(), "'!=' or 'neq'");
    }

    #[test]
    fn test_classification() {
        assert_eq!(TokenKind::QStrg.class(), TokenClass::Literal);
        assert_eq!(TokenKind::Symbol.class(), TokenClass::Identifier);
        assert_eq!(TokenKind::Dec.class(), TokenClass::Operator);
        assert_eq!(TokenKind::OpenCurly.class(), TokenClass::Punctuation);
        assert_eq!(TokenKind::While.class(), TokenClass::Keyword);
        assert!(TokenKind::Private.is_visibility());
        assert!(TokenKind::UInt.is_type_name());
        assert!(!TokenKind::Class.has_lexeme());
    }

    #[test]
    fn test_scanned_token_display() {
        let token = ScannedToken {
            kind: TokenKind::Symbol,
            text: "counter".to_string(),
            file: "main.g".to_string(),
            line: 3,
            column: 9,
        };
        assert_eq!(token.to_string(), "main.g: 3: 9: token: symbol 'counter'");

        let token = ScannedToken {
            kind: TokenKind::OpenCurly,
            text: String::new(),
            ..token
        };
        assert_eq!(token.to_string(), "main.g: 3: 9: token: '{'");
    }
}
