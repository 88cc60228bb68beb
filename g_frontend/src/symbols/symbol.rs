//! Symbol records stored in the table
use super::decoration::DecoratedName;
use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Class,
    Method,
    Variable,
    Constant,
    Import,
    /// An unnamed block scope
    Anonymous,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Import => "import",
            SymbolKind::Anonymous => "anonymous",
        }
    }
}

/// The type a symbol is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignType {
    Int,
    UInt,
    Float,
    Bool,
    String,
    Dict,
    Map,
    List,
    Class,
    Inherit,
}

impl AssignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignType::Int => "int",
            AssignType::UInt => "uint",
            AssignType::Float => "float",
            AssignType::Bool => "bool",
            AssignType::String => "string",
            AssignType::Dict => "dict",
            AssignType::Map => "map",
            AssignType::List => "list",
            AssignType::Class => "class",
            AssignType::Inherit => "inherit",
        }
    }

    /// Type named by a type keyword, as used in declarations
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(AssignType::Int),
            TokenKind::UInt => Some(AssignType::UInt),
            TokenKind::Float => Some(AssignType::Float),
            TokenKind::Bool => Some(AssignType::Bool),
            TokenKind::String => Some(AssignType::String),
            TokenKind::Dict => Some(AssignType::Dict),
            TokenKind::Map => Some(AssignType::Map),
            TokenKind::List => Some(AssignType::List),
            _ => None,
        }
    }

    /// Whether `value` is a legal payload for this type. Container and class types carry
    /// no payload.
    pub fn accepts(&self, value: &SymbolValue) -> bool {
        matches!(
            (self, value),
            (AssignType::Int, SymbolValue::Int(_))
                | (AssignType::UInt, SymbolValue::UInt(_))
                | (AssignType::Bool, SymbolValue::UInt(0 | 1))
                | (AssignType::Float, SymbolValue::Float(_))
                | (AssignType::String, SymbolValue::Str(_))
        )
    }
}

impl fmt::Display for AssignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility of a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Public,
    Private,
    Protected,
}

impl Scope {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Public => Some(Scope::Public),
            TokenKind::Private => Some(Scope::Private),
            TokenKind::Protected => Some(Scope::Protected),
            _ => None,
        }
    }
}

/// Capability bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SymbolMask(u64);

impl SymbolMask {
    pub const NONE: SymbolMask = SymbolMask(0);
    pub const ROOT: SymbolMask = SymbolMask(1 << 0);
    pub const CLASS: SymbolMask = SymbolMask(1 << 1);
    pub const CLASS_METHOD: SymbolMask = SymbolMask(1 << 2);
    pub const CLASS_VAR: SymbolMask = SymbolMask(1 << 3);
    pub const METHOD: SymbolMask = SymbolMask(1 << 4);
    pub const METHOD_PARAM: SymbolMask = SymbolMask(1 << 5);
    pub const METHOD_VAR: SymbolMask = SymbolMask(1 << 6);
    pub const VAR: SymbolMask = SymbolMask(1 << 7);
    pub const IMPORT: SymbolMask = SymbolMask(1 << 17);
    pub const HAS_CONST: SymbolMask = SymbolMask(1 << 18);
    pub const HAS_CHILD: SymbolMask = SymbolMask(1 << 19);

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn from_bits(bits: u64) -> Self {
        SymbolMask(bits)
    }

    pub const fn contains(self, other: SymbolMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: SymbolMask) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: SymbolMask) {
        self.0 &= !other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SymbolMask {
    type Output = SymbolMask;

    fn bitor(self, rhs: SymbolMask) -> SymbolMask {
        SymbolMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for SymbolMask {
    fn bitor_assign(&mut self, rhs: SymbolMask) {
        self.insert(rhs);
    }
}

/// Constant payload of a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SymbolValue {
    Int(i64),
    UInt(u64),
    /// Stored as its bit pattern; JSON has no spelling for infinities or NaN
    Float(#[serde(with = "float_bits")] f64),
    Str(String),
}

mod float_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        u64::deserialize(deserializer).map(f64::from_bits)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub assign_type: AssignType,
    pub scope: Scope,
    pub mask: SymbolMask,
    pub value: Option<SymbolValue>,
    /// Filled in by the table on declaration
    pub name: Option<DecoratedName>,
}

impl Symbol {
    pub fn new(kind: SymbolKind, assign_type: AssignType) -> Self {
        let mask = match kind {
            SymbolKind::Class => SymbolMask::CLASS,
            SymbolKind::Method => SymbolMask::METHOD,
            SymbolKind::Variable => SymbolMask::VAR,
            SymbolKind::Constant => SymbolMask::VAR | SymbolMask::HAS_CONST,
            SymbolKind::Import => SymbolMask::IMPORT,
            SymbolKind::Anonymous => SymbolMask::NONE,
        };
        Self {
            kind,
            assign_type,
            scope: Scope::default(),
            mask,
            value: None,
            name: None,
        }
    }

    pub fn class() -> Self {
        Self::new(SymbolKind::Class, AssignType::Class)
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_mask(mut self, mask: SymbolMask) -> Self {
        self.mask |= mask;
        self
    }

    pub fn with_value(mut self, value: SymbolValue) -> Self {
        self.mask |= SymbolMask::HAS_CONST;
        self.value = Some(value);
        self
    }

    /// A missing payload always matches
    pub fn payload_matches(&self) -> bool {
        self.value
            .as_ref()
            .map_or(true, |value| self.assign_type.accepts(value))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Some(SymbolValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self.value {
            Some(SymbolValue::UInt(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            Some(SymbolValue::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Some(SymbolValue::Str(v)) => Some(v),
            _ => None,
        }
    }
}
