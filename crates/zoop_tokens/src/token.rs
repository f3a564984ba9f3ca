//! A lexical token from zoop source text

use crate::spanned::{Position, Positioned, Span};
use std::fmt::{Debug, Display, Formatter};

/// Every data type name that may follow a `:`
pub const TYPE_KEYWORDS: [&str; 7] = ["int", "uint", "dec", "udec", "string", "bool", "label"];

/// Keywords that are not data type names
pub const KEYWORDS: [&str; 12] = [
    "if", "end if", "elif", "end elif", "else", "end else", "zoop", "end zoop", "de", "loop",
    "end loop", "end",
];

/// Operators that may prefix an operand
pub const UNARY_OPERATORS: [&str; 2] = ["~", "-"];

/// Operators that sit between two operands
pub const BINARY_OPERATORS: [&str; 15] = [
    "~", "_", "+", "-", "*", "/", "&", "|", "||", "<=", "<", ">=", ">", "=", "~=",
];

/// A lexical token
#[derive(Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    position: Position,
    span: Span,
    value: Option<TokenValue>,
}

impl Token {
    /// Creates a new token without a decoded value
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
            span,
            value: None,
        }
    }

    /// Attaches a decoded value to this token
    pub fn with_value(mut self, value: impl Into<TokenValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw source text of this token
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The decoded value, present on literals, variables and comments
    pub fn value(&self) -> Option<&TokenValue> {
        self.value.as_ref()
    }

    /// Checks both kind and lexeme at once
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }

    /// Whether this is a non-empty backtick quoted label literal
    pub fn is_label(&self) -> bool {
        self.kind == TokenKind::Literal
            && self.lexeme.len() > 2
            && self.lexeme.starts_with('`')
            && self.lexeme.ends_with('`')
    }

    /// Whether this is a data type keyword
    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&self.lexeme.as_str())
    }
}

impl Positioned for Token {
    fn position(&self) -> Position {
        self.position
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?}) @ {}", self.kind, self.lexeme, self.position)?;
        if let Some(value) = &self.value {
            write!(f, " = {value:?}")?;
        }
        Ok(())
    }
}

/// The kind for this token
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// `@id` or `$id`
    Variable,
    UnaryOperator,
    BinaryOperator,
    Literal,
    Keyword,
    /// `-- ...`
    Comment,
    /// `--* ... *--`
    BlockComment,
    NewLine,
    Colon,
    ParenOpen,
    ParenClose,
    BlockOpen,
    BlockClose,
    /// `<-`
    FlowIn,
    /// `->`
    FlowOut,
    /// `<-|`
    Input,
    /// `->|`
    Output,
    /// `=>`
    Direct,
}

/// A value decoded by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Number(n) => write!(f, "{n}"),
            TokenValue::String(s) => write!(f, "{s}"),
            TokenValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
