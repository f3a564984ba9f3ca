//! Errors raised while lexing or parsing

use zoop_tokens::spanned::{Position, Positioned};

/// Represents an error occurring during lexing or parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} ({position})")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: Position,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(kind: SyntaxErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

impl Positioned for SyntaxError {
    fn position(&self) -> Position {
        self.position
    }
}

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("Invalid syntax")]
    InvalidSyntax,
    #[error("Invalid identifier")]
    InvalidIdentifier,
    #[error("Missing data type")]
    MissingDataType,
    #[error("Invalid data type")]
    InvalidDataType,
    #[error("Unclosed string")]
    UnclosedString,
    #[error("Unclosed block comment")]
    UnclosedBlockComment,
    #[error("Invalid number literal")]
    InvalidNumberLiteral,
    #[error("Prefix unary operator '{0}' must be adjacent to its operands")]
    DetachedUnaryOperator(String),
    #[error("Flow In ('<-') must be to a variable or a zoop declaration only")]
    InvalidFlowIn,
    #[error("Cannot print and return at the same time")]
    PrintAndReturn,
    #[error("Print operator can only be used once at the end of a line")]
    PrintNotAtLineEnd,
    #[error("Flow Out operator ('->') can only be used once at the end of a line")]
    ReturnNotAtLineEnd,
    #[error("Expected '{closing}' to close {construct} block")]
    UnclosedBlock {
        closing: &'static str,
        construct: &'static str,
    },
    #[error("Expected a new line after {0} block")]
    MissingNewLine(&'static str),
    #[error("Expected '}}' to close scope block")]
    UnclosedScopeBlock,
    #[error("Invalid data type for zoop")]
    InvalidRoutineType,
    #[error("Invalid label for zoop")]
    InvalidRoutineLabel,
    #[error("Expected a '<-' after zoop declaration's label")]
    MissingRoutineFlowIn,
    #[error("Invalid parameter identifier")]
    InvalidParameter,
    #[error("Zoop parameters must be immutables")]
    MutableParameter,
    #[error("Expected ':' after parameter name")]
    MissingParameterColon,
    #[error("Immutable cannot be reassigned")]
    ImmutableReassigned,
    #[error("Expect ')' after expression.")]
    UnclosedGrouping,
    #[error("Invalid expression")]
    InvalidExpression,
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("End statements can be used only inside loops")]
    EndOutsideLoop,
    #[error("de operator must follow a label")]
    DetachedDe,
    #[error("Zoops can only be declared in the global scope")]
    NestedRoutine,
}

impl SyntaxErrorKind {
    /// Attaches a position to this kind
    pub fn at(self, position: Position) -> SyntaxError {
        SyntaxError::new(self, position)
    }
}

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;
