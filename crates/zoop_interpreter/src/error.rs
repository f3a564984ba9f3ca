//! Errors raised while running a program

use zoop_ast::expr::{BinaryOp, Variable};
use zoop_ast::types::DataType;
use zoop_ast_parsing::SyntaxError;
use zoop_tokens::spanned::{Position, Positioned};
use zoop_tokens::Diagnostic;

/// An error raised by the evaluator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} ({position})")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub position: Position,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

impl Positioned for RuntimeError {
    fn position(&self) -> Position {
        self.position
    }
}

/// [RuntimeError] kind
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeErrorKind {
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(Variable),
    #[error("Can't redefine variable '{0}' in current scope")]
    Redefinition(String),
    #[error("Can't redefine variable '{0}', already exists in zoop context")]
    ContextRedefinition(String),
    #[error("Variable '{0}' is not defined")]
    NotDefined(String),
    #[error("zoop '{0}' is already declared")]
    RoutineRedeclared(String),
    #[error("zoop '{0}' wasn't declared")]
    RoutineNotDeclared(String),
    #[error("Exceeded maximum number of zoop contexts")]
    ContextOverflow,
    #[error("Expected {expected} arguments but got {got}")]
    ArgumentCount { expected: usize, got: usize },
    #[error("Expected argument of type <{expected}> but got <{got}>")]
    ArgumentType { expected: DataType, got: DataType },
    #[error("Expected return value of type <{expected}> but got <{got}>.")]
    ReturnType { expected: DataType, got: DataType },
    #[error("Cannot print <void>")]
    PrintVoid,
    #[error("Cannot assign <{value}> to variable '{variable}' of type <{ty}>")]
    AssignType {
        value: DataType,
        variable: Variable,
        ty: DataType,
    },
    #[error("Operand of '~' must be of type bool")]
    NotOperand,
    #[error("Operand of '-' must be of type number")]
    NegateOperand,
    #[error("Operands of '{op}' must be numbers, got <{got}> instead")]
    NumericOperands { op: BinaryOp, got: DataType },
    #[error("Invalid operation '{op}' between <{left}> and <{right}>. Try casting one or the other.")]
    MixedOperation {
        op: BinaryOp,
        left: DataType,
        right: DataType,
    },
    #[error("Dividing by 0 is an undefined operation, at least in the real world")]
    DivisionByZero,
    #[error("Operands of '{op}' must be of type <bool>, got <{got}> instead")]
    LogicOperands { op: BinaryOp, got: DataType },
    #[error("Cannot compare equality of <{left}> with <{right}>")]
    EqualityTypes { left: DataType, right: DataType },
    #[error("Cannot concatenate <void>")]
    ConcatVoid,
    #[error("Cannot cast value of type <{from}> to <{to}>")]
    InvalidCast { from: DataType, to: DataType },
    #[error("Invalid <{ty}> input '{input}'")]
    InvalidInput { ty: DataType, input: String },
    #[error("Input was cancelled")]
    InputCancelled,
    #[error("Unknown result in loop statement")]
    UnknownLoopResult,
    #[error("Console failure: {0}")]
    Console(String),
}

impl RuntimeErrorKind {
    /// Attaches a position to this kind
    pub fn at(self, position: Position) -> RuntimeError {
        RuntimeError::new(self, position)
    }
}

impl From<std::io::Error> for RuntimeErrorKind {
    fn from(value: std::io::Error) -> Self {
        Self::Console(value.to_string())
    }
}

pub type RuntimeResult<T = ()> = Result<T, RuntimeError>;

/// Any error a zoop program can fail with
#[derive(Debug, Clone, PartialEq, thiserror::Error, derive_more::IsVariant)]
pub enum ZoopError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ZoopError {
    /// The heading shown before the message
    pub fn category(&self) -> &'static str {
        match self {
            ZoopError::Syntax(_) => "Syntax Error",
            ZoopError::Runtime(_) => "Runtime Error",
        }
    }

    /// The message, without its position
    pub fn message(&self) -> String {
        match self {
            ZoopError::Syntax(e) => e.kind.to_string(),
            ZoopError::Runtime(e) => e.kind.to_string(),
        }
    }

    /// Renders this error against the source it came from
    pub fn render<'s>(&self, src: &'s str) -> Diagnostic<'s> {
        Diagnostic::new(self.category(), self.message(), self.position(), src)
    }
}

impl Positioned for ZoopError {
    fn position(&self) -> Position {
        match self {
            ZoopError::Syntax(e) => e.position(),
            ZoopError::Runtime(e) => e.position(),
        }
    }
}
