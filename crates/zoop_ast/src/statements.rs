//! Statements

use crate::expr::Expr;
use crate::types::DataType;
use zoop_tokens::spanned::{Position, Positioned};

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    position: Position,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(position: Position, kind: StmtKind) -> Self {
        Self { position, kind }
    }
}

impl Positioned for Stmt {
    fn position(&self) -> Position {
        self.position
    }
}

/// Statement kind
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// An expression whose value is discarded
    Expr(Expr),
    /// `expr ->|`
    Print(Expr),
    /// `{ ... }`
    Block(Vec<Stmt>),
    Condition(StmtCondition),
    Routine(StmtRoutine),
    /// `->` or `expr ->`
    Return(Option<Expr>),
    Loop(Vec<Stmt>),
    /// Leaves the innermost loop
    End,
}

/// One guarded branch of a conditional
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionBranch {
    position: Position,
    pub guard: Expr,
    pub body: Vec<Stmt>,
}

impl ConditionBranch {
    pub fn new(position: Position, guard: Expr, body: Vec<Stmt>) -> Self {
        Self {
            position,
            guard,
            body,
        }
    }
}

impl Positioned for ConditionBranch {
    fn position(&self) -> Position {
        self.position
    }
}

/// `if`, any number of `elif`s, then an optional `else`
#[derive(Debug, Clone, PartialEq)]
pub struct StmtCondition {
    pub then_branch: ConditionBranch,
    pub elif_branches: Vec<ConditionBranch>,
    pub else_body: Option<Vec<Stmt>>,
}

/// A zoop declaration
#[derive(Debug, Clone, PartialEq)]
pub struct StmtRoutine {
    pub label: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    /// `None` when the zoop returns nothing
    pub return_type: Option<DataType>,
}

/// A zoop parameter, always immutable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: DataType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: DataType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
