//! Expressions

use crate::literal::Literal;
use crate::types::DataType;
use std::fmt::{Display, Formatter};
use strum::{Display as StrumDisplay, EnumString};
use zoop_tokens::spanned::{Position, Positioned};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    position: Position,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(position: Position, kind: ExprKind) -> Self {
        Self { position, kind }
    }
}

impl Positioned for Expr {
    fn position(&self) -> Position {
        self.position
    }
}

/// Expression kind
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Variable(Variable),
    Declare(ExprDeclare),
    Reassign(ExprReassign),
    Grouping(Box<Expr>),
    Unary(ExprUnary),
    Binary(ExprBinary),
    Cast(ExprCast),
    Input(ExprInput),
    Call(ExprCall),
}

/// A reference to a variable, `@name` when mutable and `$name` otherwise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub mutable: bool,
    pub name: String,
}

impl Variable {
    pub fn new(mutable: bool, name: impl Into<String>) -> Self {
        Self {
            mutable,
            name: name.into(),
        }
    }

    /// Creates a variable from its sigil prefixed form
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        let mut chars = lexeme.chars();
        let mutable = match chars.next()? {
            '@' => true,
            '$' => false,
            _ => return None,
        };
        Some(Self::new(mutable, chars.as_str()))
    }

    pub fn sigil(&self) -> char {
        if self.mutable {
            '@'
        } else {
            '$'
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.sigil(), self.name)
    }
}

/// Declares a new variable, `@name:type <- value`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprDeclare {
    pub variable: Variable,
    pub ty: DataType,
    pub value: Box<Expr>,
}

/// Reassigns an existing mutable variable, `@name <- value`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprReassign {
    pub name: String,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnary {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinary {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    /// Where the operator itself sits
    pub op_position: Position,
    pub right: Box<Expr>,
}

/// `expr ~type`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCast {
    pub expr: Box<Expr>,
    pub ty: DataType,
}

/// Reads a line of input, `<-|:type` optionally followed by a prompt label
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInput {
    pub ty: DataType,
    pub prompt: Option<String>,
}

/// `` `label`de args... ``
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    pub label: String,
    pub args: Vec<Expr>,
}

/// A prefix operator
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, StrumDisplay, EnumString)]
pub enum UnaryOp {
    #[strum(serialize = "~")]
    Not,
    #[strum(serialize = "-")]
    Negate,
}

/// An infix operator
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, StrumDisplay, EnumString)]
pub enum BinaryOp {
    #[strum(serialize = "_")]
    Concat,
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "&")]
    And,
    #[strum(serialize = "|")]
    Or,
    #[strum(serialize = "=")]
    Eq,
    #[strum(serialize = "~=")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    LtEq,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    GtEq,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_variable_from_lexeme() {
        assert_eq!(
            Variable::from_lexeme("@count"),
            Some(Variable::new(true, "count"))
        );
        let immutable = Variable::from_lexeme("$x").unwrap();
        assert!(!immutable.mutable);
        assert_eq!(immutable.to_string(), "$x");
        assert_eq!(Variable::from_lexeme("x"), None);
    }

    #[test]
    fn test_operator_lexemes() {
        assert_eq!(BinaryOp::from_str("~=").unwrap(), BinaryOp::NotEq);
        assert_eq!(BinaryOp::GtEq.to_string(), ">=");
        assert!(BinaryOp::from_str("||").is_err());
        assert_eq!(UnaryOp::from_str("~").unwrap(), UnaryOp::Not);
    }
}
