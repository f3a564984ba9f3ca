//! The root of a parsed file

use crate::statements::Stmt;

/// Top level statements, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
