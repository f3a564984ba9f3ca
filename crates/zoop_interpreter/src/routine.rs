//! Declared zoops

use zoop_ast::statements::{Param, Stmt, StmtRoutine};
use zoop_ast::types::DataType;

/// A zoop as registered in the environment. Borrows its body from the program being run.
#[derive(Debug, Copy, Clone)]
pub struct Routine<'p> {
    declaration: &'p StmtRoutine,
}

impl<'p> Routine<'p> {
    pub fn new(declaration: &'p StmtRoutine) -> Self {
        Self { declaration }
    }

    pub fn label(&self) -> &'p str {
        &self.declaration.label
    }

    pub fn params(&self) -> &'p [Param] {
        &self.declaration.params
    }

    pub fn body(&self) -> &'p [Stmt] {
        &self.declaration.body
    }

    /// The declared return type, `void` when there is none
    pub fn return_type(&self) -> DataType {
        self.declaration.return_type.unwrap_or(DataType::Void)
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}
