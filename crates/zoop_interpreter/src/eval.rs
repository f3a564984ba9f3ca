//! The tree walking evaluator

use crate::console::Console;
use crate::environment::{Environment, ScopeKind};
use crate::error::RuntimeResult;
use log::trace;
use zoop_ast::literal::Literal;
use zoop_ast::program::Program;
use zoop_ast::statements::Stmt;

pub mod cast;
mod expr;
pub mod operators;
mod stmt;

/// How a statement finished
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Flow {
    /// Carry on with the next statement
    Continue,
    /// `->`, leaving the running zoop without a value
    Return,
    /// `end`, leaving the innermost loop
    End,
    /// `expr ->`, leaving the running zoop with a value
    Value(Literal),
}

/// Runs statements against an [Environment], printing to and reading from a [Console]
pub struct Evaluator<'p, 'c> {
    env: Environment<'p>,
    console: &'c mut dyn Console,
}

impl<'p, 'c> Evaluator<'p, 'c> {
    /// Creates an evaluator with a fresh environment
    pub fn new(console: &'c mut dyn Console) -> Self {
        Self {
            env: Environment::new(),
            console,
        }
    }

    /// Runs every top level statement in order. A return at the top level has nothing to leave
    /// and is ignored.
    pub fn run(&mut self, program: &'p Program) -> RuntimeResult {
        for stmt in program.statements() {
            let flow = self.execute(stmt)?;
            if !flow.is_continue() {
                trace!("ignoring {flow:?} at top level");
            }
        }
        Ok(())
    }

    /// Runs `f` inside a new scope nested in the current one, leaving it again however `f`
    /// finishes
    fn in_scope<T>(
        &mut self,
        kind: ScopeKind,
        f: impl FnOnce(&mut Self) -> RuntimeResult<T>,
    ) -> RuntimeResult<T> {
        self.env.push_scope(kind);
        let result = f(self);
        self.env.pop_scope();
        result
    }

    /// Runs statements in order until one of them leaves early
    fn execute_all(&mut self, stmts: &'p [Stmt]) -> RuntimeResult<Flow> {
        for stmt in stmts {
            let flow = self.execute(stmt)?;
            if !flow.is_continue() {
                return Ok(flow);
            }
        }
        Ok(Flow::Continue)
    }

    /// Runs statements in a new block scope nested in the current one
    fn block(&mut self, stmts: &'p [Stmt]) -> RuntimeResult<Flow> {
        self.in_scope(ScopeKind::Block, |this| this.execute_all(stmts))
    }
}
