use super::{Evaluator, Flow};
use crate::error::{RuntimeErrorKind, RuntimeResult};
use crate::routine::Routine;
use log::trace;
use std::iter;
use zoop_ast::statements::{Stmt, StmtCondition, StmtKind};
use zoop_tokens::spanned::{Position, Positioned};

impl<'p> Evaluator<'p, '_> {
    pub(crate) fn execute(&mut self, stmt: &'p Stmt) -> RuntimeResult<Flow> {
        let position = stmt.position();
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Continue)
            }
            StmtKind::Print(expr) => {
                let literal = self.evaluate(expr)?;
                if literal.is_void() {
                    return Err(RuntimeErrorKind::PrintVoid.at(position));
                }
                self.console
                    .print_line(&literal.to_string())
                    .map_err(|e| RuntimeErrorKind::from(e).at(position))?;
                Ok(Flow::Continue)
            }
            StmtKind::Block(body) => self.block(body),
            StmtKind::Condition(condition) => self.condition(condition),
            StmtKind::Routine(declaration) => {
                self.env
                    .define_routine(Routine::new(declaration))
                    .map_err(|kind| kind.at(position))?;
                Ok(Flow::Continue)
            }
            StmtKind::Return(None) => Ok(Flow::Return),
            StmtKind::Return(Some(expr)) => {
                let literal = self.evaluate(expr)?;
                // returning the result of a void zoop is a bare return
                if literal.is_void() {
                    Ok(Flow::Return)
                } else {
                    Ok(Flow::Value(literal))
                }
            }
            StmtKind::Loop(body) => self.loop_statement(position, body),
            StmtKind::End => Ok(Flow::End),
        }
    }

    /// Runs the first branch whose guard is truthy, else the `else` body
    fn condition(&mut self, condition: &'p StmtCondition) -> RuntimeResult<Flow> {
        for branch in iter::once(&condition.then_branch).chain(&condition.elif_branches) {
            if self.evaluate(&branch.guard)?.value().is_truthy() {
                return self.block(&branch.body);
            }
        }
        match &condition.else_body {
            Some(body) => self.block(body),
            None => Ok(Flow::Continue),
        }
    }

    /// Repeats `body` until it ends the loop or returns
    fn loop_statement(&mut self, position: Position, body: &'p [Stmt]) -> RuntimeResult<Flow> {
        let mut iterations = 0_usize;
        loop {
            iterations += 1;
            match self.execute_all(body)? {
                Flow::Continue => {}
                Flow::End => {
                    trace!("loop at {position} ended after {iterations} iterations");
                    return Ok(Flow::Continue);
                }
                Flow::Return => return Ok(Flow::Return),
                Flow::Value(_) => return Err(RuntimeErrorKind::UnknownLoopResult.at(position)),
            }
        }
    }
}
