//! Expression grammar, lowest precedence first

use super::Parser;
use crate::error::{SyntaxErrorKind, SyntaxResult};
use std::str::FromStr;
use tracing::trace;
use zoop_ast::expr::{
    BinaryOp, Expr, ExprBinary, ExprCall, ExprCast, ExprDeclare, ExprInput, ExprKind,
    ExprReassign, ExprUnary, UnaryOp, Variable,
};
use zoop_ast::literal::Literal;
use zoop_ast::types::DataType;
use zoop_tokens::spanned::Positioned;
use zoop_tokens::token::{Token, TokenKind};

const CONCAT: &[&str] = &["_"];
const LOGIC: &[&str] = &["&", "|"];
const EQUALITY: &[&str] = &["~=", "="];
const COMPARISON: &[&str] = &[">", ">=", "<", "<="];
const TERM: &[&str] = &["+", "-"];
const FACTOR: &[&str] = &["*", "/"];

impl Parser {
    pub(super) fn expression(&mut self) -> SyntaxResult<Expr> {
        self.concat()
    }

    fn concat(&mut self) -> SyntaxResult<Expr> {
        self.binary(CONCAT, Self::logic)
    }

    fn logic(&mut self) -> SyntaxResult<Expr> {
        self.binary(LOGIC, Self::equality)
    }

    fn equality(&mut self) -> SyntaxResult<Expr> {
        self.binary(EQUALITY, Self::comparison)
    }

    fn comparison(&mut self) -> SyntaxResult<Expr> {
        self.binary(COMPARISON, Self::term)
    }

    fn term(&mut self) -> SyntaxResult<Expr> {
        self.binary(TERM, Self::factor)
    }

    fn factor(&mut self) -> SyntaxResult<Expr> {
        self.binary(FACTOR, Self::unary)
    }

    /// A left associative chain of `operand (op operand)*`. Operators are matched by lexeme, so a
    /// `-` the lexer marked as prefix still subtracts when it follows an operand.
    fn binary(
        &mut self,
        operators: &[&str],
        operand: fn(&mut Self) -> SyntaxResult<Expr>,
    ) -> SyntaxResult<Expr> {
        let mut left = operand(self)?;
        while let Some(token) = self.peek().filter(|t| {
            matches!(t.kind(), TokenKind::BinaryOperator | TokenKind::UnaryOperator)
                && operators.contains(&t.lexeme())
        }) {
            let op_position = token.position();
            let op = BinaryOp::from_str(token.lexeme())
                .map_err(|_| SyntaxErrorKind::InvalidExpression.at(op_position))?;
            self.advance();
            let right = operand(self)?;
            left = Expr::new(
                left.position(),
                ExprKind::Binary(ExprBinary {
                    left: Box::new(left),
                    op,
                    op_position,
                    right: Box::new(right),
                }),
            );
        }
        Ok(left)
    }

    fn unary(&mut self) -> SyntaxResult<Expr> {
        let Some(token) = self
            .peek()
            .filter(|t| t.kind() == TokenKind::UnaryOperator && !self.is_cast())
        else {
            return self.cast();
        };
        let position = token.position();
        let op = UnaryOp::from_str(token.lexeme())
            .map_err(|_| SyntaxErrorKind::InvalidExpression.at(position))?;
        self.advance();
        let operand = self.unary()?;
        Ok(Expr::new(
            position,
            ExprKind::Unary(ExprUnary {
                op,
                operand: Box::new(operand),
            }),
        ))
    }

    /// Whether the cursor sits on `~type`
    fn is_cast(&self) -> bool {
        self.check("~") && self.at(1).is_some_and(Token::is_type_keyword)
    }

    /// A primary followed by any number of `~type` casts
    fn cast(&mut self) -> SyntaxResult<Expr> {
        let mut expr = self.primary()?;
        while self.is_cast() {
            self.advance();
            let position = self.error_position();
            let ty = self.type_keyword()?;
            expr = Expr::new(
                position,
                ExprKind::Cast(ExprCast {
                    expr: Box::new(expr),
                    ty,
                }),
            );
        }
        Ok(expr)
    }

    fn primary(&mut self) -> SyntaxResult<Expr> {
        let position = self.error_position();
        let Some(token) = self.peek().cloned() else {
            return Err(SyntaxErrorKind::InvalidExpression.at(position));
        };
        match token.kind() {
            TokenKind::Literal
                if token.is_label()
                    && self.at(1).is_some_and(|t| t.is(TokenKind::Keyword, "de")) =>
            {
                self.call(&token)
            }
            TokenKind::Literal => {
                self.advance();
                let literal = Literal::from_token(&token)
                    .ok_or_else(|| SyntaxErrorKind::InvalidExpression.at(position))?;
                Ok(Expr::new(position, ExprKind::Literal(literal)))
            }
            TokenKind::Input => self.input(),
            TokenKind::Variable
                if self.at(1).is_some_and(|t| t.kind() == TokenKind::FlowIn)
                    || self.check_sequence(&[
                        TokenKind::Variable,
                        TokenKind::Colon,
                        TokenKind::Keyword,
                        TokenKind::FlowIn,
                    ]) =>
            {
                self.assignment()
            }
            TokenKind::Variable => {
                self.advance();
                let variable = self.variable(&token)?;
                Ok(Expr::new(position, ExprKind::Variable(variable)))
            }
            TokenKind::ParenOpen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(
                    |t| t.kind() == TokenKind::ParenClose,
                    SyntaxErrorKind::UnclosedGrouping,
                )?;
                Ok(Expr::new(position, ExprKind::Grouping(Box::new(inner))))
            }
            _ => Err(SyntaxErrorKind::InvalidExpression.at(position)),
        }
    }

    /// `` `label`de arg arg ... ``
    fn call(&mut self, label: &Token) -> SyntaxResult<Expr> {
        let position = label.position();
        // label, then `de`
        self.advance();
        self.advance();
        let mut args = vec![];
        while self.peek().is_some_and(can_begin_expression) {
            args.push(self.expression()?);
        }
        let label = label.value().map(|v| v.to_string()).unwrap_or_default();
        trace!("call to `{label}` with {} arguments", args.len());
        Ok(Expr::new(position, ExprKind::Call(ExprCall { label, args })))
    }

    /// ``<-|[:type] [`prompt`]``
    fn input(&mut self) -> SyntaxResult<Expr> {
        let position = self.error_position();
        self.advance();
        let ty = if self.match_kind(TokenKind::Colon) {
            self.type_keyword()?
        } else {
            DataType::String
        };
        let prompt = self
            .peek()
            .filter(|t| t.is_label())
            .and_then(Token::value)
            .map(|v| v.to_string());
        if prompt.is_some() {
            self.advance();
        }
        Ok(Expr::new(position, ExprKind::Input(ExprInput { ty, prompt })))
    }

    /// `@name:type <- value` declares, `@name <- value` reassigns
    fn assignment(&mut self) -> SyntaxResult<Expr> {
        let position = self.error_position();
        let Some(token) = self.advance().cloned() else {
            return Err(SyntaxErrorKind::InvalidExpression.at(position));
        };
        let variable = self.variable(&token)?;

        if self.match_kind(TokenKind::FlowIn) {
            if !variable.mutable {
                return Err(SyntaxErrorKind::ImmutableReassigned.at(position));
            }
            let value = self.expression()?;
            return Ok(Expr::new(
                position,
                ExprKind::Reassign(ExprReassign {
                    name: variable.name,
                    value: Box::new(value),
                }),
            ));
        }

        self.match_kind(TokenKind::Colon);
        let ty = self.type_keyword()?;
        self.expect(
            |t| t.kind() == TokenKind::FlowIn,
            SyntaxErrorKind::InvalidExpression,
        )?;
        let value = self.expression()?;
        trace!("declaring {variable}:{ty}");
        Ok(Expr::new(
            position,
            ExprKind::Declare(ExprDeclare {
                variable,
                ty,
                value: Box::new(value),
            }),
        ))
    }

    fn variable(&self, token: &Token) -> SyntaxResult<Variable> {
        Variable::from_lexeme(token.lexeme())
            .filter(|v| !v.name.is_empty())
            .ok_or_else(|| SyntaxErrorKind::InvalidIdentifier.at(token.position()))
    }

    /// A data type keyword inside an expression
    fn type_keyword(&mut self) -> SyntaxResult<DataType> {
        let token = self.expect(Token::is_type_keyword, SyntaxErrorKind::InvalidDataType)?;
        DataType::from_str(token.lexeme())
            .map_err(|_| SyntaxErrorKind::InvalidDataType.at(token.position()))
    }
}

/// Tokens that may start a zoop argument
fn can_begin_expression(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::Literal
            | TokenKind::Variable
            | TokenKind::Input
            | TokenKind::ParenOpen
            | TokenKind::UnaryOperator
    )
}
