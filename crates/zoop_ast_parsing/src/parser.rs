//! Recursive descent parser that turns a token sequence into a [Program]

use crate::error::{SyntaxErrorKind, SyntaxResult};
use tracing::trace;
use zoop_ast::program::Program;
use zoop_tokens::spanned::{Position, Positioned};
use zoop_tokens::token::{Token, TokenKind};

mod expr;
mod statement;

/// Parses a token sequence into a program. Comments are dropped before parsing.
pub fn parse(tokens: &[Token]) -> SyntaxResult<Program> {
    Parser::new(tokens).parse()
}

/// The parser, holding a cursor into the significant tokens
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    /// How many `loop` bodies enclose the cursor
    loop_depth: usize,
    /// How many bodies of any kind enclose the cursor
    block_depth: usize,
}

impl Parser {
    /// Creates a new parser over `tokens`
    pub fn new(tokens: &[Token]) -> Self {
        Self {
            tokens: tokens
                .iter()
                .filter(|t| !matches!(t.kind(), TokenKind::Comment | TokenKind::BlockComment))
                .cloned()
                .collect(),
            current: 0,
            loop_depth: 0,
            block_depth: 0,
        }
    }

    /// Parses every top level statement
    pub fn parse(mut self) -> SyntaxResult<Program> {
        let mut body = vec![];
        while !self.is_at_end() {
            if self.match_kind(TokenKind::NewLine) {
                continue;
            }
            body.push(self.statement()?);
        }
        trace!("parsed {} top level statements", body.len());
        Ok(Program::new(body))
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Looks `offset` tokens past the cursor
    fn at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset)
    }

    fn peek(&self) -> Option<&Token> {
        self.at(0)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.current);
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn check(&self, lexeme: &str) -> bool {
        self.peek().is_some_and(|t| t.lexeme() == lexeme)
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind() == kind)
    }

    /// Checks that the upcoming tokens have exactly these kinds
    fn check_sequence(&self, kinds: &[TokenKind]) -> bool {
        kinds
            .iter()
            .enumerate()
            .all(|(offset, &kind)| self.at(offset).is_some_and(|t| t.kind() == kind))
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check_kind(kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// The position used for errors at the cursor, falling back to the last token
    fn error_position(&self) -> Position {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.position())
            .unwrap_or_default()
    }

    /// Consumes the next token, failing with `kind` if it does not satisfy `predicate`
    fn expect(
        &mut self,
        predicate: impl FnOnce(&Token) -> bool,
        kind: SyntaxErrorKind,
    ) -> SyntaxResult<Token> {
        let position = self.error_position();
        match self.peek() {
            Some(token) if predicate(token) => {
                let token = token.clone();
                self.current += 1;
                Ok(token)
            }
            _ => Err(kind.at(position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxError;
    use crate::lexer::tokenize;
    use test_log::test;
    use zoop_ast::expr::{BinaryOp, ExprKind};
    use zoop_ast::statements::StmtKind;

    pub(super) fn parse_src(src: &str) -> SyntaxResult<Program> {
        parse(&tokenize(src)?)
    }

    pub(super) fn parse_err(src: &str) -> SyntaxError {
        parse_src(src).expect_err("should fail to parse")
    }

    #[test]
    fn test_comments_are_dropped() {
        let program = parse_src("-- leading\n$x:int <- 1 --* inline *--\n").unwrap();
        assert_eq!(program.statements().len(), 1);
    }

    #[test]
    fn test_blank_program() {
        assert!(parse_src("\n\n-- nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_print_statement() {
        let program = parse_src("$x + $y ->|").unwrap();
        let [stmt] = program.statements() else {
            panic!("expected one statement");
        };
        let StmtKind::Print(expr) = &stmt.kind else {
            panic!("expected print, got {stmt:?}");
        };
        let ExprKind::Binary(binary) = &expr.kind else {
            panic!("expected binary, got {expr:?}");
        };
        assert_eq!(binary.op, BinaryOp::Add);
        assert_eq!(stmt.position(), Position::new(1, 8));
    }
}
