//! Statement level grammar

use super::Parser;
use crate::error::{SyntaxErrorKind, SyntaxResult};
use std::str::FromStr;
use tracing::{instrument, trace};
use zoop_ast::expr::Variable;
use zoop_ast::statements::{ConditionBranch, Param, Stmt, StmtCondition, StmtKind, StmtRoutine};
use zoop_ast::types::DataType;
use zoop_tokens::spanned::{Position, Positioned};
use zoop_tokens::token::{Token, TokenKind};

impl Parser {
    /// Parses a single statement
    pub(super) fn statement(&mut self) -> SyntaxResult<Stmt> {
        let position = self.error_position();
        let Some((kind, lexeme)) = self.peek().map(|t| (t.kind(), t.lexeme().to_string())) else {
            return Err(SyntaxErrorKind::InvalidExpression.at(position));
        };
        match (kind, lexeme.as_str()) {
            (TokenKind::BlockOpen, _) => self.scope_block(),
            (TokenKind::Keyword, "zoop") if self.block_depth > 0 => {
                Err(SyntaxErrorKind::NestedRoutine.at(position))
            }
            (TokenKind::Keyword, "zoop") => self.routine(),
            (TokenKind::Keyword, "if") => self.condition(),
            (TokenKind::Keyword, "loop") => self.loop_statement(),
            (TokenKind::Keyword, "end") if self.loop_depth == 0 => {
                Err(SyntaxErrorKind::EndOutsideLoop.at(position))
            }
            (TokenKind::Keyword, "end") => {
                self.advance();
                Ok(Stmt::new(position, StmtKind::End))
            }
            (TokenKind::Keyword, "de") => Err(SyntaxErrorKind::DetachedDe.at(position)),
            (TokenKind::FlowOut, _) => {
                self.advance();
                Ok(Stmt::new(position, StmtKind::Return(None)))
            }
            _ => self.line_statement(),
        }
    }

    /// An expression statement, optionally ended by `->|` or `->`
    fn line_statement(&mut self) -> SyntaxResult<Stmt> {
        let end = self.line_end();
        let line = &self.tokens[self.current..end];
        let output = line.iter().position(|t| t.kind() == TokenKind::Output);
        let flow_out = line.iter().position(|t| t.kind() == TokenKind::FlowOut);

        let terminator = match (output, flow_out) {
            (Some(_), Some(flow_out)) => {
                return Err(SyntaxErrorKind::PrintAndReturn.at(line[flow_out].position()));
            }
            (Some(idx), None) if idx + 1 != line.len() => {
                return Err(SyntaxErrorKind::PrintNotAtLineEnd.at(line[idx].position()));
            }
            (None, Some(idx)) if idx + 1 != line.len() => {
                return Err(SyntaxErrorKind::ReturnNotAtLineEnd.at(line[idx].position()));
            }
            (Some(_), None) => Some(TokenKind::Output),
            (None, Some(_)) => Some(TokenKind::FlowOut),
            (None, None) => None,
        };

        let expr = self.expression()?;
        let Some(terminator) = terminator else {
            return Ok(Stmt::new(expr.position(), StmtKind::Expr(expr)));
        };
        let position = self.error_position();
        let unexpected = self
            .peek()
            .map(|t| t.lexeme().to_string())
            .unwrap_or_default();
        let token = self.expect(
            |t| t.kind() == terminator,
            SyntaxErrorKind::UnexpectedToken(unexpected),
        )?;
        trace!("line statement ended by {token:?}");
        let kind = match terminator {
            TokenKind::Output => StmtKind::Print(expr),
            _ => StmtKind::Return(Some(expr)),
        };
        Ok(Stmt::new(position, kind))
    }

    /// The index just past the last token of the current line. Lines also end before `elif`,
    /// `else` and `}` so that inline bodies can share a line with what follows them.
    fn line_end(&self) -> usize {
        self.tokens[self.current..]
            .iter()
            .position(|t| {
                t.kind() == TokenKind::NewLine
                    || t.kind() == TokenKind::BlockClose
                    || t.is(TokenKind::Keyword, "elif")
                    || t.is(TokenKind::Keyword, "else")
            })
            .map(|idx| self.current + idx)
            .unwrap_or(self.tokens.len())
    }

    /// `{ ... }`
    fn scope_block(&mut self) -> SyntaxResult<Stmt> {
        let position = self.error_position();
        self.advance();
        self.block_depth += 1;
        let mut body = vec![];
        loop {
            if self.match_kind(TokenKind::NewLine) {
                continue;
            }
            if self.match_kind(TokenKind::BlockClose) {
                break;
            }
            if self.is_at_end() {
                return Err(SyntaxErrorKind::UnclosedScopeBlock.at(position));
            }
            body.push(self.statement()?);
        }
        self.block_depth -= 1;
        Ok(Stmt::new(position, StmtKind::Block(body)))
    }

    /// The body of an `if`, `elif`, `else`, `loop` or `zoop`.
    ///
    /// Either a single statement after `=>`, or statements up to the `closing` keyword which
    /// must then be followed by a new line.
    fn body(
        &mut self,
        closing: &'static str,
        construct: &'static str,
        position: Position,
    ) -> SyntaxResult<Vec<Stmt>> {
        self.block_depth += 1;
        let body = self.body_statements(closing, construct, position);
        self.block_depth -= 1;
        body
    }

    fn body_statements(
        &mut self,
        closing: &'static str,
        construct: &'static str,
        position: Position,
    ) -> SyntaxResult<Vec<Stmt>> {
        if self.match_kind(TokenKind::Direct) {
            let stmt = self.statement()?;
            self.match_kind(TokenKind::NewLine);
            return Ok(vec![stmt]);
        }

        let mut body = vec![];
        loop {
            if self.match_kind(TokenKind::NewLine) {
                continue;
            }
            if self.is_at_end() {
                return Err(SyntaxErrorKind::UnclosedBlock { closing, construct }.at(position));
            }
            if self.peek().is_some_and(|t| t.is(TokenKind::Keyword, closing)) {
                self.advance();
                break;
            }
            body.push(self.statement()?);
        }

        if !self.is_at_end() && !self.match_kind(TokenKind::NewLine) {
            return Err(SyntaxErrorKind::MissingNewLine(construct).at(self.error_position()));
        }
        Ok(body)
    }

    /// `if`, `elif` and `else`
    #[instrument(level = "trace", skip_all)]
    fn condition(&mut self) -> SyntaxResult<Stmt> {
        let position = self.error_position();
        let then_branch = self.branch("end if", "if")?;
        let mut elif_branches = vec![];
        while self.peek().is_some_and(|t| t.is(TokenKind::Keyword, "elif")) {
            elif_branches.push(self.branch("end elif", "elif")?);
        }
        let else_body = if self.peek().is_some_and(|t| t.is(TokenKind::Keyword, "else")) {
            let else_position = self.error_position();
            self.advance();
            Some(self.body("end else", "else", else_position)?)
        } else {
            None
        };
        trace!(
            "parsed condition with {} elif branches, else: {}",
            elif_branches.len(),
            else_body.is_some()
        );
        Ok(Stmt::new(
            position,
            StmtKind::Condition(StmtCondition {
                then_branch,
                elif_branches,
                else_body,
            }),
        ))
    }

    /// A keyword, its guard and its body
    fn branch(&mut self, closing: &'static str, construct: &'static str) -> SyntaxResult<ConditionBranch> {
        let position = self.error_position();
        self.advance();
        let guard = self.expression()?;
        let body = self.body(closing, construct, position)?;
        Ok(ConditionBranch::new(position, guard, body))
    }

    fn loop_statement(&mut self) -> SyntaxResult<Stmt> {
        let position = self.error_position();
        self.advance();
        self.loop_depth += 1;
        let body = self.body("end loop", "loop", position);
        self.loop_depth -= 1;
        Ok(Stmt::new(position, StmtKind::Loop(body?)))
    }

    /// ``zoop[:type] `label` <- $param:type ... body``
    #[instrument(level = "trace", skip_all)]
    fn routine(&mut self) -> SyntaxResult<Stmt> {
        let position = self.error_position();
        self.advance();

        let return_type = if self.match_kind(TokenKind::Colon) {
            Some(self.data_type()?)
        } else {
            None
        };
        let label = self.expect(Token::is_label, SyntaxErrorKind::InvalidRoutineLabel)?;
        let label = label
            .value()
            .map(|value| value.to_string())
            .ok_or_else(|| SyntaxErrorKind::InvalidRoutineLabel.at(label.position()))?;
        self.expect(
            |t| t.kind() == TokenKind::FlowIn,
            SyntaxErrorKind::MissingRoutineFlowIn,
        )?;

        let mut params = vec![];
        while !self.is_at_end()
            && !self.check_kind(TokenKind::Direct)
            && !self.check_kind(TokenKind::BlockOpen)
            && !self.check_kind(TokenKind::NewLine)
        {
            params.push(self.param()?);
        }
        trace!("zoop `{label}` takes {params:?} and returns {return_type:?}");

        let body = self.body("end zoop", "zoop", position)?;
        Ok(Stmt::new(
            position,
            StmtKind::Routine(StmtRoutine {
                label,
                params,
                body,
                return_type,
            }),
        ))
    }

    /// `$name:type`
    fn param(&mut self) -> SyntaxResult<Param> {
        let token = self.expect(
            |t| t.kind() == TokenKind::Variable,
            SyntaxErrorKind::InvalidParameter,
        )?;
        let variable = Variable::from_lexeme(token.lexeme())
            .filter(|v| !v.name.is_empty())
            .ok_or_else(|| SyntaxErrorKind::InvalidParameter.at(token.position()))?;
        if variable.mutable {
            return Err(SyntaxErrorKind::MutableParameter.at(token.position()));
        }
        self.expect(
            |t| t.kind() == TokenKind::Colon,
            SyntaxErrorKind::MissingParameterColon,
        )?;
        let ty = self.data_type()?;
        Ok(Param::new(variable.name, ty))
    }

    /// A data type keyword, as found after a `:` in a zoop declaration
    fn data_type(&mut self) -> SyntaxResult<DataType> {
        let token = self.expect(Token::is_type_keyword, SyntaxErrorKind::InvalidRoutineType)?;
        DataType::from_str(token.lexeme())
            .map_err(|_| SyntaxErrorKind::InvalidRoutineType.at(token.position()))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::{parse_err, parse_src};
    use test_log::test;
    use zoop_ast::expr::ExprKind;
    use zoop_ast::statements::StmtKind;
    use zoop_ast::types::DataType;
    use zoop_tokens::spanned::{Position, Positioned};

    use crate::error::SyntaxErrorKind;
    use std::sync::{Arc, Mutex};
    use tracing::{span, Event, Level, Metadata, Subscriber};

    #[test]
    fn test_scenario_declarations() {
        let program = parse_src("$x:int <- 5\n$y:int <- 3\n$x + $y ->|").unwrap();
        let kinds = program
            .statements()
            .iter()
            .map(|s| &s.kind)
            .collect::<Vec<_>>();
        assert!(matches!(kinds[0], StmtKind::Expr(e) if matches!(e.kind, ExprKind::Declare(_))));
        assert!(matches!(kinds[1], StmtKind::Expr(e) if matches!(e.kind, ExprKind::Declare(_))));
        assert!(matches!(kinds[2], StmtKind::Print(_)));
    }

    #[test]
    fn test_inline_if_else() {
        let program = parse_src("if false => \"a\" ->| else => \"b\" ->|").unwrap();
        let [stmt] = program.statements() else {
            panic!("expected a single statement");
        };
        let StmtKind::Condition(condition) = &stmt.kind else {
            panic!("expected a condition");
        };
        assert_eq!(condition.then_branch.body.len(), 1);
        assert!(condition.elif_branches.is_empty());
        let else_body = condition.else_body.as_ref().expect("else body");
        assert!(matches!(else_body[0].kind, StmtKind::Print(_)));
    }

    #[test]
    fn test_block_condition() {
        let src = "if $a\n\"a\" ->|\nend if\nelif $b => \"b\" ->|\nelse\n\"c\" ->|\nend else\n";
        let program = parse_src(src).unwrap();
        let StmtKind::Condition(condition) = &program.statements()[0].kind else {
            panic!("expected a condition");
        };
        assert_eq!(condition.elif_branches.len(), 1);
        assert_eq!(condition.elif_branches[0].position(), Position::new(4, 0));
        assert!(condition.else_body.is_some());
        assert_eq!(program.statements().len(), 1);
    }

    #[test]
    fn test_routine_declaration() {
        let src = "zoop:int `add` <- $a:int $b:int\n$a + $b ->\nend zoop\n`add`de 1 2 ->|";
        let program = parse_src(src).unwrap();
        let StmtKind::Routine(routine) = &program.statements()[0].kind else {
            panic!("expected a routine");
        };
        assert_eq!(routine.label, "add");
        assert_eq!(routine.return_type, Some(DataType::Int));
        assert_eq!(routine.params.len(), 2);
        assert_eq!(routine.params[1].name, "b");
        assert!(matches!(routine.body[0].kind, StmtKind::Return(Some(_))));

        let StmtKind::Print(call) = &program.statements()[1].kind else {
            panic!("expected a print");
        };
        let ExprKind::Call(call) = &call.kind else {
            panic!("expected a call");
        };
        assert_eq!(call.label, "add");
        assert_eq!(call.args.len(), 2);
    }

    #[test]
    fn test_void_routine_inline() {
        let program = parse_src("zoop `hello` <- => \"hi\" ->|\n`hello`de").unwrap();
        let StmtKind::Routine(routine) = &program.statements()[0].kind else {
            panic!("expected a routine");
        };
        assert_eq!(routine.return_type, None);
        assert!(routine.params.is_empty());
        assert_eq!(program.statements().len(), 2);
    }

    #[test]
    fn test_loop_with_end() {
        let src = "@i:int <- 0\nloop\n@i <- @i + 1\nif @i = 3 => end\nend loop\n@i ->|";
        let program = parse_src(src).unwrap();
        let StmtKind::Loop(body) = &program.statements()[1].kind else {
            panic!("expected a loop");
        };
        assert_eq!(body.len(), 2);
        assert_eq!(program.statements().len(), 3);
    }

    #[test]
    fn test_scope_block() {
        let program = parse_src("{\n@x:int <- 1\n{ @x ->| }\n}").unwrap();
        let StmtKind::Block(body) = &program.statements()[0].kind else {
            panic!("expected a block");
        };
        assert!(matches!(body[1].kind, StmtKind::Block(_)));
    }

    #[test]
    fn test_bare_return() {
        let program = parse_src("zoop `f` <-\n->\nend zoop").unwrap();
        let StmtKind::Routine(routine) = &program.statements()[0].kind else {
            panic!("expected a routine");
        };
        assert_eq!(routine.body[0].kind, StmtKind::Return(None));
    }

    #[test]
    fn test_end_outside_loop() {
        let err = parse_err("\nend");
        assert_eq!(err.kind, SyntaxErrorKind::EndOutsideLoop);
        assert_eq!(err.position, Position::new(2, 0));
    }

    #[test]
    fn test_nested_routine() {
        let err = parse_err("loop\nzoop `f` <- => end\nend loop");
        assert_eq!(err.kind, SyntaxErrorKind::NestedRoutine);
    }

    #[test]
    fn test_unclosed_blocks() {
        let err = parse_err("{\n\"a\" ->|\n");
        assert_eq!(err.kind, SyntaxErrorKind::UnclosedScopeBlock);
        assert_eq!(err.position, Position::new(1, 0));

        let err = parse_err("loop\n@i <- 1\n");
        assert_eq!(
            err.kind,
            SyntaxErrorKind::UnclosedBlock {
                closing: "end loop",
                construct: "loop"
            }
        );
    }

    #[test]
    fn test_missing_new_line() {
        let err = parse_err("loop\nend\nend loop \"x\" ->|");
        assert_eq!(err.kind, SyntaxErrorKind::MissingNewLine("loop"));
    }

    #[test]
    fn test_print_and_return() {
        assert_eq!(parse_err("$x ->| ->").kind, SyntaxErrorKind::PrintAndReturn);
        assert_eq!(parse_err("$x ->| $y").kind, SyntaxErrorKind::PrintNotAtLineEnd);
        assert_eq!(parse_err("$x -> $y").kind, SyntaxErrorKind::ReturnNotAtLineEnd);
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse_err("\"a\" \"b\" ->|");
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken("\"b\"".to_string()));
    }

    #[test]
    fn test_detached_de() {
        assert_eq!(parse_err("de 1").kind, SyntaxErrorKind::DetachedDe);
    }

    #[test]
    fn test_routine_errors() {
        assert_eq!(
            parse_err("zoop $f <- => ->").kind,
            SyntaxErrorKind::InvalidRoutineLabel
        );
        assert_eq!(
            parse_err("zoop `f` <- @a:int => ->").kind,
            SyntaxErrorKind::MutableParameter
        );
        assert_eq!(
            parse_err("zoop `f` <- $a $b:int => ->").kind,
            SyntaxErrorKind::MissingParameterColon
        );
        assert_eq!(
            parse_err("zoop `f` <- 1 => ->").kind,
            SyntaxErrorKind::InvalidParameter
        );
    }

    /// Remembers the name and level of every span opened while it is the default subscriber
    struct SpanRecorder(Arc<Mutex<Vec<(&'static str, Level)>>>);

    impl Subscriber for SpanRecorder {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, span: &span::Attributes<'_>) -> span::Id {
            let mut spans = self.0.lock().unwrap();
            spans.push((span.metadata().name(), *span.metadata().level()));
            span::Id::from_u64(spans.len() as u64)
        }

        fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

        fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

        fn event(&self, _: &Event<'_>) {}

        fn enter(&self, _: &span::Id) {}

        fn exit(&self, _: &span::Id) {}
    }

    #[test]
    fn test_parser_spans_are_trace_level() {
        let spans = Arc::new(Mutex::new(Vec::new()));
        tracing::subscriber::with_default(SpanRecorder(spans.clone()), || {
            parse_src("zoop `f` <- $n:int\nif $n > 1 => \"big\" ->|\nend zoop").unwrap();
        });
        let spans = spans.lock().unwrap();
        let names = spans.iter().map(|(name, _)| *name).collect::<Vec<_>>();
        assert!(names.contains(&"routine"), "{names:?}");
        assert!(names.contains(&"condition"), "{names:?}");
        assert!(spans.iter().all(|(_, level)| *level == Level::TRACE), "{spans:?}");
    }
}
