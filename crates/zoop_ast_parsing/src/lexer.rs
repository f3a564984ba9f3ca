//! Responsible with converting zoop source text into a token sequence

use crate::error::{SyntaxErrorKind, SyntaxResult};
use crate::lexer::token_parsing::{
    parse_block_comment, parse_bool, parse_line_comment, parse_number_run, parse_quoted,
    parse_slice, parse_type_keyword, parse_variable_id, OPERATOR_CHARS,
};
use tracing::trace;
use zoop_common::nom_helpers::{is_identifier, is_number};
use zoop_tokens::spanned::{Position, Span};
use zoop_tokens::token::{Token, TokenKind, TokenValue, UNARY_OPERATORS};

mod token_parsing;

/// Converts source text into tokens, stopping at the first error
pub fn tokenize(src: &str) -> SyntaxResult<Vec<Token>> {
    Lexer::new(src).tokenize()
}

/// Responsible with converting source text into a token sequence
#[derive(Debug)]
pub struct Lexer<'a> {
    src: &'a str,
    /// byte offset into `src`
    offset: usize,
    /// char offset into `src`
    index: usize,
    position: Position,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            index: 0,
            position: Position::start(),
            tokens: vec![],
        }
    }

    /// Consumes the whole source
    pub fn tokenize(mut self) -> SyntaxResult<Vec<Token>> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.check_detached_unary()?;
                    let src = self.src;
                    self.advance(&src[self.offset..self.offset + c.len_utf8()]);
                }
                '\n' => self.emit(TokenKind::NewLine, "\n", None),
                '@' | '$' => self.variable(c)?,
                ':' => self.type_annotation()?,
                '(' => self.emit(TokenKind::ParenOpen, "(", None),
                ')' => self.emit(TokenKind::ParenClose, ")", None),
                '"' | '`' => self.quoted(c)?,
                c if c.is_ascii_digit() => self.number()?,
                _ => self.other()?,
            }
        }
        trace!("lexed {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn previous_char(&self) -> Option<char> {
        self.src[..self.offset].chars().next_back()
    }

    /// Moves past `text`, which must be the next part of the source
    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 0;
            } else {
                self.position.column += 1;
            }
            self.index += 1;
            self.offset += c.len_utf8();
        }
    }

    /// Pushes a token for `lexeme` starting at the current position, then moves past it
    fn emit(&mut self, kind: TokenKind, lexeme: &str, value: Option<TokenValue>) {
        let span = Span::new(self.index, lexeme.chars().count());
        let mut token = Token::new(kind, lexeme, self.position, span);
        if let Some(value) = value {
            token = token.with_value(value);
        }
        trace!("lexed {token:?}");
        self.tokens.push(token);
        self.advance(lexeme);
    }

    /// A prefix `~` may not be separated from its operand
    fn check_detached_unary(&self) -> SyntaxResult {
        match self.tokens.last() {
            Some(last)
                if UNARY_OPERATORS
                    .iter()
                    .filter(|&&op| op != "-")
                    .any(|&op| op == last.lexeme()) =>
            {
                Err(SyntaxErrorKind::DetachedUnaryOperator(last.lexeme().to_string())
                    .at(self.position))
            }
            _ => Ok(()),
        }
    }

    fn variable(&mut self, sigil: char) -> SyntaxResult {
        let rest = &self.rest()[sigil.len_utf8()..];
        let (_, id) = parse_variable_id(rest)
            .map_err(|_| SyntaxErrorKind::InvalidIdentifier.at(self.position))?;
        if !is_identifier(id) {
            let mut position = self.position;
            position.column += 1;
            return Err(SyntaxErrorKind::InvalidIdentifier.at(position));
        }
        let lexeme = format!("{sigil}{id}");
        self.emit(TokenKind::Variable, &lexeme, Some(id.into()));
        Ok(())
    }

    fn type_annotation(&mut self) -> SyntaxResult {
        self.emit(TokenKind::Colon, ":", None);
        match parse_type_keyword(self.rest()) {
            Ok((_, keyword)) => {
                self.emit(TokenKind::Keyword, keyword, None);
                Ok(())
            }
            Err(_) => {
                let kind = match self.peek() {
                    None | Some(' ') | Some('\n') => SyntaxErrorKind::MissingDataType,
                    Some(_) => SyntaxErrorKind::InvalidDataType,
                };
                Err(kind.at(self.position))
            }
        }
    }

    fn quoted(&mut self, quote: char) -> SyntaxResult {
        let (_, inner) = parse_quoted(quote)(self.rest())
            .map_err(|_| SyntaxErrorKind::UnclosedString.at(self.position))?;
        let lexeme = &self.rest()[..inner.len() + 2 * quote.len_utf8()];
        self.emit(TokenKind::Literal, lexeme, Some(inner.into()));
        Ok(())
    }

    fn number(&mut self) -> SyntaxResult {
        let (_, (run, unsigned)) = parse_number_run(self.rest())
            .map_err(|_| SyntaxErrorKind::InvalidNumberLiteral.at(self.position))?;
        if !is_number(run) {
            return Err(SyntaxErrorKind::InvalidNumberLiteral.at(self.position));
        }
        let value = run
            .parse::<f64>()
            .map_err(|_| SyntaxErrorKind::InvalidNumberLiteral.at(self.position))?;
        let lexeme = if unsigned {
            format!("{run}u")
        } else {
            run.to_string()
        };
        self.emit(TokenKind::Literal, &lexeme, Some(value.into()));
        Ok(())
    }

    /// Booleans, comments, then the fixed lexeme table
    fn other(&mut self) -> SyntaxResult {
        let rest = self.rest();
        if let Ok((_, value)) = parse_bool(rest) {
            let lexeme = if value { "true" } else { "false" };
            self.emit(TokenKind::Literal, lexeme, Some(value.into()));
        } else if rest.starts_with("--*") {
            let (_, inner) = parse_block_comment(rest)
                .map_err(|_| SyntaxErrorKind::UnclosedBlockComment.at(self.position))?;
            let lexeme = &rest[..inner.len() + 6];
            self.emit(TokenKind::BlockComment, lexeme, Some(inner.into()));
        } else if let Ok((_, text)) = parse_line_comment(rest) {
            let lexeme = &rest[..text.len() + 2];
            self.emit(TokenKind::Comment, lexeme, Some(text.into()));
        } else if let Ok((after, (slice, kind))) = parse_slice(rest) {
            let kind = match kind {
                TokenKind::FlowIn if !self.flow_in_has_target() => {
                    return Err(SyntaxErrorKind::InvalidFlowIn.at(self.position));
                }
                TokenKind::BinaryOperator if UNARY_OPERATORS.contains(&slice) => {
                    self.classify_prefix(after)
                }
                kind => kind,
            };
            self.emit(kind, slice, None);
        } else {
            return Err(SyntaxErrorKind::InvalidSyntax.at(self.position));
        }
        Ok(())
    }

    /// `-` and `~` are prefix operators when they touch the following operand and do not follow
    /// another operator character
    fn classify_prefix(&self, after: &str) -> TokenKind {
        let touches_operand = !after.starts_with(' ');
        let follows_operator = self
            .previous_char()
            .is_some_and(|c| OPERATOR_CHARS.contains(&c));
        if touches_operand && !follows_operator {
            TokenKind::UnaryOperator
        } else {
            TokenKind::BinaryOperator
        }
    }

    /// `<-` must follow a variable, `var:type`, or a zoop label
    fn flow_in_has_target(&self) -> bool {
        let back = |n: usize| {
            self.tokens
                .len()
                .checked_sub(n)
                .and_then(|idx| self.tokens.get(idx))
        };
        let kind_back = |n: usize| back(n).map(Token::kind);
        let lexeme_is = |n: usize, lexeme: &str| back(n).is_some_and(|t| t.lexeme() == lexeme);

        let variable = kind_back(1) == Some(TokenKind::Variable);
        let declaration = kind_back(1) == Some(TokenKind::Keyword)
            && kind_back(2) == Some(TokenKind::Colon)
            && kind_back(3) == Some(TokenKind::Variable);
        let routine = back(1).is_some_and(Token::is_label)
            && (lexeme_is(2, "zoop")
                || (kind_back(2) == Some(TokenKind::Keyword)
                    && kind_back(3) == Some(TokenKind::Colon)
                    && lexeme_is(4, "zoop")));
        variable || declaration || routine
    }
}
