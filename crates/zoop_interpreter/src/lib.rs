#![doc = include_str!("../README.md")]

use log::debug;
use zoop_ast::program::Program;
use zoop_ast_parsing::{parse, tokenize};
use zoop_tokens::token::Token;

pub mod console;
pub mod environment;
pub mod error;
pub mod eval;
pub mod routine;

pub use console::{BufferedConsole, Console, StdConsole};
pub use error::{RuntimeError, RuntimeErrorKind, ZoopError};
use eval::Evaluator;

/// A parsed zoop program, ready to run
#[derive(Debug)]
pub struct Interpreter {
    source: String,
    tokens: Vec<Token>,
    program: Program,
}

impl Interpreter {
    /// Normalises, lexes and parses `source`
    pub fn new(source: &str) -> Result<Self, ZoopError> {
        let source = normalize_source(source);
        let tokens = tokenize(&source)?;
        let program = parse(&tokens)?;
        debug!(
            "parsed {} tokens into {} top level statements",
            tokens.len(),
            program.statements().len()
        );
        Ok(Self {
            source,
            tokens,
            program,
        })
    }

    /// The source text after normalisation, which is what error positions refer to
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Runs the program from a fresh environment
    pub fn run(&self, console: &mut dyn Console) -> Result<(), ZoopError> {
        Evaluator::new(console).run(&self.program)?;
        Ok(())
    }
}

/// Drops NUL characters and turns every line ending into `\n`
pub fn normalize_source(source: &str) -> String {
    source
        .replace('\0', "")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;
    use zoop_tokens::spanned::{Position, Positioned};

    #[test]
    fn test_normalize_source() {
        assert_eq!(normalize_source("a\r\nb\rc\0d"), "a\nb\ncd");
    }

    #[test]
    fn test_runs_are_isolated() {
        let interpreter = Interpreter::new("@x:int <- 1\n@x ->|").unwrap();
        for _ in 0..2 {
            let mut console = BufferedConsole::new();
            interpreter.run(&mut console).unwrap();
            assert_eq!(console.output(), ["1"]);
        }
    }

    #[test]
    fn test_syntax_errors_surface_from_new() {
        let err = Interpreter::new("@x:int <- 1\n@x ->| ->").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.category(), "Syntax Error");
        assert_eq!(err.position(), Position::new(2, 7));
    }

    #[test]
    fn test_crlf_positions() {
        let interpreter = Interpreter::new("\"a\" ->|\r\n@missing ->|").unwrap();
        let err = interpreter.run(&mut BufferedConsole::new()).unwrap_err();
        assert_eq!(err.position(), Position::new(2, 0));
        assert_eq!(
            err.render(interpreter.source()).to_string(),
            "\nRuntime Error: Undefined variable '@missing' (2,0)\n@missing ->|\n^"
        );
    }
}
