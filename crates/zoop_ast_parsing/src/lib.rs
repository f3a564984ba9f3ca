#![doc = include_str!("../README.md")]

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{SyntaxError, SyntaxErrorKind};
pub use lexer::tokenize;
pub use parser::parse;
