#![doc = include_str!("../README.md")]

pub mod expr;
pub mod literal;
pub mod program;
pub mod statements;
pub mod types;
