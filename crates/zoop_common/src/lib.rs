#![doc = include_str!("../README.md")]

pub mod bounded_stack;
pub mod nom_helpers;
