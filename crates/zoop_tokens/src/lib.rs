#![doc = include_str!("../README.md")]

use crate::spanned::{source_line, Position};
use std::fmt::{Display, Formatter};

pub mod spanned;
pub mod token;

/// A rendered report of an error at a location in some source text
#[derive(Debug)]
pub struct Diagnostic<'s> {
    category: &'static str,
    message: String,
    position: Position,
    src: &'s str,
}

impl<'s> Diagnostic<'s> {
    /// Creates a new diagnostic pointing into `src`
    pub fn new(
        category: &'static str,
        message: impl Display,
        position: Position,
        src: &'s str,
    ) -> Self {
        Self {
            category,
            message: message.to_string(),
            position,
            src,
        }
    }
}

impl Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "{}: {} ({})",
            self.category, self.message, self.position
        )?;
        if let Some(line) = source_line(self.src, self.position.line) {
            writeln!(f, "{}", line.trim_end())?;
            write!(f, "{}^", " ".repeat(self.position.column))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_diagnostic() {
        let src = "$x:int <- 5\n@missing ->|\n";
        let diagnostic = Diagnostic::new(
            "Runtime Error",
            "Undefined variable '@missing'",
            Position::new(2, 0),
            src,
        );
        assert_eq!(
            diagnostic.to_string(),
            "\nRuntime Error: Undefined variable '@missing' (2,0)\n@missing ->|\n^"
        );
    }

    #[test]
    fn test_render_points_at_column() {
        let src = "a\n$x:int <- 1 +\nc";
        let diagnostic =
            Diagnostic::new("Syntax Error", "Invalid syntax", Position::new(2, 13), src);
        assert_eq!(
            diagnostic.to_string(),
            "\nSyntax Error: Invalid syntax (2,13)\n$x:int <- 1 +\n             ^"
        );
    }
}
