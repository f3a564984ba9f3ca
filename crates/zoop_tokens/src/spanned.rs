//! Locations within zoop source text

use std::fmt::{Display, Formatter};

/// A trait that can provide the [Position] of a token or tree node
pub trait Positioned {
    fn position(&self) -> Position;
}

/// A line/column pair. Lines are 1-based, columns are 0-based.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Creates a new position
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a source file
    pub const fn start() -> Self {
        Self::new(1, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

impl Positioned for Position {
    fn position(&self) -> Position {
        *self
    }
}

/// A character range within the source, `offset` counted in chars from the start
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    /// Creates a new span
    pub const fn new(start: usize, len: usize) -> Self {
        Self { offset: start, len }
    }

    /// The char offset directly after this span
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Gets the text of a 1-based `line` of `src`, without its line terminator
pub fn source_line(src: &str, line: usize) -> Option<&str> {
    src.split('\n').nth(line.checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_end() {
        let span = Span::new(3, 5);
        assert_eq!(span.end(), 8);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "3,7");
        assert_eq!(Position::default(), Position::new(1, 0));
    }

    #[test]
    fn test_source_line() {
        let src = "first\nsecond\nthird\nfourth";
        assert_eq!(source_line(src, 2), Some("second"));
        assert_eq!(source_line(src, 4), Some("fourth"));
        assert_eq!(source_line(src, 5), None);
        assert_eq!(source_line(src, 0), None);
    }
}
