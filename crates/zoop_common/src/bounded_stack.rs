//! A stack with a fixed maximum depth

use thiserror::Error;

/// A stack that refuses to grow past its capacity
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Creates an empty stack that holds at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an item, failing if the stack is already full
    pub fn push(&mut self, item: T) -> Result<(), CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }
}

/// Returned when pushing onto a full [BoundedStack]
#[derive(Debug, Copy, Clone, Error)]
#[error("stack capacity of {capacity} exceeded")]
pub struct CapacityExceeded {
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut stack = BoundedStack::new(2);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert!(stack.is_full());
        let err = stack.push(3).unwrap_err();
        assert_eq!(err.capacity, 2);
        assert_eq!(err.to_string(), "stack capacity of 2 exceeded");
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_peek_and_pop() {
        let mut stack = BoundedStack::new(4);
        assert!(stack.peek().is_none());
        stack.push("a").unwrap();
        stack.push("b").unwrap();
        assert_eq!(stack.peek(), Some(&"b"));
        assert_eq!(stack.pop(), Some("b"));
        assert_eq!(stack.pop(), Some("a"));
        assert!(stack.is_empty());
    }
}
