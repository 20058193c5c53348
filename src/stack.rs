use std::fmt::Display;

use log::trace;

use crate::error::StackError;

/// LIFO buffer with an explicit logical capacity that doubles whenever a
/// push would overflow it.
///
/// `Clone` duplicates the contents, so a cloned stack never observes
/// pushes or pops made on the original (and vice versa).
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Stack<T> {
    pub fn new(initial_capacity: usize) -> Result<Self, StackError> {
        if initial_capacity == 0 {
            return Err(StackError::InvalidCapacity);
        }
        Ok(Stack {
            items: Vec::with_capacity(initial_capacity),
            capacity: initial_capacity,
        })
    }

    pub fn push(&mut self, value: T) {
        if self.is_full() {
            self.grow(self.capacity * 2);
        }
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::Underflow { op: "pop" })
    }

    pub fn peek(&self) -> Result<&T, StackError> {
        self.items.last().ok_or(StackError::Underflow { op: "peek" })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every element but keeps the allocated capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    fn grow(&mut self, new_capacity: usize) {
        trace!("stack grows {} -> {new_capacity}", self.capacity);
        self.items.reserve_exact(new_capacity - self.items.len());
        self.capacity = new_capacity;
    }
}

impl<T: Display> Display for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stack (size: {}, capacity: {}): ", self.size(), self.capacity)?;
        if self.is_empty() {
            return write!(f, "empty");
        }
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stack() {
        let stack = Stack::<i32>::new(5).unwrap();
        assert!(stack.is_empty());
        assert!(!stack.is_full());
        assert_eq!(stack.size(), 0);
        assert_eq!(stack.capacity(), 5);
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(Stack::<i32>::new(0), Err(StackError::InvalidCapacity));
    }

    #[test]
    fn push_until_full() {
        let mut stack = Stack::new(3).unwrap();
        stack.push(10);
        assert!(!stack.is_empty());
        assert_eq!(stack.size(), 1);
        stack.push(20);
        stack.push(30);
        assert_eq!(stack.size(), 3);
        assert!(stack.is_full());
    }

    #[test]
    fn pops_in_reverse_order() {
        let mut stack = Stack::new(3).unwrap();
        stack.push(10);
        stack.push(20);
        stack.push(30);
        assert_eq!(stack.pop(), Ok(30));
        assert_eq!(stack.pop(), Ok(20));
        assert_eq!(stack.pop(), Ok(10));
        assert!(stack.is_empty());
    }

    #[test]
    fn peek_leaves_top_in_place() {
        let mut stack = Stack::new(3).unwrap();
        stack.push("first".to_string());
        assert_eq!(stack.peek().map(String::as_str), Ok("first"));
        assert_eq!(stack.size(), 1);
    }

    #[test]
    fn doubles_when_full() {
        let mut stack = Stack::new(2).unwrap();
        stack.push(1);
        stack.push(2);
        assert!(stack.is_full());
        stack.push(3);
        assert!(!stack.is_full());
        assert_eq!(stack.capacity(), 4);
        assert_eq!(stack.size(), 3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut stack = Stack::new(5).unwrap();
        stack.push(100);
        stack.push(200);
        stack.push(300);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), 5);
        stack.push(400);
        assert_eq!(stack.size(), 1);
        assert_eq!(stack.pop(), Ok(400));
    }

    #[test]
    fn underflow() {
        let mut stack = Stack::<i32>::new(2).unwrap();
        assert_eq!(stack.pop(), Err(StackError::Underflow { op: "pop" }));
        assert_eq!(stack.peek(), Err(StackError::Underflow { op: "peek" }));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = Stack::new(3).unwrap();
        original.push(1);
        original.push(2);

        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.pop().unwrap();
        copy.push(7);
        copy.push(8);
        copy.push(9);

        assert_eq!(original.size(), 2);
        assert_eq!(original.capacity(), 3);
        assert_eq!(original.iter().copied().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [1, 7, 8, 9]);
    }

    #[test]
    fn clone_from_replaces_contents() {
        let mut source = Stack::new(2).unwrap();
        source.push(1.5);
        let mut target = Stack::new(8).unwrap();
        target.push(9.0);
        target.push(8.0);

        target.clone_from(&source);
        assert_eq!(target.capacity(), 2);
        assert_eq!(target.pop(), Ok(1.5));
        assert_eq!(source.size(), 1);
    }

    #[test]
    fn display() {
        let mut stack = Stack::new(2).unwrap();
        assert_eq!(stack.to_string(), "Stack (size: 0, capacity: 2): empty");
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.to_string(), "Stack (size: 3, capacity: 4): 1 2 3");
    }
}
