use crate::arena::Handle;

/// A link to a child or parent. `None` is the shared leaf sentinel: it is always black, carries
/// no key and is never written to.
pub type Link = Option<Handle>;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// The side of a node that a child hangs off of.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A struct representing an internal node of a red black tree.
pub struct Node<T> {
    pub key: T,
    pub color: Color,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<T> Node<T> {
    pub fn new(key: T, parent: Link) -> Self {
        Node {
            key,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub fn child(&self, direction: Direction) -> Link {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, direction: Direction) -> &mut Link {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}
