use crate::arena::{Handle, TypedArena};
use crate::comparator::Comparator;
use crate::red_black_tree::node::{Color, Direction, Link, Node};
use log::trace;
use std::cmp::Ordering;

/// The node arena and root link of a red black tree, along with the structural operations that
/// keep it balanced. Ordering is supplied per call so that this type carries no comparator.
pub struct RawTree<T> {
    pub nodes: TypedArena<Node<T>>,
    pub root: Link,
}

impl<T> RawTree<T> {
    pub fn new(chunk_size: usize) -> Self {
        RawTree {
            nodes: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub fn is_red(&self, link: Link) -> bool {
        match link {
            None => false,
            Some(handle) => self.nodes[handle].is_red(),
        }
    }

    fn set_black(&mut self, link: Link) {
        if let Some(handle) = link {
            self.nodes[handle].color = Color::Black;
        }
    }

    fn set_child(&mut self, handle: Handle, direction: Direction, child: Link) {
        *self.nodes[handle].child_mut(direction) = child;
    }

    fn set_parent(&mut self, link: Link, parent: Link) {
        if let Some(handle) = link {
            self.nodes[handle].parent = parent;
        }
    }

    // Which side of `parent` holds `child`. `child` may be the sentinel as long as the other
    // side of `parent` is not.
    fn side_of(&self, parent: Handle, child: Link) -> Direction {
        if self.nodes[parent].left == child {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    // Points whatever referred to `old` (its parent's child link, or the root) at `new`.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, Some(old));
                self.set_child(parent, side, new);
            },
        }
    }

    /// Rotates the subtree rooted at `handle` toward `direction`, lifting the child on the
    /// opposite side into its place. `Direction::Left` is a left rotation: the right child rises.
    pub fn rotate(&mut self, handle: Handle, direction: Direction) {
        let child = self.nodes[handle]
            .child(direction.opposite())
            .expect("Expected rotated node to have a child to lift.");
        trace!("rotating {:?} {:?}", handle, direction);

        let inner = self.nodes[child].child(direction);
        self.set_child(handle, direction.opposite(), inner);
        self.set_parent(inner, Some(handle));

        let parent = self.nodes[handle].parent;
        self.nodes[child].parent = parent;
        self.replace_child(parent, handle, Some(child));

        self.set_child(child, direction, Some(handle));
        self.nodes[handle].parent = Some(child);
    }

    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes[handle].left {
            handle = left;
        }
        handle
    }

    pub fn search<C>(&self, key: &T, comparator: &C) -> Link
    where
        C: Comparator<T>,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            curr = match comparator.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Number of black nodes on the path from the root down its left spine, excluding the
    /// sentinel.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut curr = self.root;
        while let Some(handle) = curr {
            if !self.nodes[handle].is_red() {
                height += 1;
            }
            curr = self.nodes[handle].left;
        }
        height
    }

    /// Inserts `key` as a red leaf and rebalances. Keys equal to an existing key are placed in
    /// its right subtree.
    pub fn insert<C>(&mut self, key: T, comparator: &C) -> Handle
    where
        C: Comparator<T>,
    {
        let mut parent = None;
        let mut direction = Direction::Left;
        let mut curr = self.root;
        while let Some(handle) = curr {
            parent = Some(handle);
            let node = &self.nodes[handle];
            direction = match comparator.compare(&key, &node.key) {
                Ordering::Less => Direction::Left,
                _ => Direction::Right,
            };
            curr = node.child(direction);
        }

        let handle = self.nodes.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.set_child(parent, direction, Some(handle)),
        }

        self.insert_fixup(handle);
        handle
    }

    fn insert_fixup(&mut self, mut handle: Handle) {
        loop {
            let parent = match self.nodes[handle].parent {
                Some(parent) if self.nodes[parent].is_red() => parent,
                _ => break,
            };
            // a red node is never the root
            let grandparent = self.nodes[parent]
                .parent
                .expect("Expected red node to have a parent.");
            let side = self.side_of(grandparent, Some(parent));
            let uncle = self.nodes[grandparent].child(side.opposite());

            if self.is_red(uncle) {
                trace!("insert fixup: red uncle at {:?}", grandparent);
                self.nodes[parent].color = Color::Black;
                self.set_black(uncle);
                self.nodes[grandparent].color = Color::Red;
                handle = grandparent;
                continue;
            }

            if self.nodes[parent].child(side.opposite()) == Some(handle) {
                trace!("insert fixup: inner child {:?}", handle);
                handle = parent;
                self.rotate(handle, side);
            }

            trace!("insert fixup: outer child {:?}", handle);
            let parent = self.nodes[handle]
                .parent
                .expect("Expected rotated node to have a parent.");
            self.nodes[parent].color = Color::Black;
            self.nodes[grandparent].color = Color::Red;
            self.rotate(grandparent, side.opposite());
        }

        self.set_black(self.root);
    }

    // Replaces the subtree rooted at `old` with the subtree rooted at `new`.
    fn transplant(&mut self, old: Handle, new: Link) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, new);
        self.set_parent(new, parent);
    }

    /// Unlinks the node behind `handle`, rebalances and returns its key. The node's slot is
    /// released back to the arena.
    pub fn remove(&mut self, handle: Handle) -> T {
        let (left, right) = {
            let node = &self.nodes[handle];
            (node.left, node.right)
        };

        // `promoted` takes the place of the node spliced out of its original position and is
        // tracked alongside its parent, since it may be the sentinel.
        let (removed_color, promoted, promoted_parent) = match (left, right) {
            (None, _) => {
                let parent = self.nodes[handle].parent;
                self.transplant(handle, right);
                (self.nodes[handle].color, right, parent)
            },
            (_, None) => {
                let parent = self.nodes[handle].parent;
                self.transplant(handle, left);
                (self.nodes[handle].color, left, parent)
            },
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                let successor_color = self.nodes[successor].color;
                let promoted = self.nodes[successor].right;

                let promoted_parent = if successor == right {
                    Some(successor)
                } else {
                    let parent = self.nodes[successor].parent;
                    self.transplant(successor, promoted);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                    parent
                };

                self.transplant(handle, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = self.nodes[handle].color;

                (successor_color, promoted, promoted_parent)
            },
        };

        if removed_color == Color::Black {
            self.remove_fixup(promoted, promoted_parent);
        }

        self.nodes.free(&handle).key
    }

    fn remove_fixup(&mut self, mut curr: Link, mut parent: Link) {
        while curr != self.root && !self.is_red(curr) {
            let parent_handle = match parent {
                Some(parent_handle) => parent_handle,
                None => break,
            };
            let side = self.side_of(parent_handle, curr);
            let mut sibling = self.nodes[parent_handle]
                .child(side.opposite())
                .expect("Expected doubly black node to have a sibling.");

            if self.nodes[sibling].is_red() {
                trace!("remove fixup: red sibling {:?}", sibling);
                self.nodes[sibling].color = Color::Black;
                self.nodes[parent_handle].color = Color::Red;
                self.rotate(parent_handle, side);
                sibling = self.nodes[parent_handle]
                    .child(side.opposite())
                    .expect("Expected doubly black node to have a sibling.");
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                trace!("remove fixup: black nephews under {:?}", sibling);
                self.nodes[sibling].color = Color::Red;
                curr = parent;
                parent = self.nodes[parent_handle].parent;
                continue;
            }

            if !self.is_red(far) {
                trace!("remove fixup: red near nephew under {:?}", sibling);
                self.set_black(near);
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = self.nodes[parent_handle]
                    .child(side.opposite())
                    .expect("Expected doubly black node to have a sibling.");
            }

            trace!("remove fixup: red far nephew under {:?}", sibling);
            self.nodes[sibling].color = self.nodes[parent_handle].color;
            self.nodes[parent_handle].color = Color::Black;
            let far = self.nodes[sibling].child(side.opposite());
            self.set_black(far);
            self.rotate(parent_handle, side);
            curr = self.root;
            parent = None;
        }

        self.set_black(curr);
    }
}
