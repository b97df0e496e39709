use crate::comparator::{Comparator, NaturalOrder};
use crate::red_black_tree::raw::RawTree;
use crate::red_black_tree::validate::{self, Result};
use std::fmt;
use std::iter::FromIterator;

/// Number of nodes allocated per arena chunk unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// An ordered collection of keys implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black
/// and maintains that the root is black, that no red node has a red child, and that every path
/// from a node down to its leaves passes through the same number of black nodes. Together these
/// keep the longest root-to-leaf path at most twice the shortest, so insertion, removal,
/// membership tests and minimum extraction all run in `O(log n)`.
///
/// Keys are ordered by a `Comparator` fixed at construction time; two keys are equal when the
/// comparator says so. Equal keys are not collapsed: adding a key that is already present stores
/// a second copy, and which copy a later lookup or removal finds is unspecified.
///
/// Nodes live in a `TypedArena` and refer to each other by handle, so removals release a node's
/// slot immediately and later insertions reuse it.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.add(8);
/// tree.add(1);
/// tree.add(43);
///
/// assert!(tree.contains(&43));
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.min(), Some(&1));
///
/// assert_eq!(tree.extract_min(), Some(1));
/// assert!(tree.remove(&8));
/// assert!(!tree.remove(&8));
/// assert!(tree.is_valid());
/// ```
pub struct RedBlackTree<T, C = NaturalOrder> {
    tree: RawTree<T>,
    comparator: C,
    len: usize,
}

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackTree<T>` ordered by `T`'s `Ord` implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> RedBlackTree<T, C>
where
    C: Comparator<T>,
{
    /// Constructs a new, empty `RedBlackTree<T, C>` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// tree.add(1);
    /// tree.add(5);
    /// assert_eq!(tree.min(), Some(&5));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_chunk_size(comparator, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackTree<T, C>` ordered by `comparator` whose node arena
    /// grows `chunk_size` nodes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::comparator::NaturalOrder;
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::with_comparator_and_chunk_size(NaturalOrder, 64);
    /// assert!(tree.is_empty());
    /// ```
    pub fn with_comparator_and_chunk_size(comparator: C, chunk_size: usize) -> Self {
        RedBlackTree {
            tree: RawTree::new(chunk_size),
            comparator,
            len: 0,
        }
    }

    /// Adds a key to the tree. A key equal to one already present is stored alongside it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.add(1);
    /// tree.add(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn add(&mut self, key: T) {
        self.tree.insert(key, &self.comparator);
        self.len += 1;
    }

    /// Removes a key from the tree. Returns `true` if a key equal to `key` was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.add(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool {
        match self.tree.search(key, &self.comparator) {
            Some(handle) => {
                self.tree.remove(handle);
                self.len -= 1;
                true
            },
            None => false,
        }
    }

    /// Checks if a key equal to `key` exists in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.add(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.tree.search(key, &self.comparator).is_some()
    }

    /// Returns the minimum key of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.min(), None);
    /// tree.add(3);
    /// tree.add(1);
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree
            .root
            .map(|root| &self.tree.nodes[self.tree.minimum(root)].key)
    }

    /// Removes and returns the minimum key of the tree. Returns `None` and leaves the tree
    /// untouched if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.add(3);
    /// tree.add(1);
    /// assert_eq!(tree.extract_min(), Some(1));
    /// assert_eq!(tree.extract_min(), Some(3));
    /// assert_eq!(tree.extract_min(), None);
    /// ```
    pub fn extract_min(&mut self) -> Option<T> {
        let root = self.tree.root?;
        let handle = self.tree.minimum(root);
        self.len -= 1;
        Some(self.tree.remove(handle))
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.add(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the tree, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.add(1);
    /// tree.add(2);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the number of black nodes on every path from the root to a leaf, not counting the
    /// leaves themselves. An empty tree has a black height of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.black_height(), 0);
    /// for key in 0..3 {
    ///     tree.add(key);
    /// }
    /// assert_eq!(tree.black_height(), 1);
    /// ```
    pub fn black_height(&self) -> usize {
        self.tree.black_height()
    }

    /// Checks every red black invariant of the tree and reports the first violation found.
    ///
    /// This walks the whole tree and is meant for tests and debugging, not for use alongside
    /// every mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in &[5, 50, -1, -5, 234, 17, 47, 48, 49, 15, 0] {
    ///     tree.add(*key);
    /// }
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<()> {
        validate::validate(&self.tree, &self.comparator, self.len)
    }

    /// Returns `true` if the tree satisfies every red black invariant.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<T, C> Extend<T> for RedBlackTree<T, C>
where
    C: Comparator<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.add(key);
        }
    }
}

impl<T> FromIterator<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Default for RedBlackTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for RedBlackTree<T, C>
where
    C: Comparator<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedBlackTree")
            .field("len", &self.len)
            .field("black_height", &self.black_height())
            .finish()
    }
}
