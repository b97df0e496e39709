//! Ordered collections backed by a red black tree whose nodes live in a typed arena.
//!
//! # Examples
//!
//! ```
//! use rb_collections::red_black_tree::RedBlackTree;
//!
//! let mut tree: RedBlackTree<i32> = vec![5, 50, -1, -5, 234].into_iter().collect();
//! assert_eq!(tree.min(), Some(&-5));
//! assert!(tree.remove(&50));
//! assert!(tree.is_valid());
//! ```

pub mod arena;
pub mod comparator;
pub mod red_black_tree;
