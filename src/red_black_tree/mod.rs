//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.

mod node;
mod raw;
mod tree;
mod validate;

pub use self::tree::{RedBlackTree, DEFAULT_CHUNK_SIZE};
pub use self::validate::{Error, Result};
