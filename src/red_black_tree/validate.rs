use crate::arena::Handle;
use crate::comparator::Comparator;
use crate::red_black_tree::raw::RawTree;
use log::debug;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::error;
use std::fmt;
use std::result;

/// Convenience `Error` enum describing which red black invariant a tree violates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A left child compares greater than its parent, or a right child compares less.
    UnorderedChildren,
    /// The root node is red.
    RedRoot,
    /// A red node has a red child.
    RedViolation,
    /// Two paths from the same node down to the leaves pass through different numbers of black
    /// nodes.
    BlackHeightMismatch {
        /// Black height of the left subtree.
        expected: usize,
        /// Black height of the right subtree.
        found: usize,
    },
    /// A child does not point back at its parent, or the root has a parent.
    BrokenParentLink,
    /// The number of reachable nodes disagrees with the recorded length.
    SizeMismatch {
        /// Recorded length.
        expected: usize,
        /// Number of nodes reachable from the root.
        found: usize,
    },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnorderedChildren => write!(f, "child key is on the wrong side of its parent"),
            Error::RedRoot => write!(f, "root node is red"),
            Error::RedViolation => write!(f, "red node has a red child"),
            Error::BlackHeightMismatch { expected, found } => write!(
                f,
                "descendant paths have different numbers of black nodes ({} and {})",
                expected, found,
            ),
            Error::BrokenParentLink => write!(f, "parent link does not match child link"),
            Error::SizeMismatch { expected, found } => write!(
                f,
                "tree records {} elements but {} are reachable",
                expected, found,
            ),
        }
    }
}

/// Convenience `Result` type for validation.
pub type Result<T> = result::Result<T, Error>;

fn fail(error: Error) -> Result<()> {
    debug!("Tree invalid: {}.", error);
    Err(error)
}

/// Walks every node of `tree` and checks the red black invariants along with the parent links
/// and the recorded length.
///
/// Black heights are computed bottom-up: each node is visited twice, once on the way down to
/// check its local invariants and once after both children have been resolved, at which point
/// its black height is memoized.
pub fn validate<T, C>(tree: &RawTree<T>, comparator: &C, len: usize) -> Result<()>
where
    C: Comparator<T>,
{
    let root = match tree.root {
        None => {
            return if len == 0 {
                Ok(())
            } else {
                fail(Error::SizeMismatch {
                    expected: len,
                    found: 0,
                })
            };
        },
        Some(root) => root,
    };

    if tree.nodes[root].is_red() {
        return fail(Error::RedRoot);
    }
    if tree.nodes[root].parent.is_some() {
        return fail(Error::BrokenParentLink);
    }

    let mut black_heights: HashMap<Handle, usize> = HashMap::new();
    let mut stack = vec![(root, false)];
    let mut count = 0;

    while let Some((handle, resolved)) = stack.pop() {
        let node = &tree.nodes[handle];

        if resolved {
            let height_of = |link: Option<Handle>| {
                link.map_or(0, |child| black_heights.get(&child).cloned().unwrap_or(0))
            };
            let left_height = height_of(node.left);
            let right_height = height_of(node.right);
            if left_height != right_height {
                return fail(Error::BlackHeightMismatch {
                    expected: left_height,
                    found: right_height,
                });
            }
            let height = left_height + if node.is_red() { 0 } else { 1 };
            black_heights.insert(handle, height);
            continue;
        }

        count += 1;
        stack.push((handle, true));

        if let Some(left) = node.left {
            let child = &tree.nodes[left];
            if comparator.compare(&child.key, &node.key) == Ordering::Greater {
                return fail(Error::UnorderedChildren);
            }
            if child.parent != Some(handle) {
                return fail(Error::BrokenParentLink);
            }
            if node.is_red() && child.is_red() {
                return fail(Error::RedViolation);
            }
            stack.push((left, false));
        }

        if let Some(right) = node.right {
            let child = &tree.nodes[right];
            if comparator.compare(&child.key, &node.key) == Ordering::Less {
                return fail(Error::UnorderedChildren);
            }
            if child.parent != Some(handle) {
                return fail(Error::BrokenParentLink);
            }
            if node.is_red() && child.is_red() {
                return fail(Error::RedViolation);
            }
            stack.push((right, false));
        }
    }

    if count != len {
        return fail(Error::SizeMismatch {
            expected: len,
            found: count,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate, Error};
    use crate::comparator::NaturalOrder;
    use crate::red_black_tree::node::Color;
    use crate::red_black_tree::raw::RawTree;

    fn build(keys: &[i32]) -> RawTree<i32> {
        let mut tree = RawTree::new(16);
        for key in keys {
            tree.insert(*key, &NaturalOrder);
        }
        tree
    }

    fn handle_of(tree: &RawTree<i32>, key: i32) -> crate::arena::Handle {
        tree.search(&key, &NaturalOrder).expect("Expected key in tree.")
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let tree: RawTree<i32> = RawTree::new(16);
        assert_eq!(validate(&tree, &NaturalOrder, 0), Ok(()));
    }

    #[test]
    fn test_balanced_tree_is_valid() {
        let tree = build(&[5, 50, -1, -5, 234, 17, 47, 48, 49, 15, 0]);
        assert_eq!(validate(&tree, &NaturalOrder, 11), Ok(()));
    }

    #[test]
    fn test_red_root() {
        let mut tree = build(&[1]);
        let root = handle_of(&tree, 1);
        tree.nodes[root].color = Color::Red;
        assert_eq!(validate(&tree, &NaturalOrder, 1), Err(Error::RedRoot));
    }

    #[test]
    fn test_red_violation() {
        // 4 is a red right child of 3
        let mut tree = build(&[2, 1, 3, 4]);
        let three = handle_of(&tree, 3);
        tree.nodes[three].color = Color::Red;
        assert_eq!(validate(&tree, &NaturalOrder, 4), Err(Error::RedViolation));
    }

    #[test]
    fn test_black_height_mismatch() {
        let mut tree = build(&[2, 1, 3]);
        let one = handle_of(&tree, 1);
        tree.nodes[one].color = Color::Black;
        assert_eq!(
            validate(&tree, &NaturalOrder, 3),
            Err(Error::BlackHeightMismatch {
                expected: 1,
                found: 0,
            }),
        );
    }

    #[test]
    fn test_unordered_children() {
        let mut tree = build(&[2, 1, 3]);
        let one = handle_of(&tree, 1);
        tree.nodes[one].key = 10;
        assert_eq!(
            validate(&tree, &NaturalOrder, 3),
            Err(Error::UnorderedChildren),
        );
    }

    #[test]
    fn test_broken_parent_link() {
        let mut tree = build(&[2, 1, 3]);
        let one = handle_of(&tree, 1);
        let three = handle_of(&tree, 3);
        tree.nodes[one].parent = Some(three);
        assert_eq!(
            validate(&tree, &NaturalOrder, 3),
            Err(Error::BrokenParentLink),
        );
    }

    #[test]
    fn test_size_mismatch() {
        let tree = build(&[2, 1, 3]);
        assert_eq!(
            validate(&tree, &NaturalOrder, 4),
            Err(Error::SizeMismatch {
                expected: 4,
                found: 3,
            }),
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::RedRoot.to_string(), "root node is red");
        assert_eq!(
            Error::BlackHeightMismatch {
                expected: 2,
                found: 1,
            }
            .to_string(),
            "descendant paths have different numbers of black nodes (2 and 1)",
        );
    }
}
