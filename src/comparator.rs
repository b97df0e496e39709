//! Total orders supplied to ordered collections at construction time.

use std::cmp::Ordering;

/// A total order over values of type `T`.
///
/// Implementations must be consistent and transitive. Two values are considered equal when
/// `compare` returns `Ordering::Equal`; collections never consult `PartialEq`. A comparator that
/// breaks these rules will not cause memory unsafety, but lookups and removals will return
/// unspecified results.
///
/// Any `Fn(&T, &T) -> Ordering` is a comparator.
///
/// # Examples
///
/// ```
/// use rb_collections::comparator::{Comparator, NaturalOrder};
/// use std::cmp::Ordering;
///
/// let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
/// assert_eq!(by_len.compare(&"ab", &"c"), Ordering::Greater);
/// assert_eq!(NaturalOrder.compare(&"ab", &"c"), Ordering::Less);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The order given by `T`'s `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
