//! Total orders over keys.
//!
//! The map never calls `Ord` directly; it asks a [`Comparator`]. This lets the
//! same structure serve ascending, descending, or projected orderings without
//! wrapping keys.
//!
//! ```
//! use core::cmp::Ordering;
//! use nexus_rankmap::{Comparator, Natural, Reverse};
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reverse.compare(&1, &2), Ordering::Greater);
//!
//! let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
//! assert_eq!(by_len.compare(&"abc", &"de"), Ordering::Greater);
//! ```

use core::cmp::Ordering;

/// A total order over `K`.
///
/// Implementations must be consistent: antisymmetric, transitive, and stable
/// for the lifetime of the map. Keys that compare `Equal` are duplicates.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Ascending order by `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Descending order by `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
