//! Borrowing and owning iterators in key order.

use core::iter::FusedIterator;

use rand_core::RngCore;

use crate::compare::Comparator;
use crate::map::RankMap;
use crate::node::Node;
use crate::storage::Storage;
use crate::Index;

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    /// Returns an iterator over key-value pairs in order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V, Idx, MAX_LEVEL> {
        Iter {
            storage: &self.storage,
            front: self.head[0].forward,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Returns an iterator over keys in order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V, Idx, MAX_LEVEL> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in key order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V, Idx, MAX_LEVEL> {
        Values { inner: self.iter() }
    }
}

// ============================================================================
// Iter
// ============================================================================

/// An iterator over key-value pairs in order.
///
/// Walks level 0 from the front and the backward links from the back.
pub struct Iter<'a, K, V, Idx: Index, const MAX_LEVEL: usize> {
    storage: &'a Storage<Node<K, V, Idx, MAX_LEVEL>, Idx>,
    front: Idx,
    back: Idx,
    remaining: usize,
}

impl<'a, K, V, Idx: Index, const MAX_LEVEL: usize> Iterator for Iter<'a, K, V, Idx, MAX_LEVEL> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.storage.get(self.front).expect("invalid index");
        self.front = node.next();
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> DoubleEndedIterator
    for Iter<'_, K, V, Idx, MAX_LEVEL>
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.storage.get(self.back).expect("invalid index");
        self.back = node.backward;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> ExactSizeIterator for Iter<'_, K, V, Idx, MAX_LEVEL> {}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> FusedIterator for Iter<'_, K, V, Idx, MAX_LEVEL> {}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> Clone for Iter<'_, K, V, Idx, MAX_LEVEL> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

// ============================================================================
// Keys / Values
// ============================================================================

/// An iterator over keys in order.
pub struct Keys<'a, K, V, Idx: Index, const MAX_LEVEL: usize> {
    inner: Iter<'a, K, V, Idx, MAX_LEVEL>,
}

impl<'a, K, V, Idx: Index, const MAX_LEVEL: usize> Iterator for Keys<'a, K, V, Idx, MAX_LEVEL> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> DoubleEndedIterator
    for Keys<'_, K, V, Idx, MAX_LEVEL>
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> ExactSizeIterator for Keys<'_, K, V, Idx, MAX_LEVEL> {}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> FusedIterator for Keys<'_, K, V, Idx, MAX_LEVEL> {}

/// An iterator over values in key order.
pub struct Values<'a, K, V, Idx: Index, const MAX_LEVEL: usize> {
    inner: Iter<'a, K, V, Idx, MAX_LEVEL>,
}

impl<'a, K, V, Idx: Index, const MAX_LEVEL: usize> Iterator for Values<'a, K, V, Idx, MAX_LEVEL> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> DoubleEndedIterator
    for Values<'_, K, V, Idx, MAX_LEVEL>
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> ExactSizeIterator
    for Values<'_, K, V, Idx, MAX_LEVEL>
{
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> FusedIterator for Values<'_, K, V, Idx, MAX_LEVEL> {}

// ============================================================================
// IntoIter
// ============================================================================

/// An owning iterator that drains the map in order.
pub struct IntoIter<K, V, R, C, Idx: Index, const MAX_LEVEL: usize> {
    map: RankMap<K, V, R, C, Idx, MAX_LEVEL>,
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> Iterator for IntoIter<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.map.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> DoubleEndedIterator
    for IntoIter<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map.pop_last()
    }
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> ExactSizeIterator
    for IntoIter<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> FusedIterator for IntoIter<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> IntoIterator for RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, R, C, Idx, MAX_LEVEL>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { map: self }
    }
}

impl<'a, K, V, R, C, Idx, const MAX_LEVEL: usize> IntoIterator
    for &'a RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Idx, MAX_LEVEL>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::RankMap;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn make_map(keys: &[u64]) -> RankMap<u64, String, SmallRng> {
        let mut map = RankMap::new(SmallRng::seed_from_u64(12345));
        for &k in keys {
            map.insert(k, format!("v{}", k));
        }
        map
    }

    #[test]
    fn iter_in_order() {
        let map = make_map(&[30, 10, 20]);
        let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(pairs, vec![(10, "v10"), (20, "v20"), (30, "v30")]);
    }

    #[test]
    fn iter_reverse() {
        let map = make_map(&[30, 10, 20, 40]);
        let keys: Vec<_> = map.keys().rev().copied().collect();
        assert_eq!(keys, vec![40, 30, 20, 10]);
    }

    #[test]
    fn iter_meets_in_middle() {
        let map = make_map(&[1, 2, 3, 4, 5]);
        let mut iter = map.keys();

        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_empty() {
        let map = make_map(&[]);
        assert_eq!(map.iter().next(), None);
        assert_eq!(map.iter().next_back(), None);
        assert_eq!(map.values().len(), 0);
    }

    #[test]
    fn values_in_key_order() {
        let map = make_map(&[2, 1]);
        let values: Vec<_> = map.values().cloned().collect();
        assert_eq!(values, vec!["v1".to_string(), "v2".to_string()]);
    }

    #[test]
    fn borrowed_into_iter() {
        let map = make_map(&[2, 1, 3]);
        let mut sum = 0;
        for (k, _) in &map {
            sum += k;
        }
        assert_eq!(sum, 6);
    }

    #[test]
    fn owned_into_iter_both_ends() {
        let map = make_map(&[4, 2, 3, 1]);
        let mut iter = map.into_iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some((1, "v1".into())));
        assert_eq!(iter.next_back(), Some((4, "v4".into())));
        let rest: Vec<_> = iter.map(|(k, _)| k).collect();
        assert_eq!(rest, vec![2, 3]);
    }
}
