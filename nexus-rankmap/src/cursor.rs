//! Cursor for traversal with in-place removal.

use rand_core::RngCore;

use crate::compare::Comparator;
use crate::map::{Position, RankMap};
use crate::Index;

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    /// Returns a cursor at the first element.
    #[inline]
    pub fn cursor_front(&mut self) -> Cursor<'_, K, V, R, C, Idx, MAX_LEVEL> {
        let current = self.head[0].forward;
        Cursor {
            map: self,
            current,
            prev_at_level: Some([Idx::NONE; MAX_LEVEL]),
        }
    }

    /// Returns a cursor at the last element.
    #[inline]
    pub fn cursor_back(&mut self) -> Cursor<'_, K, V, R, C, Idx, MAX_LEVEL> {
        let current = self.tail;
        Cursor {
            map: self,
            current,
            prev_at_level: None,
        }
    }

    /// Returns a cursor at `key`, or at the first element greater than `key`.
    pub fn cursor_at(&mut self, key: &K) -> Cursor<'_, K, V, R, C, Idx, MAX_LEVEL> {
        let (path, _) = self.search(key);
        let current = self.level_at(path.update[0], 0).forward;
        Cursor {
            map: self,
            current,
            prev_at_level: Some(path.update),
        }
    }

    /// Returns a cursor at `pos`. End and stale positions give an exhausted
    /// cursor.
    pub fn cursor_at_position(&mut self, pos: Position<Idx>) -> Cursor<'_, K, V, R, C, Idx, MAX_LEVEL> {
        let current = self.resolve(pos).unwrap_or(Idx::NONE);
        Cursor {
            map: self,
            current,
            prev_at_level: None,
        }
    }
}

/// A cursor over a [`RankMap`] that can remove the element it points at.
///
/// Moving forward tracks the predecessor at every level, so removing the
/// current element after a forward walk splices it out without a search.
/// After moving backward the predecessors are recomputed on the next removal.
///
/// # Example
///
/// ```rust
/// use nexus_rankmap::RankMap;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut map: RankMap<u64, (), SmallRng> = RankMap::new(SmallRng::seed_from_u64(1));
/// map.extend((1..=6).map(|k| (k, ())));
///
/// let mut cursor = map.cursor_front();
/// while let Some((k, _)) = cursor.current() {
///     if k % 2 == 0 {
///         cursor.remove_current(); // advances automatically
///     } else {
///         cursor.move_next();
///     }
/// }
///
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
/// ```
pub struct Cursor<'a, K, V, R, C, Idx: Index, const MAX_LEVEL: usize> {
    map: &'a mut RankMap<K, V, R, C, Idx, MAX_LEVEL>,
    current: Idx,
    /// Predecessors of `current` at each level, when known.
    prev_at_level: Option<[Idx; MAX_LEVEL]>,
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> Cursor<'_, K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    /// Returns the current key-value pair, or `None` once past the end.
    #[inline]
    pub fn current(&self) -> Option<(&K, &V)> {
        if self.current.is_none() {
            return None;
        }
        Some(self.map.pair(self.current))
    }

    /// Returns the position of the current element, or `end()`.
    #[inline]
    pub fn position(&self) -> Position<Idx> {
        self.map.position_of(self.current)
    }

    /// Returns `true` once the cursor is past the end.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the next key-value pair without moving.
    pub fn peek_next(&self) -> Option<(&K, &V)> {
        if self.current.is_none() {
            return None;
        }
        let next = self.map.node(self.current).next();
        if next.is_none() {
            return None;
        }
        Some(self.map.pair(next))
    }

    /// Returns the previous key-value pair without moving. At the end this is
    /// the last element.
    pub fn peek_prev(&self) -> Option<(&K, &V)> {
        let prev = if self.current.is_none() {
            self.map.tail
        } else {
            self.map.node(self.current).backward
        };
        if prev.is_none() {
            return None;
        }
        Some(self.map.pair(prev))
    }

    /// Advances to the next element. Does nothing at the end.
    pub fn move_next(&mut self) {
        if self.current.is_none() {
            return;
        }

        let node = self.map.node(self.current);
        if let Some(prev) = &mut self.prev_at_level {
            // Levels above the current node keep their predecessor.
            for slot in prev.iter_mut().take(node.height()) {
                *slot = self.current;
            }
        }
        self.current = node.next();
    }

    /// Steps back to the previous element. At the end this moves to the last
    /// element; at the first element it moves to the end.
    pub fn move_prev(&mut self) {
        self.current = if self.current.is_none() {
            self.map.tail
        } else {
            self.map.node(self.current).backward
        };
        self.prev_at_level = None;
    }

    /// Removes the current element and advances to the next one.
    ///
    /// Returns the removed pair, or `None` at the end.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        if self.current.is_none() {
            return None;
        }

        let idx = self.current;
        let update = match self.prev_at_level {
            Some(update) => update,
            None => {
                let (path, _) = self.map.search(&self.map.node(idx).key);
                path.update
            }
        };

        self.current = self.map.node(idx).next();
        // The removed node's predecessors are also its successor's.
        self.prev_at_level = Some(update);
        Some(self.map.unlink(&update, idx))
    }
}
