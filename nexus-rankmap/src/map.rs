//! Rank map - an ordered map over a span-augmented skip list.
//!
//! Every forward edge records how many level-0 positions it skips. Summing
//! spans along a search path gives the position of where the search stopped,
//! so rank queries cost the same O(log n) expected time as lookups.
//!
//! # Example
//!
//! ```rust
//! use nexus_rankmap::RankMap;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut map: RankMap<u64, &str, SmallRng> = RankMap::new(SmallRng::seed_from_u64(7));
//!
//! assert!(map.insert(30, "c"));
//! assert!(map.insert(10, "a"));
//! assert!(map.insert(20, "b"));
//! assert!(!map.insert(20, "dup")); // no upsert
//!
//! assert_eq!(map.rank(&20), Some(1));
//! assert_eq!(map.get_by_rank(2), Some((&30, &"c")));
//! assert_eq!(map.get(&20), Some(&"b"));
//! ```

use core::cmp::Ordering;
use core::fmt;

use rand_core::{RngCore, SeedableRng};
use tracing::{debug, trace};

use crate::compare::{Comparator, Natural};
use crate::config::RankMapConfig;
use crate::error::{ConfigError, PositionError};
use crate::level::LevelGenerator;
use crate::node::{Level, Node};
use crate::storage::Storage;
use crate::Index;

// ============================================================================
// Position
// ============================================================================

/// A handle naming one element of a map, or its end.
///
/// Positions are plain values: holding one does not borrow the map. Each
/// carries the stamp of the insert that created its node, so a position whose
/// node has since been erased (even if the slot was reused) resolves to
/// nothing instead of to the wrong element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position<Idx = u32> {
    pub(crate) idx: Idx,
    pub(crate) stamp: u64,
}

impl<Idx: Index> Position<Idx> {
    /// The end (terminal) position. Compares equal to every map's `end()`.
    pub const END: Self = Self {
        idx: Idx::NONE,
        stamp: 0,
    };

    /// Returns `true` if this is the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.idx.is_none()
    }
}

/// Predecessors found by a search, with the position reached at each level.
pub(crate) struct SearchPath<Idx, const MAX_LEVEL: usize> {
    pub(crate) update: [Idx; MAX_LEVEL],
    pub(crate) rank: [usize; MAX_LEVEL],
}

impl<Idx: Index, const MAX_LEVEL: usize> SearchPath<Idx, MAX_LEVEL> {
    #[inline]
    fn from_header() -> Self {
        Self {
            update: [Idx::NONE; MAX_LEVEL],
            rank: [0; MAX_LEVEL],
        }
    }
}

// ============================================================================
// RankMap
// ============================================================================

/// An ordered map with O(log n) expected lookup, insert, erase, and rank.
///
/// Keys are unique under the comparator `C`. Values are fixed once inserted:
/// replacing one means erasing and inserting again.
///
/// # Type Parameters
///
/// - `K`: Key type
/// - `V`: Value type
/// - `R`: Random number generator used to draw node heights
/// - `C`: Total order over keys, defaults to [`Natural`]
/// - `Idx`: Arena index type, defaults to `u32`
/// - `MAX_LEVEL`: Header capacity in levels, defaults to 8
pub struct RankMap<K, V, R, C = Natural, Idx: Index = u32, const MAX_LEVEL: usize = 8> {
    /// Owns every node. Links are indices into it.
    pub(crate) storage: Storage<Node<K, V, Idx, MAX_LEVEL>, Idx>,
    /// The header sentinel's levels. Only `head[..height]` is meaningful.
    pub(crate) head: [Level<Idx>; MAX_LEVEL],
    /// Last node on level 0, `NONE` (the header) when empty.
    pub(crate) tail: Idx,
    /// Levels in use, at least 1.
    pub(crate) height: usize,
    pub(crate) len: usize,
    pub(crate) levels: LevelGenerator<R>,
    pub(crate) cmp: C,
}

impl<K, V, R, Idx, const MAX_LEVEL: usize> RankMap<K, V, R, Natural, Idx, MAX_LEVEL>
where
    K: Ord,
    R: RngCore,
    Idx: Index,
{
    /// Creates an empty map in ascending key order with default tuning.
    pub fn new(rng: R) -> Self {
        Self::with_comparator(Natural, rng)
    }

    /// Creates an empty map with room for `capacity` nodes.
    pub fn with_capacity(rng: R, capacity: usize) -> Self {
        let config = RankMapConfig {
            initial_capacity: capacity,
            ..Self::default_config()
        };
        Self::from_parts(&config, Natural, rng)
    }
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    /// Creates an empty map ordered by `cmp` with default tuning.
    pub fn with_comparator(cmp: C, rng: R) -> Self {
        Self::from_parts(&Self::default_config(), cmp, rng)
    }

    /// Creates an empty map from a validated configuration.
    pub fn try_with_config(config: RankMapConfig, cmp: C, rng: R) -> Result<Self, ConfigError> {
        config.validate(MAX_LEVEL)?;
        Ok(Self::from_parts(&config, cmp, rng))
    }

    /// Default tuning, with the height capped by the header capacity.
    fn default_config() -> RankMapConfig {
        let defaults = RankMapConfig::default();
        RankMapConfig {
            max_level: defaults.max_level.min(MAX_LEVEL),
            ..defaults
        }
    }

    fn from_parts(config: &RankMapConfig, cmp: C, rng: R) -> Self {
        let levels = LevelGenerator::new(rng, config.max_level, config.probability);
        Self::with_levels(levels, cmp, config.initial_capacity)
    }

    fn with_levels(levels: LevelGenerator<R>, cmp: C, capacity: usize) -> Self {
        assert!(
            (1..=u8::MAX as usize).contains(&MAX_LEVEL),
            "MAX_LEVEL must be within 1..=255"
        );
        Self {
            storage: Storage::with_capacity(capacity),
            head: [Level::EMPTY; MAX_LEVEL],
            tail: Idx::NONE,
            height: 1,
            len: 0,
            levels,
            cmp,
        }
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels currently in use (at least 1).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the tallest height a new node may be assigned.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.levels.max_level()
    }

    /// Returns the number of node slots allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the comparator ordering this map.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns `true` if the map contains `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Returns a reference to the value for `key`.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate(key).map(|(idx, _)| &self.node(idx).value)
    }

    /// Returns the stored key and value for `key`.
    #[inline]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.locate(key).map(|(idx, _)| self.pair(idx))
    }

    /// Returns the position of `key`, or [`end()`](Self::end) if absent.
    #[inline]
    pub fn find(&self, key: &K) -> Position<Idx> {
        match self.locate(key) {
            Some((idx, _)) => self.position_of(idx),
            None => Position::END,
        }
    }

    /// Returns the position of the first key not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Position<Idx> {
        let (path, _) = self.search(key);
        self.position_of(self.level_at(path.update[0], 0).forward)
    }

    /// Returns the zero-based rank of `key` in sorted order.
    #[inline]
    pub fn rank(&self, key: &K) -> Option<usize> {
        self.locate(key).map(|(_, position)| position - 1)
    }

    /// Returns the element at zero-based `rank`.
    #[inline]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let idx = self.index_at_rank(rank);
        if idx.is_none() {
            return None;
        }
        Some(self.pair(idx))
    }

    /// Returns the position of the element at zero-based `rank`, or `end()`.
    #[inline]
    pub fn position_by_rank(&self, rank: usize) -> Position<Idx> {
        self.position_of(self.index_at_rank(rank))
    }

    /// Returns the smallest key-value pair. O(1).
    #[inline]
    pub fn first(&self) -> Option<(&K, &V)> {
        let idx = self.head[0].forward;
        if idx.is_none() {
            return None;
        }
        Some(self.pair(idx))
    }

    /// Returns the largest key-value pair. O(1) via the tail link.
    #[inline]
    pub fn last(&self) -> Option<(&K, &V)> {
        if self.tail.is_none() {
            return None;
        }
        Some(self.pair(self.tail))
    }

    // ========================================================================
    // Positions
    // ========================================================================

    /// Returns the position of the first element, or `end()` if empty.
    #[inline]
    pub fn begin(&self) -> Position<Idx> {
        self.position_of(self.head[0].forward)
    }

    /// Returns the end position.
    #[inline]
    pub fn end(&self) -> Position<Idx> {
        Position::END
    }

    /// Returns the key-value pair at `pos`, or `None` for `end()` or a stale
    /// position.
    #[inline]
    pub fn get_at(&self, pos: Position<Idx>) -> Option<(&K, &V)> {
        self.resolve(pos).ok().map(|idx| self.pair(idx))
    }

    /// Steps forward along level 0. The last element steps to `end()`; `end()`
    /// and stale positions stay at `end()`.
    #[inline]
    pub fn next(&self, pos: Position<Idx>) -> Position<Idx> {
        match self.resolve(pos) {
            Ok(idx) => self.position_of(self.node(idx).next()),
            Err(_) => Position::END,
        }
    }

    /// Steps backward. `end()` steps to the last element; the first element
    /// steps to `end()`, as do stale positions.
    #[inline]
    pub fn prev(&self, pos: Position<Idx>) -> Position<Idx> {
        match self.resolve(pos) {
            Ok(idx) => self.position_of(self.node(idx).backward),
            Err(PositionError::End) => self.position_of(self.tail),
            Err(PositionError::Stale) => Position::END,
        }
    }

    /// Returns the zero-based rank of the element at `pos`.
    pub fn rank_at(&self, pos: Position<Idx>) -> Option<usize> {
        let idx = self.resolve(pos).ok()?;
        self.rank(&self.node(idx).key)
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Inserts `key` with `value`.
    ///
    /// Returns `false` and leaves the map untouched if an equal key is
    /// already present; the existing value is not replaced.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let (mut path, found) = self.search(&key);
        if found.is_some() {
            return false;
        }

        let height = self.levels.random_level();
        if height > self.height {
            // Nothing reaches these levels yet: the header spans the whole map.
            for i in self.height..height {
                path.update[i] = Idx::NONE;
                path.rank[i] = 0;
                self.head[i] = Level {
                    forward: Idx::NONE,
                    span: self.len,
                };
            }
            trace!(from = self.height, to = height, "raising map height");
            self.height = height;
        }

        let (idx, _) = self.storage.insert(Node::new(key, value, height));

        for i in 0..height {
            let gap = path.rank[0] - path.rank[i];
            let pred = *self.level_at(path.update[i], i);
            self.node_mut(idx).levels[i] = Level {
                forward: pred.forward,
                span: pred.span - gap,
            };
            *self.level_mut(path.update[i], i) = Level {
                forward: idx,
                span: gap + 1,
            };
        }

        // Taller chains now cover one more level-0 position.
        for i in height..self.height {
            self.level_mut(path.update[i], i).span += 1;
        }

        let next = self.node(idx).next();
        self.node_mut(idx).backward = path.update[0];
        if next.is_some() {
            self.node_mut(next).backward = idx;
        } else {
            self.tail = idx;
        }

        self.len += 1;
        true
    }

    // ========================================================================
    // Erase
    // ========================================================================

    /// Erases `key`. Returns `false` if it was not present.
    #[inline]
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` and returns its value.
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let (path, found) = self.search(key);
        if found.is_none() {
            return None;
        }
        Some(self.unlink(&path.update, found))
    }

    /// Erases the element at `pos`.
    ///
    /// Returns `false` for `end()` and for positions whose element is gone.
    pub fn erase_at(&mut self, pos: Position<Idx>) -> bool {
        match self.try_erase_at(pos) {
            Ok(_) => true,
            Err(PositionError::End) => false,
            Err(PositionError::Stale) => {
                debug!(?pos, "ignoring erase of stale position");
                false
            }
        }
    }

    /// Removes the element at `pos`, reporting why if it cannot.
    pub fn try_erase_at(&mut self, pos: Position<Idx>) -> Result<(K, V), PositionError> {
        let idx = self.resolve(pos)?;
        let (path, found) = self.search(&self.node(idx).key);
        debug_assert!(found == idx);
        Ok(self.unlink(&path.update, idx))
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let idx = self.head[0].forward;
        if idx.is_none() {
            return None;
        }
        Some(self.unlink(&[Idx::NONE; MAX_LEVEL], idx))
    }

    /// Removes and returns the largest element.
    ///
    /// This is O(log n) as we need to search for predecessors.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let idx = self.tail;
        if idx.is_none() {
            return None;
        }
        let (path, _) = self.search(&self.node(idx).key);
        Some(self.unlink(&path.update, idx))
    }

    /// Removes all elements, keeping allocated capacity.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing rank map");
        self.storage.clear();
        self.head = [Level::EMPTY; MAX_LEVEL];
        self.tail = Idx::NONE;
        self.height = 1;
        self.len = 0;
    }

    /// Moves every element into a new map, leaving this one empty and usable.
    ///
    /// The returned map keeps this map's RNG and positions; this map continues
    /// with an RNG seeded from it, and positions taken before the move never
    /// resolve in it.
    pub fn take(&mut self) -> Self
    where
        C: Clone,
        R: SeedableRng,
    {
        debug!(len = self.len, "moving rank map contents");
        let mut fresh = Self::with_levels(self.levels.fork(), self.cmp.clone(), 0);
        fresh.storage = self.storage.successor();
        core::mem::replace(self, fresh)
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    pub(crate) fn node(&self, idx: Idx) -> &Node<K, V, Idx, MAX_LEVEL> {
        self.storage.get(idx).expect("invalid index")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: Idx) -> &mut Node<K, V, Idx, MAX_LEVEL> {
        self.storage.get_mut(idx).expect("invalid index")
    }

    #[inline]
    pub(crate) fn pair(&self, idx: Idx) -> (&K, &V) {
        let node = self.node(idx);
        (&node.key, &node.value)
    }

    /// Level `i` of `idx`, where `NONE` names the header.
    #[inline]
    pub(crate) fn level_at(&self, idx: Idx, i: usize) -> &Level<Idx> {
        if idx.is_none() {
            &self.head[i]
        } else {
            &self.node(idx).levels[i]
        }
    }

    #[inline]
    fn level_mut(&mut self, idx: Idx, i: usize) -> &mut Level<Idx> {
        if idx.is_none() {
            &mut self.head[i]
        } else {
            &mut self.node_mut(idx).levels[i]
        }
    }

    #[inline]
    pub(crate) fn position_of(&self, idx: Idx) -> Position<Idx> {
        match self.storage.stamp(idx) {
            Some(stamp) => Position { idx, stamp },
            None => Position::END,
        }
    }

    #[inline]
    pub(crate) fn resolve(&self, pos: Position<Idx>) -> Result<Idx, PositionError> {
        if pos.is_end() {
            return Err(PositionError::End);
        }
        match self.storage.stamp(pos.idx) {
            Some(stamp) if stamp == pos.stamp => Ok(pos.idx),
            _ => Err(PositionError::Stale),
        }
    }

    /// Finds `key` without recording predecessors, returning its index and
    /// 1-based position. Used for read-only operations.
    fn locate(&self, key: &K) -> Option<(Idx, usize)> {
        let mut current = Idx::NONE;
        let mut position = 0;

        for i in (0..self.height).rev() {
            loop {
                let level = *self.level_at(current, i);
                if level.forward.is_none() {
                    break;
                }
                match self.cmp.compare(&self.node(level.forward).key, key) {
                    Ordering::Less => {
                        position += level.span;
                        current = level.forward;
                    }
                    Ordering::Equal => return Some((level.forward, position + level.span)),
                    Ordering::Greater => break,
                }
            }
        }

        None
    }

    /// Searches for `key`, recording at each level the last node whose key is
    /// less than `key` and the position it sits at. Used for mutations.
    /// Returns the matching index, or `NONE`.
    pub(crate) fn search(&self, key: &K) -> (SearchPath<Idx, MAX_LEVEL>, Idx) {
        let mut path = SearchPath::from_header();
        let mut current = Idx::NONE;
        let mut position = 0;

        for i in (0..self.height).rev() {
            loop {
                let level = *self.level_at(current, i);
                if level.forward.is_none()
                    || self.cmp.compare(&self.node(level.forward).key, key) != Ordering::Less
                {
                    break;
                }
                position += level.span;
                current = level.forward;
            }
            path.update[i] = current;
            path.rank[i] = position;
        }

        let next = self.level_at(current, 0).forward;
        let found = if next.is_some()
            && self.cmp.compare(&self.node(next).key, key) == Ordering::Equal
        {
            next
        } else {
            Idx::NONE
        };

        (path, found)
    }

    /// Descends by spans to the node at 1-based position `rank + 1`.
    fn index_at_rank(&self, rank: usize) -> Idx {
        if rank >= self.len {
            return Idx::NONE;
        }

        let target = rank + 1;
        let mut current = Idx::NONE;
        let mut position = 0;

        for i in (0..self.height).rev() {
            loop {
                let level = *self.level_at(current, i);
                if level.forward.is_none() || position + level.span > target {
                    break;
                }
                position += level.span;
                current = level.forward;
            }
            if position == target {
                return current;
            }
        }

        Idx::NONE
    }

    /// Splices `idx` out of every level and frees it. `update` must hold its
    /// predecessors at every level below the map height.
    pub(crate) fn unlink(&mut self, update: &[Idx; MAX_LEVEL], idx: Idx) -> (K, V) {
        let (levels, next, backward) = {
            let node = self.node(idx);
            (node.levels, node.next(), node.backward)
        };

        for i in 0..self.height {
            let pred = self.level_mut(update[i], i);
            if pred.forward == idx {
                pred.span += levels[i].span;
                pred.span -= 1;
                pred.forward = levels[i].forward;
            } else {
                // Node is below this level; the chain just got one shorter.
                pred.span -= 1;
            }
        }

        if next.is_some() {
            self.node_mut(next).backward = backward;
        } else {
            self.tail = backward;
        }

        let before = self.height;
        while self.height > 1 && self.head[self.height - 1].forward.is_none() {
            self.height -= 1;
        }
        if self.height != before {
            trace!(from = before, to = self.height, "lowering map height");
        }

        self.len -= 1;

        let node = self.storage.remove(idx).expect("invalid index");
        (node.key, node.value)
    }
}

// ============================================================================
// Clone
// ============================================================================

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> Clone for RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    K: Clone,
    V: Clone,
    R: RngCore + Clone,
    C: Comparator<K> + Clone,
    Idx: Index,
{
    /// Deep copy in two passes: clone nodes in level-0 order, then replay
    /// every span against the new indices.
    fn clone(&self) -> Self {
        let mut storage = Storage::with_capacity(self.len);

        // order[p] is the new index at position p; position 0 is the header.
        let mut order = Vec::with_capacity(self.len + 1);
        order.push(Idx::NONE);
        let mut current = self.head[0].forward;
        while current.is_some() {
            let src = self.node(current);
            let (idx, _) =
                storage.insert(Node::new(src.key.clone(), src.value.clone(), src.height()));
            order.push(idx);
            current = src.next();
        }

        let translate = |level: &Level<Idx>, position: usize| Level {
            forward: if level.forward.is_none() {
                Idx::NONE
            } else {
                order[position + level.span]
            },
            span: level.span,
        };

        let mut head = [Level::EMPTY; MAX_LEVEL];
        for (i, level) in head.iter_mut().enumerate().take(self.height) {
            *level = translate(&self.head[i], 0);
        }

        let mut current = self.head[0].forward;
        let mut position = 1;
        while current.is_some() {
            let src = self.node(current);
            let dst = storage.get_mut(order[position]).expect("invalid index");
            for i in 0..src.height() {
                dst.levels[i] = translate(&src.levels[i], position);
            }
            dst.backward = order[position - 1];
            current = src.next();
            position += 1;
        }

        Self {
            storage,
            head,
            tail: order[self.len],
            height: self.height,
            len: self.len,
            levels: self.levels.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

// ============================================================================
// Trait impls
// ============================================================================

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> fmt::Debug for RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> Extend<(K, V)> for RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    /// Inserts each pair; pairs whose key is already present are dropped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}


#[cfg(test)]
mod bench_rank_map {
    use super::*;
    use hdrhistogram::Histogram;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    type BenchMap = RankMap<u64, u64, SmallRng, Natural, u32, 12>;

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    fn make_map() -> BenchMap {
        let config = RankMapConfig {
            max_level: 12,
            initial_capacity: ITERATIONS + WARMUP,
            ..RankMapConfig::default()
        };
        RankMap::try_with_config(config, Natural, SmallRng::seed_from_u64(12345)).unwrap()
    }

    fn random_keys(count: usize) -> Vec<u64> {
        let mut rng = SmallRng::seed_from_u64(99999);
        (0..count).map(|_| rng.random_range(0..1_000_000)).collect()
    }

    #[test]
    #[ignore]
    fn bench_insert_random() {
        let mut map = make_map();
        let mut hist = Histogram::<u64>::new(3).unwrap();
        let keys = random_keys(ITERATIONS);

        for i in 0..WARMUP as u64 {
            map.insert(i, i);
        }
        map.clear();

        for &k in &keys {
            let start = rdtscp();
            let _ = map.insert(k, k);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("insert_random", &hist);
    }

    #[test]
    #[ignore]
    fn bench_rank_hit() {
        let mut map = make_map();
        let mut hist = Histogram::<u64>::new(3).unwrap();
        let keys = random_keys(ITERATIONS);
        for &k in &keys {
            map.insert(k, k);
        }

        for k in &keys {
            let start = rdtscp();
            let r = map.rank(k);
            let elapsed = rdtscp() - start;
            std::hint::black_box(r);
            hist.record(elapsed).unwrap();
        }

        print_histogram("rank_hit", &hist);
    }

    #[test]
    #[ignore]
    fn bench_get_by_rank() {
        let mut map = make_map();
        let mut hist = Histogram::<u64>::new(3).unwrap();
        for k in random_keys(ITERATIONS) {
            map.insert(k, k);
        }
        let mut rng = SmallRng::seed_from_u64(4242);
        let len = map.len();

        for _ in 0..ITERATIONS {
            let rank = rng.random_range(0..len);
            let start = rdtscp();
            let entry = map.get_by_rank(rank);
            let elapsed = rdtscp() - start;
            std::hint::black_box(entry);
            hist.record(elapsed).unwrap();
        }

        print_histogram("get_by_rank", &hist);
    }

    #[test]
    #[ignore]
    fn bench_erase_random() {
        let mut map = make_map();
        let mut hist = Histogram::<u64>::new(3).unwrap();
        let keys = random_keys(ITERATIONS);
        for &k in &keys {
            map.insert(k, k);
        }

        for k in &keys {
            let start = rdtscp();
            let _ = map.erase(k);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("erase_random", &hist);
    }

    #[test]
    #[ignore]
    fn bench_pop_first() {
        let mut map = make_map();
        let mut hist = Histogram::<u64>::new(3).unwrap();
        for i in 0..ITERATIONS as u64 {
            map.insert(i, i);
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            let _ = map.pop_first();
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("pop_first", &hist);
    }
}
