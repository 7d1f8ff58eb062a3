//! Node and level records.
//!
//! ```text
//! Level 2:  HEAD ──────────3─────────► 30 ───────1──────► NIL
//! Level 1:  HEAD ───1───► 10 ───2────► 30 ───1──► 50 ─0─► NIL
//! Level 0:  HEAD ─1─► 10 ─1─► 20 ─1──► 30 ─1──► 50 ─0─► NIL
//!           pos 0     pos 1   pos 2    pos 3    pos 4
//! ```
//!
//! The number on each edge is its span: how many level-0 steps it covers.
//! An edge into NIL spans the nodes remaining after its source.

use crate::Index;

/// One rung of a node's tower: where the level-i chain goes next, and how far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Level<Idx> {
    /// Next node at this level, or `NONE` at the end of the chain.
    pub(crate) forward: Idx,
    /// Level-0 positions covered by `forward`.
    pub(crate) span: usize,
}

impl<Idx: Index> Level<Idx> {
    pub(crate) const EMPTY: Self = Self {
        forward: Idx::NONE,
        span: 0,
    };
}

/// A key/value pair with its tower of level records.
///
/// Only `levels[..height]` is meaningful. `backward` is `NONE` for the first
/// node, which means "the header".
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V, Idx, const MAX_LEVEL: usize> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) backward: Idx,
    pub(crate) levels: [Level<Idx>; MAX_LEVEL],
    height: u8,
}

impl<K, V, Idx: Index, const MAX_LEVEL: usize> Node<K, V, Idx, MAX_LEVEL> {
    #[inline]
    pub(crate) fn new(key: K, value: V, height: usize) -> Self {
        debug_assert!((1..=MAX_LEVEL).contains(&height));
        Self {
            key,
            value,
            backward: Idx::NONE,
            levels: [Level::EMPTY; MAX_LEVEL],
            height: height as u8,
        }
    }

    /// Number of levels this node participates in (at least 1).
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.height as usize
    }

    #[inline]
    pub(crate) fn next(&self) -> Idx {
        self.levels[0].forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_unlinked() {
        let node: Node<u64, &str, u32, 8> = Node::new(7, "seven", 3);
        assert_eq!(node.height(), 3);
        assert!(node.backward.is_none());
        assert!(node.next().is_none());
        assert!(node.levels.iter().all(|l| *l == Level::EMPTY));
    }
}
