//! Structural diagnostics: a level-by-level dump and a full invariant check.

use core::cmp::Ordering;
use core::fmt;
use std::collections::HashMap;

use rand_core::RngCore;

use crate::compare::Comparator;
use crate::error::InvariantError;
use crate::map::RankMap;
use crate::Index;

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> RankMap<K, V, R, C, Idx, MAX_LEVEL>
where
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    /// Returns a displayable dump of every node with its links and spans.
    ///
    /// ```text
    /// rank map: len=2 height=2
    /// header | 0: 1->#0 | 1: 2->#1
    /// #0 key=10 back=- | 0: 1->#1
    /// #1 key=20 back=#0 | 0: 0->nil | 1: 0->nil
    /// ```
    pub fn dump(&self) -> Dump<'_, K, V, R, C, Idx, MAX_LEVEL> {
        Dump { map: self }
    }

    /// Walks the whole structure and reports the first violated invariant.
    ///
    /// Checks ordering, backward and tail links, the element count, the map
    /// height, that every level-i chain visits exactly the nodes of height
    /// above i, and that every span equals the level-0 distance it covers.
    /// O(n * height); intended for tests.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        // order[p] is the node at position p; the header sits at 0.
        let mut order = vec![Idx::NONE];
        let mut positions: HashMap<usize, usize> = HashMap::with_capacity(self.len);
        let mut current = self.head[0].forward;

        while current.is_some() {
            let position = order.len();
            if position > self.len {
                return Err(InvariantError::LengthMismatch {
                    counted: position,
                    len: self.len,
                });
            }

            let node = self.node(current);
            if node.backward != order[position - 1] {
                return Err(InvariantError::Backward { position });
            }
            if position > 1 {
                let prev = &self.node(order[position - 1]).key;
                if self.cmp.compare(prev, &node.key) != Ordering::Less {
                    return Err(InvariantError::OutOfOrder { position });
                }
            }

            positions.insert(current.as_usize(), position);
            order.push(current);
            current = node.next();
        }

        let counted = order.len() - 1;
        if counted != self.len || self.storage.len() != self.len {
            return Err(InvariantError::LengthMismatch {
                counted,
                len: self.len,
            });
        }
        if self.tail != order[counted] {
            return Err(InvariantError::Tail);
        }

        let tallest = order[1..]
            .iter()
            .map(|&idx| self.node(idx).height())
            .max()
            .unwrap_or(1);
        if self.height != tallest {
            return Err(InvariantError::MapHeight {
                actual: self.height,
                expected: tallest,
            });
        }

        for level in 0..self.height {
            // Positions taking part in this level, header first.
            let mut tall = core::iter::once(0).chain(
                (1..=counted).filter(|&p| self.node(order[p]).height() > level),
            );
            let mut from = tall.next().unwrap_or(0);

            loop {
                let link = self.level_at(order[from], level);
                let next = tall.next();

                let expected_forward = next.map_or(Idx::NONE, |to| order[to]);
                if link.forward != expected_forward {
                    let target = positions.get(&link.forward.as_usize()).copied();
                    return Err(match target {
                        Some(to) if to <= from => InvariantError::Cycle {
                            position: from,
                            level,
                        },
                        _ => InvariantError::Height {
                            position: from,
                            level,
                        },
                    });
                }

                let expected_span = next.map_or(counted - from, |to| to - from);
                if link.span != expected_span {
                    return Err(InvariantError::Span {
                        position: from,
                        level,
                        actual: link.span,
                        expected: expected_span,
                    });
                }

                match next {
                    Some(to) => from = to,
                    None => break,
                }
            }
        }

        Ok(())
    }
}

/// Display adapter returned by [`RankMap::dump`].
pub struct Dump<'a, K, V, R, C, Idx: Index, const MAX_LEVEL: usize> {
    map: &'a RankMap<K, V, R, C, Idx, MAX_LEVEL>,
}

struct Link<Idx>(Idx);

impl<Idx: Index> fmt::Display for Link<Idx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_none() {
            f.write_str("nil")
        } else {
            write!(f, "#{}", self.0.as_usize())
        }
    }
}

impl<K, V, R, C, Idx, const MAX_LEVEL: usize> fmt::Display for Dump<'_, K, V, R, C, Idx, MAX_LEVEL>
where
    K: fmt::Debug,
    C: Comparator<K>,
    R: RngCore,
    Idx: Index,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.map;
        writeln!(f, "rank map: len={} height={}", map.len, map.height)?;

        write!(f, "header")?;
        for (i, level) in map.head.iter().enumerate().take(map.height) {
            write!(f, " | {}: {}->{}", i, level.span, Link(level.forward))?;
        }
        writeln!(f)?;

        let mut current = map.head[0].forward;
        while current.is_some() {
            let node = map.node(current);
            let back = if node.backward.is_none() {
                "-".to_string()
            } else {
                Link(node.backward).to_string()
            };
            write!(f, "{} key={:?} back={}", Link(current), node.key, back)?;
            for (i, level) in node.levels.iter().enumerate().take(node.height()) {
                write!(f, " | {}: {}->{}", i, level.span, Link(level.forward))?;
            }
            writeln!(f)?;
            current = node.next();
        }
        Ok(())
    }
}
