//! Error types for configuration, position handling, and structural checks.
//!
//! Logical no-ops (duplicate insert, erasing a missing key) are reported as
//! `bool` by the map itself and never surface here.

use thiserror::Error;

/// A position could not be resolved to a live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The position is the end (terminal) position.
    #[error("position is the end of the map")]
    End,

    /// The node the position referred to has been erased, or its slot was
    /// reused by a later insert.
    #[error("position refers to a node that is no longer in the map")]
    Stale,
}

/// Configuration rejected during parsing or validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be deserialized.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `max_level` is zero or exceeds the header capacity.
    #[error("max_level must be within 1..={capacity}, got {max_level}")]
    MaxLevel {
        /// The configured value.
        max_level: usize,
        /// The header capacity (`MAX_LEVEL`).
        capacity: usize,
    },

    /// `probability` is outside the open unit interval.
    #[error("probability must be within (0, 1), got {probability}")]
    Probability {
        /// The configured value.
        probability: f64,
    },
}

/// The first structural violation found by
/// [`RankMap::check_invariants`](crate::RankMap::check_invariants).
///
/// Positions count level-0 steps from the header, which sits at position 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// A key does not compare strictly greater than its predecessor.
    #[error("level-0 chain out of order at position {position}")]
    OutOfOrder {
        /// Position of the offending node.
        position: usize,
    },

    /// Walking level 0 found a different number of nodes than `len()`.
    #[error("node count {counted} does not match len {len}")]
    LengthMismatch {
        /// Nodes reached on level 0.
        counted: usize,
        /// The recorded element count.
        len: usize,
    },

    /// A node's backward link does not name its level-0 predecessor.
    #[error("backward link broken at position {position}")]
    Backward {
        /// Position of the offending node.
        position: usize,
    },

    /// The tail link does not name the last node (or the header when empty).
    #[error("tail does not point at the last node")]
    Tail,

    /// A span disagrees with the level-0 distance it should cover.
    #[error("span at position {position} level {level} is {actual}, expected {expected}")]
    Span {
        /// Position of the node owning the span.
        position: usize,
        /// Level of the span.
        level: usize,
        /// Stored span.
        actual: usize,
        /// Level-0 distance to the forward target.
        expected: usize,
    },

    /// A level-i link targets a node whose height does not reach level i.
    #[error("level {level} link from position {position} skips to a node of lower height")]
    Height {
        /// Position of the node owning the link.
        position: usize,
        /// Level of the link.
        level: usize,
    },

    /// The map height is not the height of its tallest node.
    #[error("map height {actual} does not match tallest node {expected}")]
    MapHeight {
        /// Recorded height.
        actual: usize,
        /// Tallest node height (at least 1).
        expected: usize,
    },

    /// A link targets a node that is not later on level 0.
    #[error("level {level} link from position {position} does not move forward")]
    Cycle {
        /// Position of the node owning the link.
        position: usize,
        /// Level of the link.
        level: usize,
    },
}
