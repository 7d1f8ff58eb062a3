//! Ordered map with O(log n) rank queries, built on an arena skip list.
//!
//! [`RankMap`] keeps unique keys in comparator order and answers "what is the
//! rank of this key" and "which key has this rank" as fast as it answers
//! lookups. It is a skip list whose forward links carry spans: the number of
//! level-0 steps each link covers.
//!
//! # Layout
//!
//! ```text
//! Storage (Slab)  - owns every node, hands out stable indices + stamps
//! RankMap         - header tower, tail, height, len; links are indices
//! Position        - (index, stamp) handle; goes stale when its node is erased
//! ```
//!
//! Nodes never point at each other by reference. Erasing or clearing frees
//! slots, and any [`Position`] held across that resolves to nothing rather
//! than to whatever reused the slot.
//!
//! # Quick Start
//!
//! ```
//! use nexus_rankmap::RankMap;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut scores: RankMap<u32, &str, SmallRng> = RankMap::new(SmallRng::seed_from_u64(42));
//!
//! scores.insert(870, "carol");
//! scores.insert(920, "alice");
//! scores.insert(640, "bob");
//!
//! // Rank is the zero-based index in sorted order.
//! assert_eq!(scores.rank(&870), Some(1));
//! assert_eq!(scores.get_by_rank(0), Some((&640, &"bob")));
//!
//! // Positions walk the map without borrowing it.
//! let pos = scores.find(&870);
//! assert_eq!(scores.get_at(scores.next(pos)), Some((&920, &"alice")));
//!
//! scores.erase_at(pos);
//! assert_eq!(scores.get_at(pos), None); // stale
//! ```
//!
//! # Ordering
//!
//! The order comes from a [`Comparator`]: [`Natural`] (ascending `Ord`),
//! [`Reverse`], or any `Fn(&K, &K) -> Ordering`. Keys comparing `Equal` are
//! duplicates and the second insert is rejected.
//!
//! # Tuning
//!
//! Node heights are drawn from the injected RNG: each level is kept with
//! probability `p` (default 0.75) up to `max_level` (default 8). Both are set
//! through [`RankMapConfig`], which can be parsed from TOML.
//!
//! | Operation | Expected cost |
//! |-----------|---------------|
//! | insert / erase / find / rank / get_by_rank | O(log n) |
//! | first / last / pop_first / iteration step | O(1) |
//! | clone | O(n) |

#![warn(missing_docs)]

pub mod compare;
pub mod config;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod index;
pub mod iter;
mod level;
pub mod map;
mod node;
mod storage;

pub use compare::{Comparator, Natural, Reverse};
pub use config::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, RankMapConfig};
pub use cursor::Cursor;
pub use dump::Dump;
pub use error::{ConfigError, InvariantError, PositionError};
pub use index::Index;
pub use iter::{IntoIter, Iter, Keys, Values};
pub use map::{Position, RankMap};
