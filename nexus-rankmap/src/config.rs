//! Tuning knobs for level generation and initial allocation.
//!
//! ```
//! use nexus_rankmap::RankMapConfig;
//!
//! let config = RankMapConfig::from_toml_str(
//!     r#"
//!     max_level = 6
//!     probability = 0.5
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.max_level, 6);
//! assert_eq!(config.initial_capacity, 0);
//! ```

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

/// Default tallest node height.
pub const DEFAULT_MAX_LEVEL: usize = 8;

/// Default probability that a node grows one more level.
pub const DEFAULT_PROBABILITY: f64 = 0.75;

/// Configuration for a [`RankMap`](crate::RankMap).
///
/// Missing fields take their defaults, so an empty document is valid.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankMapConfig {
    /// Tallest height a node may be assigned. Must not exceed the map's
    /// `MAX_LEVEL` header capacity.
    pub max_level: usize,
    /// Chance of promoting a node one more level: `P(height > h) ≈ p^h`.
    pub probability: f64,
    /// Node slots to allocate up front.
    pub initial_capacity: usize,
}

impl Default for RankMapConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            initial_capacity: 0,
        }
    }
}

impl RankMapConfig {
    /// Parses a TOML document. Values are not validated against a header
    /// capacity until the map is built.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Checks the configuration against a header of `capacity` levels.
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.max_level == 0 || self.max_level > capacity {
            warn!(max_level = self.max_level, capacity, "rejecting max_level");
            return Err(ConfigError::MaxLevel {
                max_level: self.max_level,
                capacity,
            });
        }
        // Also rejects NaN.
        if !(self.probability > 0.0 && self.probability < 1.0) {
            warn!(probability = self.probability, "rejecting probability");
            return Err(ConfigError::Probability {
                probability: self.probability,
            });
        }
        Ok(())
    }
}
