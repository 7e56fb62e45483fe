use crate::search::ConfigError;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search limits that can be applied simultaneously.
///
/// The depth limit bounds every iterative deepening pass, while the time limit
/// bounds the total wall-clock time. The search stops when the first limit is reached.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct Limits {
    /// The maximum number of plies to search.
    #[cfg_attr(test, strategy(proptest::option::of(1u32..=8)))]
    pub depth: Option<u32>,

    /// The maximum amount of time to spend searching.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time: Option<Duration>,
}

impl Limits {
    /// Create unlimited search limits.
    ///
    /// These are rejected by [`Limits::validate`], use them as a starting point.
    #[inline(always)]
    pub fn none() -> Self {
        Self::default()
    }

    /// Create limits with only depth restriction.
    #[inline(always)]
    pub fn depth(depth: u32) -> Self {
        Self {
            depth: Some(depth),
            ..Default::default()
        }
    }

    /// Create limits with only time restriction.
    #[inline(always)]
    pub fn time(time: Duration) -> Self {
        Self {
            time: Some(time),
            ..Default::default()
        }
    }

    /// Get the effective maximum depth.
    ///
    /// Returns the set depth or [`u32::MAX`] if unlimited.
    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.depth.unwrap_or(u32::MAX)
    }

    /// Get the effective maximum time.
    ///
    /// Returns the set time limit or [`Duration::MAX`] if unlimited.
    #[inline(always)]
    pub fn max_time(&self) -> Duration {
        self.time.unwrap_or(Duration::MAX)
    }

    /// Set depth limit.
    #[must_use]
    #[inline(always)]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Set time limit.
    #[must_use]
    #[inline(always)]
    pub fn with_time(mut self, time: Duration) -> Self {
        self.time = Some(time);
        self
    }

    /// Checks these limits describe a search that eventually terminates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.depth, self.time) {
            (Some(0), _) => Err(ConfigError::ZeroDepth),
            (_, Some(Duration::ZERO)) => Err(ConfigError::ZeroTime),
            (None, None) => Err(ConfigError::Unbounded),
            _ => Ok(()),
        }
    }
}
