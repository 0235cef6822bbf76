//! Configuration for building Markov chains.

use crate::error::MarkovError;

/// Configuration for [`MarkovChain`](crate::MarkovChain) construction.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use strata_markov::ChainConfig;
///
/// let config = ChainConfig::new().with_max_lag(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChainConfig {
    max_lag: usize,
    include_self: bool,
}

impl ChainConfig {
    /// Creates a configuration with defaults: `max_lag = 1`,
    /// `include_self = true`.
    ///
    /// Self-transitions are counted by default: a state genuinely
    /// following itself in the sequence is a real transition, at every
    /// lag. Set `include_self` to false to exclude self-pairs entirely,
    /// e.g. after `merge_neighbours` has made adjacent repeats impossible
    /// at lag 1 and only multi-lag repeats remain.
    pub fn new() -> Self {
        Self {
            max_lag: 1,
            include_self: true,
        }
    }

    /// Sets the largest lag to count. Pair counts are kept for every lag
    /// in `1..=max_lag`.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Sets whether self-transitions (a state followed by itself at the
    /// counted lag) are included.
    pub fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Returns the largest lag to count.
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Returns whether self-transitions are included.
    pub fn include_self(&self) -> bool {
        self.include_self
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::ZeroMaxLag`] if `max_lag` is zero.
    pub fn validate(&self) -> Result<(), MarkovError> {
        if self.max_lag == 0 {
            return Err(MarkovError::ZeroMaxLag);
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new()
    }
}
