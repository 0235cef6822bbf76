//! Error types for the strata-markov crate.

/// Error type for all fallible operations in the strata-markov crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkovError {
    /// Returned when the state sequence is empty.
    #[error("state sequence is empty")]
    EmptySequence,

    /// Returned when the sequence is too short for the requested lags.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when a configuration asks for a maximum lag of zero.
    #[error("max_lag must be at least 1")]
    ZeroMaxLag,

    /// Returned when a lag outside `1..=max_lag` is queried.
    #[error("invalid lag: {lag} (this chain holds lags 1..={max_lag})")]
    InvalidLag {
        /// The requested lag.
        lag: usize,
        /// The largest lag the chain was built with.
        max_lag: usize,
    },

    /// Returned when a statistic needs more distinct states than observed.
    #[error("chain has {n} states, need at least {min} for this statistic")]
    InsufficientStates {
        /// Number of distinct states in the chain.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when a supplied start state is not one of the chain's.
    #[error("start state is not one of the chain's states")]
    UnknownState,

    /// Returned when generation reaches a state with no outgoing
    /// transitions.
    #[error("state {state_index} has no outgoing transitions")]
    NoOutgoingTransitions {
        /// Index of the stuck state, into the chain's sorted state list.
        state_index: usize,
    },

    /// Returned when the chain observed no transitions at all (for
    /// example, a constant sequence with self-transitions excluded).
    #[error("no transitions were observed")]
    NoTransitions,
}
