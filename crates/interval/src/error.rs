//! Error types for the strata-interval crate.

/// Error type for all fallible operations in the strata-interval crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntervalError {
    /// Returned when position bounds are out of order or non-finite.
    #[error("invalid position bounds: lower={lower}, value={value}, upper={upper}")]
    InvalidBounds {
        /// The nominal ordinate value.
        value: f64,
        /// The lower uncertainty bound.
        lower: f64,
        /// The upper uncertainty bound.
        upper: f64,
    },

    /// Returned when a binary operation needs overlap or contiguity and has neither.
    #[error(
        "intervals [{a_top}, {a_base}] and [{b_top}, {b_base}] neither overlap nor touch"
    )]
    DisjointIntervals {
        /// Top of the left-hand interval.
        a_top: f64,
        /// Base of the left-hand interval.
        a_base: f64,
        /// Top of the right-hand interval.
        b_top: f64,
        /// Base of the right-hand interval.
        b_base: f64,
    },

    /// Returned when a split depth falls outside the interval.
    #[error("depth {depth} is outside the interval [{top}, {base}]")]
    DepthOutsideInterval {
        /// The requested split depth.
        depth: f64,
        /// Top of the interval.
        top: f64,
        /// Base of the interval.
        base: f64,
    },
}
