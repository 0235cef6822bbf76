//! Error types for the strata-log crate.

use strata_interval::IntervalError;

/// Error type for all fallible operations in the strata-log crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StriplogError {
    /// Returned when a striplog would be empty.
    #[error("cannot create an empty striplog")]
    EmptyLog,

    /// Returned when a mode string is not recognised.
    #[error("unknown mode {given:?} (expected one of: {valid})")]
    UnknownMode {
        /// The string that failed to parse.
        given: String,
        /// The accepted spellings, comma-separated.
        valid: &'static str,
    },

    /// Returned when a thickness limit is not finite and positive.
    #[error("invalid thickness limit: {limit} (must be finite and > 0)")]
    InvalidLimit {
        /// The offending limit.
        limit: f64,
    },

    /// Returned when a sample step is not finite and positive, or a
    /// structuring element is empty.
    #[error("invalid sampling: step={step}, element={element} (step must be finite and > 0, element >= 1)")]
    InvalidSampling {
        /// The sample spacing.
        step: f64,
        /// The structuring element length in samples.
        element: usize,
    },

    /// Returned when a depth window is empty or reversed.
    #[error("invalid depth window: [{lo}, {hi}]")]
    InvalidWindow {
        /// Window top.
        lo: f64,
        /// Window base.
        hi: f64,
    },

    /// Returned when a thickness ratio is requested over zero total
    /// thickness.
    #[error("total thickness is zero, ratio is undefined")]
    ZeroThickness,

    /// Interval algebra error.
    #[error(transparent)]
    Interval(#[from] IntervalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_mode() {
        let e = StriplogError::UnknownMode {
            given: "sideways".to_string(),
            valid: "flood_up, flood_down, symmetric",
        };
        assert_eq!(
            e.to_string(),
            "unknown mode \"sideways\" (expected one of: flood_up, flood_down, symmetric)"
        );
    }

    #[test]
    fn display_zero_thickness() {
        assert_eq!(
            StriplogError::ZeroThickness.to_string(),
            "total thickness is zero, ratio is undefined"
        );
    }

    #[test]
    fn from_interval_error() {
        let ie = IntervalError::DepthOutsideInterval {
            depth: 5.0,
            top: 0.0,
            base: 1.0,
        };
        let se: StriplogError = ie.into();
        assert!(matches!(se, StriplogError::Interval(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<StriplogError>();
    }
}
