//! Striplogs: ordered, depth-indexed interval logs and the algebra for
//! reconciling, compressing and classifying them.
//!
//! A [`Striplog`] is an insertion-ordered sequence of
//! [`Interval`](strata_interval::Interval)s over a one-dimensional
//! ordinate. It may contain gaps, overlaps and out-of-order entries; this
//! crate owns the cross-interval algorithms that clean such a log up.
//!
//! # Pipeline
//!
//! ```text
//!  ┌────────────┐    ┌───────────┐    ┌─────────────┐    ┌──────────────────┐
//!  │  anneal    │───▶│  prune    │───▶│  merge_by   │───▶│ merge_neighbours │
//!  │ (fill gaps)│    │ (de-thin) │    │ (de-overlap)│    │ (combine runs)   │
//!  └────────────┘    └───────────┘    └─────────────┘    └──────────────────┘
//! ```
//!
//! Every transform is a pure function returning a new striplog; the
//! receiver is never mutated, so transforms chain freely and a shared log
//! can feed several pipelines.
//!
//! Binary morphology ([`Striplog::binary_morphology`]) treats a boolean
//! attribute of the log as a 1-D signal and filters it with the standard
//! dilation/erosion/opening/closing operators; `net_to_gross` is the
//! flagged-to-total thickness ratio.
//!
//! # Quick start
//!
//! ```rust
//! use strata_interval::{Component, Interval};
//! use strata_log::{AnnealMode, PruneMode, Striplog};
//!
//! let sst = Component::new().with("lithology", "sandstone");
//! let sh = Component::new().with("lithology", "shale");
//! let log = Striplog::new(vec![
//!     Interval::new(0.0, 10.0).with_component(sst.clone()),
//!     Interval::new(10.0, 10.2).with_component(sh),
//!     Interval::new(14.0, 20.0).with_component(sst),
//! ])?;
//!
//! let clean = log
//!     .prune(0.5, PruneMode::Symmetric)?
//!     .anneal(AnnealMode::Symmetric)
//!     .merge_neighbours();
//! assert_eq!(clean.len(), 1);
//! # Ok::<(), strata_log::StriplogError>(())
//! ```

pub mod anneal;
pub mod error;
pub mod gaps;
pub mod merge;
pub mod morphology;
pub mod prune;
pub mod striplog;
pub mod transform;

pub use anneal::AnnealMode;
pub use error::StriplogError;
pub use morphology::MorphOp;
pub use prune::PruneMode;
pub use striplog::{DescriptionParser, Striplog};

// Re-export the value types for convenience.
pub use strata_interval::{Component, Interval, Position, Value};
