//! Core value types for depth-indexed interval logs.
//!
//! This crate defines the three leaf types of the strata workspace:
//!
//! - [`Position`]: a point on the ordinate (depth or time) with
//!   uncertainty bounds.
//! - [`Component`]: an immutable keyed attribute bag classifying what an
//!   interval contains.
//! - [`Interval`]: a range `[top, base]` on the ordinate plus an ordered
//!   list of candidate components, with the range algebra (overlap test,
//!   union, intersection, difference, split).
//!
//! All three are plain value types: cloning is deep, transforms return new
//! values, and nothing here holds interior mutability.
//!
//! # Quick start
//!
//! ```rust
//! use strata_interval::{Component, Interval};
//!
//! let sst = Component::new().with("lithology", "sandstone");
//! let a = Interval::new(0.0, 10.0).with_component(sst.clone());
//! let b = Interval::new(5.0, 15.0).with_component(sst);
//!
//! assert!(a.overlaps(&b));
//! let u = a.union(&b)?;
//! assert_eq!(u.thickness(), 15.0);
//! # Ok::<(), strata_interval::IntervalError>(())
//! ```

pub mod component;
pub mod error;
pub mod interval;
pub mod position;

pub use component::{Component, Value};
pub use error::IntervalError;
pub use interval::{Interval, Relation, CONTIGUITY_TOL};
pub use position::Position;
