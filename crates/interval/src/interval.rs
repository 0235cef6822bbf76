//! Depth intervals: a range on the ordinate carrying an ordered list of
//! candidate components, plus the range algebra (overlap, union,
//! intersection, difference, split).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::component::Component;
use crate::error::IntervalError;
use crate::position::Position;

/// Default tolerance for contiguity tests ("does one's base equal the
/// other's top").
pub const CONTIGUITY_TOL: f64 = 1e-9;

/// How two intervals relate on the ordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The ranges share no ordinate values and are not contiguous.
    Disjoint,
    /// One's base equals the other's top (within tolerance).
    Touches,
    /// The ranges overlap without either containing the other.
    Partial,
    /// This interval strictly contains the other.
    Contains,
    /// This interval is strictly contained by the other.
    ContainedBy,
    /// The ranges are identical.
    Equal,
}

/// A lithologic or stratigraphic interval, or a single point observation.
///
/// The invariant `top.value() <= base.value()` always holds: a reversed
/// range at construction is repaired by swapping the two ends (the repair
/// is logged at `debug`). Zero-thickness intervals are legal and every
/// operation accepts them.
///
/// The first component, when present, is the "primary" classification; an
/// interval with no components is an unclassified span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    top: Position,
    base: Position,
    components: Vec<Component>,
}

impl Interval {
    /// Creates an interval from plain top and base depths.
    ///
    /// A reversed range (`top > base`) is repaired by swapping.
    pub fn new(top: f64, base: f64) -> Self {
        Self::from_positions(Position::new(top), Position::new(base))
    }

    /// Creates an interval from positions, repairing a reversed range.
    pub fn from_positions(top: Position, base: Position) -> Self {
        let (top, base) = if top.value() > base.value() {
            debug!(
                top = top.value(),
                base = base.value(),
                "reversed range repaired by swapping top and base"
            );
            (base, top)
        } else {
            (top, base)
        };
        Self {
            top,
            base,
            components: Vec::new(),
        }
    }

    /// Creates a zero-thickness (point) interval.
    pub fn point(depth: f64) -> Self {
        Self::new(depth, depth)
    }

    /// Returns a copy with `component` appended to the component list.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Returns a copy with the whole component list replaced.
    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    /// Returns a copy with a new top, re-repairing the range if needed.
    pub fn with_top(self, top: Position) -> Self {
        Self::from_positions(top, self.base).with_components(self.components)
    }

    /// Returns a copy with a new base, re-repairing the range if needed.
    pub fn with_base(self, base: Position) -> Self {
        Self::from_positions(self.top, base).with_components(self.components)
    }

    /// The top (shallowest) position.
    pub fn top(&self) -> Position {
        self.top
    }

    /// The base (deepest) position.
    pub fn base(&self) -> Position {
        self.base
    }

    /// The ordered component list.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The primary component: the first in the list, if any.
    ///
    /// Algorithms that need a component unconditionally treat an absent
    /// primary as the empty [`Component`].
    pub fn primary(&self) -> Option<&Component> {
        self.components.first()
    }

    /// `base - top`; zero for point intervals.
    pub fn thickness(&self) -> f64 {
        self.base.value() - self.top.value()
    }

    /// The midpoint of the range.
    pub fn middle(&self) -> f64 {
        (self.top.value() + self.base.value()) / 2.0
    }

    /// True for a zero-thickness interval.
    pub fn is_point(&self) -> bool {
        self.thickness() == 0.0
    }

    /// True if depth `d` lies within the closed range `[top, base]`.
    pub fn spans(&self, d: f64) -> bool {
        self.top.value() <= d && d <= self.base.value()
    }

    /// Returns this interval moved by `delta`, position bounds included.
    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            top: self.top.shifted(delta),
            base: self.base.shifted(delta),
            components: self.components.clone(),
        }
    }

    /// True iff the two ranges share interior ordinate values.
    ///
    /// The test is strict: `max(top) < min(base)`, so ranges that merely
    /// touch do not overlap. A zero-thickness interval overlaps another
    /// interval iff its point lies strictly inside it; two points never
    /// overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        if self.is_point() && other.is_point() {
            return false;
        }
        if self.is_point() {
            let d = self.top.value();
            return other.top.value() < d && d < other.base.value();
        }
        if other.is_point() {
            let d = other.top.value();
            return self.top.value() < d && d < self.base.value();
        }
        self.top.value().max(other.top.value()) < self.base.value().min(other.base.value())
    }

    /// True iff the intervals are contiguous within [`CONTIGUITY_TOL`].
    pub fn touches(&self, other: &Interval) -> bool {
        self.touches_within(other, CONTIGUITY_TOL)
    }

    /// True iff one's base equals the other's top within `tol`.
    pub fn touches_within(&self, other: &Interval, tol: f64) -> bool {
        (self.base.value() - other.top.value()).abs() <= tol
            || (self.top.value() - other.base.value()).abs() <= tol
    }

    /// Classifies the relationship between the two ranges.
    pub fn relation(&self, other: &Interval) -> Relation {
        let same_top = self.top.value() == other.top.value();
        let same_base = self.base.value() == other.base.value();
        if same_top && same_base {
            return Relation::Equal;
        }
        if self.overlaps(other) {
            let contains =
                self.top.value() <= other.top.value() && other.base.value() <= self.base.value();
            let contained =
                other.top.value() <= self.top.value() && self.base.value() <= other.base.value();
            return if contains {
                Relation::Contains
            } else if contained {
                Relation::ContainedBy
            } else {
                Relation::Partial
            };
        }
        if self.touches(other) {
            Relation::Touches
        } else {
            Relation::Disjoint
        }
    }

    /// The union of two overlapping or contiguous intervals.
    ///
    /// The result spans `min(top)..max(base)`, keeping the winning
    /// endpoints' positions (uncertainty bounds included). Components are
    /// self's followed by other's, duplicates removed, order preserved.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::DisjointIntervals`] when the intervals
    /// neither overlap nor touch.
    pub fn union(&self, other: &Interval) -> Result<Interval, IntervalError> {
        if !(self.overlaps(other) || self.touches(other)) {
            return Err(IntervalError::DisjointIntervals {
                a_top: self.top.value(),
                a_base: self.base.value(),
                b_top: other.top.value(),
                b_base: other.base.value(),
            });
        }
        let top = if self.top.value() <= other.top.value() {
            self.top
        } else {
            other.top
        };
        let base = if self.base.value() >= other.base.value() {
            self.base
        } else {
            other.base
        };
        Ok(Interval {
            top,
            base,
            components: merge_components(&self.components, &other.components),
        })
    }

    /// The overlapping sub-range, or `None` when the ranges do not overlap.
    ///
    /// The result carries the combined component list (self's first).
    /// Disjoint or merely touching inputs yield `None`, never an error.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        if !self.overlaps(other) {
            return None;
        }
        let top = if self.top.value() >= other.top.value() {
            self.top
        } else {
            other.top
        };
        let base = if self.base.value() <= other.base.value() {
            self.base
        } else {
            other.base
        };
        Some(Interval {
            top,
            base,
            components: merge_components(&self.components, &other.components),
        })
    }

    /// The parts of this interval not covered by `other`: zero, one or two
    /// pieces, each keeping this interval's components.
    pub fn difference(&self, other: &Interval) -> Vec<Interval> {
        if !self.overlaps(other) {
            return vec![self.clone()];
        }
        let mut pieces = Vec::new();
        if self.top.value() < other.top.value() {
            pieces.push(Interval {
                top: self.top,
                base: other.top,
                components: self.components.clone(),
            });
        }
        if other.base.value() < self.base.value() {
            pieces.push(Interval {
                top: other.base,
                base: self.base,
                components: self.components.clone(),
            });
        }
        pieces
    }

    /// Splits the interval at depth `d` into `(upper, lower)` pieces, both
    /// keeping the full component list.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::DepthOutsideInterval`] if `d` is not
    /// spanned by the interval.
    pub fn split_at(&self, d: f64) -> Result<(Interval, Interval), IntervalError> {
        if !self.spans(d) {
            return Err(IntervalError::DepthOutsideInterval {
                depth: d,
                top: self.top.value(),
                base: self.base.value(),
            });
        }
        let cut = Position::new(d);
        let upper = Interval {
            top: self.top,
            base: cut,
            components: self.components.clone(),
        };
        let lower = Interval {
            top: cut,
            base: self.base,
            components: self.components.clone(),
        };
        Ok((upper, lower))
    }

    /// Depth ordering for sorts: by `(top.value, base.value)`.
    ///
    /// Components do not participate, so this is a comparator rather than
    /// an `Ord` impl.
    pub fn depth_order(a: &Interval, b: &Interval) -> std::cmp::Ordering {
        a.top
            .value()
            .total_cmp(&b.top.value())
            .then(a.base.value().total_cmp(&b.base.value()))
    }
}

/// Concatenation with duplicates removed, first-seen order preserved.
fn merge_components(a: &[Component], b: &[Component]) -> Vec<Component> {
    let mut out: Vec<Component> = a.to_vec();
    for c in b {
        if !out.contains(c) {
            out.push(c.clone());
        }
    }
    out
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.primary() {
            Some(c) => write!(f, "[{}, {}] {}", self.top, self.base, c),
            None => write!(f, "[{}, {}]", self.top, self.base),
        }
    }
}
