//! The striplog container: an insertion-ordered sequence of intervals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use strata_interval::{Component, Interval, Position};

use crate::error::StriplogError;

/// Turns free-text interval descriptions into components.
///
/// This is the contract with the external lexicon-based parser; the core
/// only invokes it at construction time, via
/// [`Striplog::from_descriptions`]. A description the parser cannot
/// interpret should yield an empty vector, which produces an unclassified
/// interval.
pub trait DescriptionParser {
    /// Parses one description into an ordered list of components
    /// (most important first).
    fn parse(&self, text: &str) -> Vec<Component>;
}

/// An ordered sequence of [`Interval`]s representing a full log.
///
/// The underlying order is **insertion order**, independent of depth:
/// a striplog is not required to be sorted or free of gaps and overlaps.
/// Anything that needs "shallowest" or "deepest" must go through
/// [`start`](Striplog::start) and [`stop`](Striplog::stop), which scan all
/// intervals, never the first or last element.
///
/// A striplog is never empty, so `start`/`stop` are total.
///
/// Every transform (`anneal`, `prune`, `merge_by`, `merge_neighbours`,
/// `binary_morphology`, ...) returns a new striplog and leaves the
/// receiver untouched, so pipelines chain freely:
///
/// ```rust
/// use strata_interval::{Component, Interval};
/// use strata_log::{AnnealMode, Striplog};
///
/// let sst = Component::new().with("lithology", "sandstone");
/// let log = Striplog::new(vec![
///     Interval::new(0.0, 10.0).with_component(sst.clone()),
///     Interval::new(15.0, 20.0).with_component(sst),
/// ])?;
///
/// let filled = log.anneal(AnnealMode::FloodDown).merge_neighbours();
/// assert_eq!(filled.len(), 1);
/// assert_eq!(log.len(), 2); // the source is unchanged
/// # Ok::<(), strata_log::StriplogError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Striplog {
    pub(crate) intervals: Vec<Interval>,
}

impl Striplog {
    /// Creates a striplog from a list of intervals, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`StriplogError::EmptyLog`] for an empty list.
    pub fn new(intervals: Vec<Interval>) -> Result<Self, StriplogError> {
        if intervals.is_empty() {
            return Err(StriplogError::EmptyLog);
        }
        Ok(Self { intervals })
    }

    /// Creates a striplog from raw `(top, base, component)` records, as
    /// produced by external readers.
    pub fn from_records(
        records: impl IntoIterator<Item = (f64, f64, Component)>,
    ) -> Result<Self, StriplogError> {
        let intervals = records
            .into_iter()
            .map(|(top, base, component)| Interval::new(top, base).with_component(component))
            .collect();
        Self::new(intervals)
    }

    /// Creates a striplog from raw `(top, base, description)` records,
    /// delegating description parsing to the supplied parser.
    ///
    /// Records whose description parses to no components become
    /// unclassified intervals.
    pub fn from_descriptions<P: DescriptionParser>(
        records: &[(f64, f64, &str)],
        parser: &P,
    ) -> Result<Self, StriplogError> {
        let intervals = records
            .iter()
            .map(|&(top, base, text)| {
                Interval::new(top, base).with_components(parser.parse(text))
            })
            .collect();
        Self::new(intervals)
    }

    /// The number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// A striplog holds at least one interval, so this is always false.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The interval at `index`, in insertion order.
    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Iterates the intervals in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// The intervals as a slice, in insertion order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The shallowest top across all intervals.
    pub fn start(&self) -> Position {
        self.intervals
            .iter()
            .map(Interval::top)
            .min()
            .expect("striplog is never empty")
    }

    /// The deepest base across all intervals.
    pub fn stop(&self) -> Position {
        self.intervals
            .iter()
            .map(Interval::base)
            .max()
            .expect("striplog is never empty")
    }

    /// The summed thickness of all intervals (overlaps counted twice).
    pub fn cum_thickness(&self) -> f64 {
        self.intervals.iter().map(Interval::thickness).sum()
    }

    /// The mean interval thickness.
    pub fn mean_thickness(&self) -> f64 {
        self.cum_thickness() / self.len() as f64
    }

    /// Summarizes the log as `(primary component, total thickness)` pairs,
    /// thickest first. Intervals without a primary are tallied under the
    /// empty component.
    pub fn unique(&self) -> Vec<(Component, f64)> {
        let mut table: BTreeMap<Component, f64> = BTreeMap::new();
        for iv in &self.intervals {
            let c = iv.primary().cloned().unwrap_or_default();
            *table.entry(c).or_default() += iv.thickness();
        }
        let mut pairs: Vec<(Component, f64)> = table.into_iter().collect();
        // BTreeMap iteration gives a deterministic order for equal thicknesses.
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs
    }

    /// The distinct non-empty primary components in the log.
    pub fn components(&self) -> Vec<Component> {
        self.unique()
            .into_iter()
            .map(|(c, _)| c)
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// All intervals spanning depth `d`, in insertion order.
    pub fn read_at(&self, d: f64) -> Vec<&Interval> {
        self.intervals.iter().filter(|iv| iv.spans(d)).collect()
    }

    /// All intervals whose component list contains `component`.
    pub fn find(&self, component: &Component) -> Vec<&Interval> {
        self.intervals
            .iter()
            .filter(|iv| iv.components().contains(component))
            .collect()
    }

    /// A new striplog sorted by `(top, base)`. The sort is stable: equal
    /// keys keep their relative insertion order.
    pub fn sorted(&self) -> Striplog {
        let mut intervals = self.intervals.clone();
        intervals.sort_by(Interval::depth_order);
        Striplog { intervals }
    }

    /// The thickest interval. Ties go to the earliest in insertion order.
    pub fn thickest(&self) -> &Interval {
        self.intervals
            .iter()
            .reduce(|best, iv| if iv.thickness() > best.thickness() { iv } else { best })
            .expect("striplog is never empty")
    }

    /// The thinnest interval. Ties go to the earliest in insertion order.
    pub fn thinnest(&self) -> &Interval {
        self.intervals
            .iter()
            .reduce(|best, iv| if iv.thickness() < best.thickness() { iv } else { best })
            .expect("striplog is never empty")
    }
}

impl<'a> IntoIterator for &'a Striplog {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
