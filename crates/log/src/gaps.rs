//! Gap and overlap detection.

use strata_interval::Interval;

use crate::striplog::Striplog;

impl Striplog {
    /// Finds the uncovered spans of the log: a sort of anti-striplog.
    ///
    /// The depth-sorted sequence is walked with a coverage frontier (the
    /// deepest base seen so far); a gap opens wherever the next top lies
    /// strictly below the frontier. Because coverage is tracked across all
    /// earlier intervals, overlapping inputs never produce false gaps.
    ///
    /// The returned intervals carry no components. An unbroken log yields
    /// an empty vector.
    pub fn find_gaps(&self) -> Vec<Interval> {
        self.walk_coverage().0
    }

    /// Finds the contested spans of the log: every range covered by more
    /// than one interval, as component-less intervals.
    pub fn find_overlaps(&self) -> Vec<Interval> {
        self.walk_coverage().1
    }

    /// Walks the depth-sorted sequence once, collecting gap and overlap
    /// spans against the coverage frontier.
    fn walk_coverage(&self) -> (Vec<Interval>, Vec<Interval>) {
        let sorted = self.sorted();
        let mut gaps = Vec::new();
        let mut overlaps = Vec::new();

        let mut frontier = sorted.intervals[0].base().value();
        for iv in &sorted.intervals[1..] {
            let top = iv.top().value();
            let base = iv.base().value();
            if top > frontier {
                gaps.push(Interval::new(frontier, top));
            } else if top < frontier {
                // The contested span ends where the shallower coverage does.
                let end = frontier.min(base);
                if top < end {
                    overlaps.push(Interval::new(top, end));
                }
            }
            frontier = frontier.max(base);
        }
        (gaps, overlaps)
    }
}
