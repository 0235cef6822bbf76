//! Overlap resolution by precedence, and combination of identical
//! neighbours.

use tracing::debug;

use strata_interval::{Interval, Position};

use crate::error::StriplogError;
use crate::striplog::Striplog;

/// A top or base boundary in the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Top,
    Base,
}

impl Striplog {
    /// Resolves every overlap by precedence: wherever intervals contest a
    /// span, the one with the greatest `key` wins it outright (no
    /// blending). With `reverse`, the least key wins. Ties go to the
    /// interval sorting later in depth order.
    ///
    /// The log's boundaries are swept top-down, re-deriving the winning
    /// interval after every top and base, so resolving one overlap
    /// correctly exposes or removes adjacency with the next. The result
    /// contains no overlapping pair. Zero-thickness pieces (including
    /// point-interval inputs) are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StriplogError::EmptyLog`] if nothing with thickness
    /// remains.
    pub fn merge_by<F>(&self, key: F, reverse: bool) -> Result<Striplog, StriplogError>
    where
        F: Fn(&Interval) -> f64,
    {
        let sorted = self.sorted().intervals;
        let keys: Vec<f64> = sorted.iter().map(&key).collect();

        // Boundary table: every top and base, sorted by depth. The sort is
        // stable, so at a shared depth an earlier interval's base precedes
        // a later interval's top.
        let mut events: Vec<(f64, Boundary, usize)> = Vec::with_capacity(2 * sorted.len());
        for (i, iv) in sorted.iter().enumerate() {
            events.push((iv.top().value(), Boundary::Top, i));
            events.push((iv.base().value(), Boundary::Base, i));
        }
        events.sort_by(|a, b| a.0.total_cmp(&b.0));

        let beats = |a: f64, b: f64| if reverse { a <= b } else { a >= b };

        // Active intervals, lowest priority first: the winner sits at the
        // end. The stable re-sort keeps insertion order for equal keys.
        let mut stack: Vec<usize> = Vec::new();
        let mut merged: Vec<(f64, Boundary, usize)> = Vec::new();

        for (depth, boundary, idx) in events {
            match boundary {
                Boundary::Top => {
                    let wins = match stack.last() {
                        Some(&current) => beats(keys[idx], keys[current]),
                        None => true,
                    };
                    if wins {
                        if let Some(&current) = stack.last() {
                            merged.push((depth, Boundary::Base, current));
                        }
                        merged.push((depth, Boundary::Top, idx));
                    }
                    stack.push(idx);
                    stack.sort_by(|&x, &y| {
                        let ord = keys[x].total_cmp(&keys[y]);
                        if reverse { ord.reverse() } else { ord }
                    });
                }
                Boundary::Base => {
                    let was_winning = stack.last() == Some(&idx);
                    if was_winning {
                        merged.push((depth, Boundary::Base, idx));
                    }
                    stack.retain(|&x| x != idx);
                    if was_winning {
                        if let Some(&next) = stack.last() {
                            merged.push((depth, Boundary::Top, next));
                        }
                    }
                }
            }
        }

        // Pair consecutive (top, base) entries back into intervals.
        debug_assert!(merged.len() % 2 == 0, "boundary table must pair up");
        let mut out = Vec::with_capacity(merged.len() / 2);
        for pair in merged.chunks_exact(2) {
            let (top, _, idx) = pair[0];
            let (base, _, _) = pair[1];
            if top == base {
                continue;
            }
            out.push(
                sorted[idx]
                    .clone()
                    .with_top(Position::new(top))
                    .with_base(Position::new(base)),
            );
        }

        debug!(
            input = sorted.len(),
            output = out.len(),
            reverse,
            "resolved overlaps by precedence"
        );
        if out.is_empty() {
            return Err(StriplogError::EmptyLog);
        }
        Ok(Striplog { intervals: out })
    }

    /// [`merge_by`](Striplog::merge_by) with interval thickness as the
    /// precedence key: the thickest interval wins each contested span
    /// (or the thinnest, with `reverse`).
    pub fn merge_by_thickness(&self, reverse: bool) -> Result<Striplog, StriplogError> {
        self.merge_by(Interval::thickness, reverse)
    }

    /// [`merge_by`](Striplog::merge_by) keyed on a numeric attribute of
    /// the primary component. An interval whose primary lacks the
    /// attribute (or has it non-numeric) ranks lowest; `reverse` flips the
    /// comparison direction, so such intervals then take precedence.
    pub fn merge_by_attribute(&self, attr: &str, reverse: bool) -> Result<Striplog, StriplogError> {
        self.merge_by(
            |iv| {
                iv.primary()
                    .and_then(|c| c.get_number(attr))
                    .unwrap_or(f64::NEG_INFINITY)
            },
            reverse,
        )
    }

    /// Combines touching neighbours whose component lists are identical,
    /// in a single left-to-right pass over the depth-sorted sequence.
    ///
    /// One pass is the contract, not a fixed-point loop: after
    /// [`anneal`](Striplog::anneal) the log is contiguous, every qualifying
    /// pair is adjacent in sorted order, and the pass is O(n).
    pub fn merge_neighbours(&self) -> Striplog {
        let sorted = self.sorted().intervals;
        let mut out: Vec<Interval> = Vec::with_capacity(sorted.len());
        for iv in sorted {
            let qualifies = out
                .last()
                .is_some_and(|last| last.touches(&iv) && last.components() == iv.components());
            if qualifies {
                let last = out.last_mut().expect("qualifies implies non-empty");
                *last = last.union(&iv).expect("touching intervals always union");
            } else {
                out.push(iv);
            }
        }
        Striplog { intervals: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_interval::Component;

    fn lith(name: &str) -> Component {
        Component::new().with("lithology", name)
    }

    fn no_overlaps(log: &Striplog) -> bool {
        let ivs = log.intervals();
        ivs.iter().enumerate().all(|(i, a)| {
            ivs.iter().skip(i + 1).all(|b| !a.overlaps(b))
        })
    }

    #[test]
    fn thickest_wins_contested_span() {
        let log = Striplog::new(vec![
            Interval::new(0.0, 10.0).with_component(lith("thick")),
            Interval::new(8.0, 12.0).with_component(lith("thin")),
        ])
        .unwrap();
        let merged = log.merge_by_thickness(false).unwrap();
        assert!(no_overlaps(&merged));
        // The thick interval keeps its full range; the thin one is trimmed.
        assert_eq!(merged.get(0).unwrap().base().value(), 10.0);
        assert_eq!(merged.get(1).unwrap().top().value(), 10.0);
        assert_eq!(merged.get(1).unwrap().base().value(), 12.0);
    }

    #[test]
    fn reverse_flips_the_winner() {
        let log = Striplog::new(vec![
            Interval::new(0.0, 10.0).with_component(lith("thick")),
            Interval::new(8.0, 12.0).with_component(lith("thin")),
        ])
        .unwrap();
        let merged = log.merge_by_thickness(true).unwrap();
        assert!(no_overlaps(&merged));
        // The thin interval now wins the contested span.
        assert_eq!(merged.get(0).unwrap().base().value(), 8.0);
        assert_eq!(merged.get(1).unwrap().top().value(), 8.0);
    }

    #[test]
    fn contained_interval_splits_the_winner_means_three_pieces() {
        // A low-priority host fully containing a high-priority core.
        let log = Striplog::new(vec![
            Interval::new(0.0, 20.0).with_component(
                lith("host").with("quality", 1.0),
            ),
            Interval::new(8.0, 12.0).with_component(
                lith("core").with("quality", 9.0),
            ),
        ])
        .unwrap();
        let merged = log.merge_by_attribute("quality", false).unwrap();
        assert!(no_overlaps(&merged));
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(0).unwrap().base().value(), 8.0);
        assert_eq!(
            merged.get(1).unwrap().primary().unwrap().get_text("lithology"),
            Some("core")
        );
        assert_eq!(merged.get(2).unwrap().top().value(), 12.0);
        assert_eq!(merged.get(2).unwrap().base().value(), 20.0);
    }

    #[test]
    fn buried_interval_disappears() {
        // The host outranks the contained interval: one piece remains.
        let log = Striplog::new(vec![
            Interval::new(0.0, 20.0).with_component(lith("host").with("quality", 9.0)),
            Interval::new(8.0, 12.0).with_component(lith("core").with("quality", 1.0)),
        ])
        .unwrap();
        let merged = log.merge_by_attribute("quality", false).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(0).unwrap().thickness(), 20.0);
    }

    #[test]
    fn chained_overlaps_rederive_boundaries() {
        let log = Striplog::new(vec![
            Interval::new(0.0, 10.0).with_component(lith("a").with("quality", 5.0)),
            Interval::new(6.0, 16.0).with_component(lith("b").with("quality", 7.0)),
            Interval::new(12.0, 22.0).with_component(lith("c").with("quality", 6.0)),
        ])
        .unwrap();
        let merged = log.merge_by_attribute("quality", false).unwrap();
        assert!(no_overlaps(&merged));
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(0).unwrap().base().value(), 6.0);
        assert_eq!(merged.get(1).unwrap().base().value(), 16.0);
        assert_eq!(merged.get(2).unwrap().top().value(), 16.0);
    }

    #[test]
    fn missing_attribute_ranks_lowest() {
        let log = Striplog::new(vec![
            Interval::new(0.0, 10.0).with_component(lith("rated").with("quality", 2.0)),
            Interval::new(5.0, 15.0).with_component(lith("unrated")),
        ])
        .unwrap();
        let merged = log.merge_by_attribute("quality", false).unwrap();
        assert_eq!(merged.get(0).unwrap().base().value(), 10.0);
        assert_eq!(merged.get(1).unwrap().top().value(), 10.0);
    }

    #[test]
    fn non_overlapping_log_is_unchanged_by_merge() {
        let log = Striplog::new(vec![
            Interval::new(0.0, 10.0).with_component(lith("a")),
            Interval::new(10.0, 20.0).with_component(lith("b")),
        ])
        .unwrap();
        let merged = log.merge_by_thickness(false).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(0).unwrap().base().value(), 10.0);
        assert_eq!(merged.get(1).unwrap().top().value(), 10.0);
    }

    #[test]
    fn point_intervals_drop_out_of_merge() {
        let log = Striplog::new(vec![
            Interval::new(0.0, 10.0).with_component(lith("a")),
            Interval::point(5.0),
        ])
        .unwrap();
        let merged = log.merge_by_thickness(false).unwrap();
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged.cum_thickness(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn merge_neighbours_unions_identical_runs() {
        let sst = lith("sandstone");
        let log = Striplog::new(vec![
            Interval::new(0.0, 5.0).with_component(sst.clone()),
            Interval::new(5.0, 9.0).with_component(sst.clone()),
            Interval::new(9.0, 12.0).with_component(lith("shale")),
            Interval::new(12.0, 15.0).with_component(sst.clone()),
        ])
        .unwrap();
        let merged = log.merge_neighbours();
        assert_eq!(merged.len(), 3);
        assert_relative_eq!(merged.get(0).unwrap().thickness(), 9.0, epsilon = 1e-12);
        // The separated sandstone stays separate.
        assert_eq!(merged.get(2).unwrap().top().value(), 12.0);
    }

    #[test]
    fn merge_neighbours_runs_of_three_collapse_in_one_pass() {
        let sst = lith("sandstone");
        let log = Striplog::new(vec![
            Interval::new(0.0, 2.0).with_component(sst.clone()),
            Interval::new(2.0, 4.0).with_component(sst.clone()),
            Interval::new(4.0, 6.0).with_component(sst),
        ])
        .unwrap();
        let merged = log.merge_neighbours();
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged.get(0).unwrap().thickness(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn merge_neighbours_requires_identical_component_lists() {
        let log = Striplog::new(vec![
            Interval::new(0.0, 5.0)
                .with_component(lith("sandstone"))
                .with_component(lith("shale")),
            Interval::new(5.0, 9.0).with_component(lith("sandstone")),
        ])
        .unwrap();
        assert_eq!(log.merge_neighbours().len(), 2);
    }

    #[test]
    fn merge_neighbours_ignores_gapped_pairs() {
        let sst = lith("sandstone");
        let log = Striplog::new(vec![
            Interval::new(0.0, 5.0).with_component(sst.clone()),
            Interval::new(7.0, 9.0).with_component(sst),
        ])
        .unwrap();
        assert_eq!(log.merge_neighbours().len(), 2);
    }
}
