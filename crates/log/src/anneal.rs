//! Gap-filling: extend neighbouring intervals to close unclassified spans.

use std::str::FromStr;

use tracing::debug;

use strata_interval::{Component, Interval, Position};

use crate::error::StriplogError;
use crate::striplog::Striplog;

/// Which way intervals flood into a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnealMode {
    /// The interval below a gap extends upward to close it.
    FloodUp,
    /// The interval above a gap extends downward to close it.
    FloodDown,
    /// Both neighbours meet at the gap's midpoint.
    Symmetric,
}

impl AnnealMode {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static str = "flood_up, flood_down, symmetric";
}

impl FromStr for AnnealMode {
    type Err = StriplogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flood_up" => Ok(AnnealMode::FloodUp),
            "flood_down" => Ok(AnnealMode::FloodDown),
            "symmetric" => Ok(AnnealMode::Symmetric),
            _ => Err(StriplogError::UnknownMode {
                given: s.to_string(),
                valid: AnnealMode::VALID,
            }),
        }
    }
}

impl Striplog {
    /// Closes every gap by extending the neighbouring intervals, per
    /// `mode`. Overlapping intervals are untouched: annealing acts on true
    /// gaps only, and a second pass is a no-op (there is nothing left to
    /// close).
    ///
    /// The returned striplog is depth-sorted. Boundary positions created by
    /// annealing have degenerate uncertainty bounds.
    pub fn anneal(&self, mode: AnnealMode) -> Striplog {
        let mut ivs = self.sorted().intervals;

        // Index of the interval holding the coverage frontier (deepest base
        // seen so far).
        let mut frontier_idx = 0;
        let mut closed = 0usize;
        for i in 1..ivs.len() {
            let frontier = ivs[frontier_idx].base().value();
            let top = ivs[i].top().value();
            if top > frontier {
                match mode {
                    AnnealMode::FloodUp => {
                        ivs[i] = ivs[i].clone().with_top(Position::new(frontier));
                    }
                    AnnealMode::FloodDown => {
                        ivs[frontier_idx] =
                            ivs[frontier_idx].clone().with_base(Position::new(top));
                    }
                    AnnealMode::Symmetric => {
                        let mid = (frontier + top) / 2.0;
                        ivs[frontier_idx] =
                            ivs[frontier_idx].clone().with_base(Position::new(mid));
                        ivs[i] = ivs[i].clone().with_top(Position::new(mid));
                    }
                }
                closed += 1;
            }
            if ivs[i].base().value() > ivs[frontier_idx].base().value() {
                frontier_idx = i;
            }
        }
        if closed > 0 {
            debug!(gaps = closed, ?mode, "annealed gaps");
        }
        Striplog { intervals: ivs }
    }

    /// Fills every gap with a new interval carrying `component` (or no
    /// component), leaving all existing intervals alone. The result is
    /// depth-sorted.
    pub fn fill(&self, component: Option<Component>) -> Striplog {
        let gaps = self.find_gaps();
        if gaps.is_empty() {
            return self.clone();
        }
        let mut intervals = self.intervals.clone();
        for gap in gaps {
            intervals.push(match &component {
                Some(c) => gap.with_component(c.clone()),
                None => gap,
            });
        }
        intervals.sort_by(Interval::depth_order);
        Striplog { intervals }
    }
}
