//! Thin-interval removal with span redistribution.

use std::str::FromStr;

use tracing::debug;

use strata_interval::{Interval, Position, CONTIGUITY_TOL};

use crate::error::StriplogError;
use crate::striplog::Striplog;

/// What happens to the span freed by a pruned interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneMode {
    /// The freed span is left as a gap.
    Leave,
    /// The surviving interval above absorbs the span (its base moves down).
    Above,
    /// The surviving interval below absorbs the span (its top moves up).
    Below,
    /// The neighbours meet at the freed span's midpoint.
    Symmetric,
}

impl PruneMode {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static str = "leave, above, below, symmetric";
}

impl FromStr for PruneMode {
    type Err = StriplogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leave" => Ok(PruneMode::Leave),
            "above" => Ok(PruneMode::Above),
            "below" => Ok(PruneMode::Below),
            "symmetric" => Ok(PruneMode::Symmetric),
            _ => Err(StriplogError::UnknownMode {
                given: s.to_string(),
                valid: PruneMode::VALID,
            }),
        }
    }
}

impl Striplog {
    /// Removes every interval thinner than `limit` and redistributes the
    /// freed spans per `mode`.
    ///
    /// Consecutive removed intervals free one combined span. A freed span
    /// is redistributed only to surviving neighbours that actually touch
    /// it; where the required neighbour is missing (at the ends of the log,
    /// or across a pre-existing gap) the span is left open. With touching
    /// neighbours, `Symmetric` conserves total thickness exactly.
    ///
    /// # Errors
    ///
    /// - [`StriplogError::InvalidLimit`] if `limit` is not finite and
    ///   positive.
    /// - [`StriplogError::EmptyLog`] if nothing survives.
    pub fn prune(&self, limit: f64, mode: PruneMode) -> Result<Striplog, StriplogError> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(StriplogError::InvalidLimit { limit });
        }

        let sorted = self.sorted().intervals;
        let mut out: Vec<Interval> = Vec::with_capacity(sorted.len());
        // Freed spans not yet redistributed; only the last can touch the
        // next survivor.
        let mut freed: Vec<(f64, f64)> = Vec::new();
        let mut removed = 0usize;

        for iv in sorted {
            if iv.thickness() < limit {
                removed += 1;
                let (t, b) = (iv.top().value(), iv.base().value());
                match freed.last_mut() {
                    // Extend a touching freed run.
                    Some(run) if (t - run.1).abs() <= CONTIGUITY_TOL => run.1 = run.1.max(b),
                    _ => freed.push((t, b)),
                }
            } else {
                let mut survivor = iv;
                for &(t, b) in &freed {
                    redistribute(mode, (t, b), out.last_mut(), Some(&mut survivor));
                }
                freed.clear();
                out.push(survivor);
            }
        }
        // Trailing freed spans have no survivor below.
        for &(t, b) in &freed {
            redistribute(mode, (t, b), out.last_mut(), None);
        }

        if removed > 0 {
            debug!(removed, ?mode, limit, "pruned thin intervals");
        }
        if out.is_empty() {
            return Err(StriplogError::EmptyLog);
        }
        Ok(Striplog { intervals: out })
    }
}

/// Hands the freed span `(t, b)` to the touching neighbours, per `mode`.
fn redistribute(
    mode: PruneMode,
    (t, b): (f64, f64),
    above: Option<&mut Interval>,
    below: Option<&mut Interval>,
) {
    let above_touches = above
        .as_ref()
        .is_some_and(|iv| (iv.base().value() - t).abs() <= CONTIGUITY_TOL);
    let below_touches = below
        .as_ref()
        .is_some_and(|iv| (iv.top().value() - b).abs() <= CONTIGUITY_TOL);

    match mode {
        PruneMode::Leave => {}
        PruneMode::Above => {
            if above_touches {
                let iv = above.expect("touch test implies presence");
                *iv = iv.clone().with_base(Position::new(b));
            }
        }
        PruneMode::Below => {
            if below_touches {
                let iv = below.expect("touch test implies presence");
                *iv = iv.clone().with_top(Position::new(t));
            }
        }
        PruneMode::Symmetric => {
            let mid = (t + b) / 2.0;
            if above_touches {
                let iv = above.expect("touch test implies presence");
                *iv = iv.clone().with_base(Position::new(mid));
            }
            if below_touches {
                let iv = below.expect("touch test implies presence");
                *iv = iv.clone().with_top(Position::new(mid));
            }
        }
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

    fn log(ranges: &[(f64, f64)]) -> Striplog {
        Striplog::new(
            ranges
                .iter()
                .enumerate()
                .map(|(i, &(t, b))| Interval::new(t, b).with_component(lith(&format!("unit{i}"))))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn leave_mode_leaves_a_gap() {
        let pruned = log(&[(0.0, 10.0), (10.0, 10.5), (10.5, 20.0)])
            .prune(1.0, PruneMode::Leave)
            .unwrap();
        assert_eq!(pruned.len(), 2);
        let gaps = pruned.find_gaps();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].top().value(), 10.0);
        assert_eq!(gaps[0].base().value(), 10.5);
    }

    #[test]
    fn above_absorbs_downward() {
        let pruned = log(&[(0.0, 10.0), (10.0, 10.5), (10.5, 20.0)])
            .prune(1.0, PruneMode::Above)
            .unwrap();
        assert_eq!(pruned.get(0).unwrap().base().value(), 10.5);
        assert_eq!(pruned.get(1).unwrap().top().value(), 10.5);
        assert!(pruned.find_gaps().is_empty());
    }

    #[test]
    fn below_absorbs_upward() {
        let pruned = log(&[(0.0, 10.0), (10.0, 10.5), (10.5, 20.0)])
            .prune(1.0, PruneMode::Below)
            .unwrap();
        assert_eq!(pruned.get(0).unwrap().base().value(), 10.0);
        assert_eq!(pruned.get(1).unwrap().top().value(), 10.0);
    }

    #[test]
    fn symmetric_conserves_total_thickness() {
        let src = log(&[(0.0, 2.0), (2.0, 2.5), (2.5, 5.0)]);
        let pruned = src.prune(1.0, PruneMode::Symmetric).unwrap();
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned.get(0).unwrap().base().value(), 2.25);
        assert_eq!(pruned.get(1).unwrap().top().value(), 2.25);
        assert_relative_eq!(pruned.cum_thickness(), src.cum_thickness(), epsilon = 1e-12);
    }

    #[test]
    fn consecutive_thin_intervals_free_one_span() {
        let pruned = log(&[(0.0, 10.0), (10.0, 10.4), (10.4, 10.8), (10.8, 20.0)])
            .prune(1.0, PruneMode::Symmetric)
            .unwrap();
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned.get(0).unwrap().base().value(), 10.4);
        assert_eq!(pruned.get(1).unwrap().top().value(), 10.4);
        assert_relative_eq!(pruned.cum_thickness(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_neighbour_leaves_span_open() {
        // Thin interval at the top of the log: nothing above to absorb it.
        let pruned = log(&[(0.0, 0.5), (0.5, 10.0)])
            .prune(1.0, PruneMode::Above)
            .unwrap();
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned.get(0).unwrap().top().value(), 0.5);
    }

    #[test]
    fn non_touching_neighbour_is_not_extended() {
        // Pre-existing gap between the survivor and the thin interval.
        let pruned = log(&[(0.0, 10.0), (12.0, 12.5), (12.5, 20.0)])
            .prune(1.0, PruneMode::Above)
            .unwrap();
        // (0, 10) does not touch (12, 12.5), so it must not grow.
        assert_eq!(pruned.get(0).unwrap().base().value(), 10.0);
        assert_eq!(pruned.get(1).unwrap().top().value(), 12.5);
    }

    #[test]
    fn invalid_limit_is_rejected() {
        let l = log(&[(0.0, 10.0)]);
        assert!(matches!(
            l.prune(0.0, PruneMode::Leave).unwrap_err(),
            StriplogError::InvalidLimit { .. }
        ));
        assert!(matches!(
            l.prune(f64::NAN, PruneMode::Leave).unwrap_err(),
            StriplogError::InvalidLimit { .. }
        ));
    }

    #[test]
    fn pruning_everything_is_empty_log() {
        let l = log(&[(0.0, 0.5), (0.5, 0.9)]);
        assert_eq!(
            l.prune(1.0, PruneMode::Leave).unwrap_err(),
            StriplogError::EmptyLog
        );
    }

    #[test]
    fn points_are_always_pruned() {
        let pruned = Striplog::new(vec![
            Interval::new(0.0, 10.0).with_component(lith("a")),
            Interval::point(5.0),
        ])
        .unwrap()
        .prune(0.1, PruneMode::Leave)
        .unwrap();
        assert_eq!(pruned.len(), 1);
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("above".parse::<PruneMode>().unwrap(), PruneMode::Above);
        assert_eq!("symmetric".parse::<PruneMode>().unwrap(), PruneMode::Symmetric);
        let e = "up".parse::<PruneMode>().unwrap_err();
        assert!(e.to_string().contains("leave, above, below, symmetric"));
    }
}
