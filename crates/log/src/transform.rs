//! Whole-log depth transforms: shifting and cropping.

use strata_interval::Position;

use crate::error::StriplogError;
use crate::striplog::Striplog;

impl Striplog {
    /// Moves the whole log by `delta`, uncertainty bounds included.
    pub fn shift(&self, delta: f64) -> Striplog {
        Striplog {
            intervals: self.intervals.iter().map(|iv| iv.shifted(delta)).collect(),
        }
    }

    /// Moves the whole log so that its shallowest top sits at `start`.
    pub fn shift_to(&self, start: f64) -> Striplog {
        self.shift(start - self.start().value())
    }

    /// Restricts the log to the window `[lo, hi]`, trimming intervals that
    /// straddle a window edge. Point intervals inside the window survive.
    ///
    /// # Errors
    ///
    /// - [`StriplogError::InvalidWindow`] if `lo >= hi` or either edge is
    ///   non-finite.
    /// - [`StriplogError::EmptyLog`] when nothing of the log lies in the
    ///   window.
    pub fn crop(&self, lo: f64, hi: f64) -> Result<Striplog, StriplogError> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(StriplogError::InvalidWindow { lo, hi });
        }
        let mut out = Vec::new();
        for iv in &self.intervals {
            let top = iv.top().value();
            let base = iv.base().value();
            if base < lo || top > hi {
                continue;
            }
            let mut piece = iv.clone();
            if top < lo {
                piece = piece.with_top(Position::new(lo));
            }
            if base > hi {
                piece = piece.with_base(Position::new(hi));
            }
            // Straddling intervals trimmed to nothing are dropped; genuine
            // points inside the window are kept.
            if piece.is_point() && !iv.is_point() {
                continue;
            }
            out.push(piece);
        }
        if out.is_empty() {
            return Err(StriplogError::EmptyLog);
        }
        Ok(Striplog { intervals: out })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_interval::Component;

    fn log() -> Striplog {
        let sst = Component::new().with("lithology", "sandstone");
        Striplog::new(vec![
            Interval::new(10.0, 20.0).with_component(sst.clone()),
            Interval::new(20.0, 35.0).with_component(sst),
        ])
        .unwrap()
    }

    #[test]
    fn shift_moves_everything() {
        let shifted = log().shift(-10.0);
        assert_eq!(shifted.start().value(), 0.0);
        assert_eq!(shifted.stop().value(), 25.0);
        assert_relative_eq!(shifted.cum_thickness(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn shift_to_places_the_start() {
        let shifted = log().shift_to(100.0);
        assert_eq!(shifted.start().value(), 100.0);
        assert_eq!(shifted.stop().value(), 125.0);
    }

    #[test]
    fn crop_trims_straddlers() {
        let cropped = log().crop(15.0, 25.0).unwrap();
        assert_eq!(cropped.len(), 2);
        assert_eq!(cropped.get(0).unwrap().top().value(), 15.0);
        assert_eq!(cropped.get(0).unwrap().base().value(), 20.0);
        assert_eq!(cropped.get(1).unwrap().base().value(), 25.0);
    }

    #[test]
    fn crop_drops_outside_intervals() {
        let cropped = log().crop(0.0, 15.0).unwrap();
        assert_eq!(cropped.len(), 1);
        assert_eq!(cropped.get(0).unwrap().base().value(), 15.0);
    }

    #[test]
    fn crop_keeps_interior_points() {
        let l = Striplog::new(vec![Interval::point(12.0), Interval::new(0.0, 30.0)]).unwrap();
        let cropped = l.crop(10.0, 20.0).unwrap();
        assert_eq!(cropped.len(), 2);
        assert!(cropped.get(0).unwrap().is_point());
    }

    #[test]
    fn crop_rejects_bad_windows() {
        assert!(matches!(
            log().crop(20.0, 20.0).unwrap_err(),
            StriplogError::InvalidWindow { .. }
        ));
        assert!(matches!(
            log().crop(f64::NAN, 20.0).unwrap_err(),
            StriplogError::InvalidWindow { .. }
        ));
    }

    #[test]
    fn crop_missing_everything_is_empty() {
        assert_eq!(log().crop(100.0, 200.0).unwrap_err(), StriplogError::EmptyLog);
    }

    #[test]
    fn crop_does_not_mutate_receiver() {
        let l = log();
        let _ = l.crop(15.0, 25.0).unwrap();
        assert_eq!(l.start().value(), 10.0);
        assert_eq!(l.stop().value(), 35.0);
    }
}
