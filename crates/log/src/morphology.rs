//! Binary morphology over a boolean-attribute projection of the log, and
//! the net-to-gross ratio.

use std::str::FromStr;

use tracing::warn;

use strata_interval::{Component, Interval};

use crate::error::StriplogError;
use crate::striplog::Striplog;

/// The four 1-D morphological operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// Shrinks true runs by the structuring length.
    Erosion,
    /// Extends true runs by the structuring length.
    Dilation,
    /// Erosion then dilation: removes short true runs.
    Opening,
    /// Dilation then erosion: closes short false runs.
    Closing,
}

impl MorphOp {
    /// The accepted spellings, for error messages.
    pub const VALID: &'static str = "erosion, dilation, opening, closing";
}

impl FromStr for MorphOp {
    type Err = StriplogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erosion" => Ok(MorphOp::Erosion),
            "dilation" => Ok(MorphOp::Dilation),
            "opening" => Ok(MorphOp::Opening),
            "closing" => Ok(MorphOp::Closing),
            _ => Err(StriplogError::UnknownMode {
                given: s.to_string(),
                valid: MorphOp::VALID,
            }),
        }
    }
}

impl Striplog {
    /// Projects the log onto boolean samples spaced `step` apart, reading
    /// the attribute `attr` of the primary component at each sample's
    /// midpoint. Samples falling in a gap, or on an interval whose primary
    /// has no boolean `attr`, read false (and are counted in a single
    /// `warn`).
    ///
    /// # Errors
    ///
    /// [`StriplogError::InvalidSampling`] for a non-positive or non-finite
    /// step; [`StriplogError::ZeroThickness`] when the log has no extent to
    /// sample.
    pub fn binary_log(&self, attr: &str, step: f64) -> Result<Vec<bool>, StriplogError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(StriplogError::InvalidSampling { step, element: 1 });
        }
        let start = self.start().value();
        let stop = self.stop().value();
        if stop <= start {
            return Err(StriplogError::ZeroThickness);
        }

        let sorted = self.sorted();
        let n = ((stop - start) / step).ceil() as usize;
        let mut bits = Vec::with_capacity(n);
        let mut undefined = 0usize;
        for i in 0..n {
            let d = (start + (i as f64 + 0.5) * step).min(stop);
            let flag = sorted
                .iter()
                .find(|iv| iv.spans(d))
                .and_then(Interval::primary)
                .and_then(|c| c.get_bool(attr));
            if flag.is_none() {
                undefined += 1;
            }
            bits.push(flag.unwrap_or(false));
        }
        if undefined > 0 {
            warn!(
                undefined,
                attr, "samples with no boolean attribute read as false"
            );
        }
        Ok(bits)
    }

    /// Applies a binary morphological operator to the log.
    ///
    /// The log is projected through [`binary_log`](Striplog::binary_log),
    /// filtered with a boxcar structuring element of `element` samples,
    /// and reconstituted: each true/false run becomes one interval whose
    /// single component carries the boolean attribute `attr`.
    ///
    /// The structuring window is clamped at the log's ends: this is a
    /// bounded line, not a ring, so nothing wraps around and an all-true
    /// (or all-false) log is a fixed point of every operator.
    ///
    /// # Errors
    ///
    /// [`StriplogError::InvalidSampling`] for a bad `step` or a zero-length
    /// structuring element; [`StriplogError::ZeroThickness`] when the log
    /// has no extent.
    pub fn binary_morphology(
        &self,
        attr: &str,
        op: MorphOp,
        step: f64,
        element: usize,
    ) -> Result<Striplog, StriplogError> {
        if element == 0 || !step.is_finite() || step <= 0.0 {
            return Err(StriplogError::InvalidSampling { step, element });
        }
        let bits = self.binary_log(attr, step)?;
        let filtered = match op {
            MorphOp::Erosion => erode(&bits, element),
            MorphOp::Dilation => dilate(&bits, element),
            MorphOp::Opening => dilate(&erode(&bits, element), element),
            MorphOp::Closing => erode(&dilate(&bits, element), element),
        };

        let start = self.start().value();
        let stop = self.stop().value();
        let mut intervals = Vec::new();
        let mut run_start = 0usize;
        for i in 1..=filtered.len() {
            if i == filtered.len() || filtered[i] != filtered[run_start] {
                let top = start + run_start as f64 * step;
                let base = if i == filtered.len() {
                    stop
                } else {
                    start + i as f64 * step
                };
                intervals.push(
                    Interval::new(top, base)
                        .with_component(Component::new().with(attr, filtered[run_start])),
                );
                run_start = i;
            }
        }
        Striplog::new(intervals)
    }

    /// The ratio of flagged thickness to total thickness: the summed
    /// thickness of intervals whose primary has `attr == true`, over the
    /// summed thickness of all intervals. Intervals without the attribute
    /// count as unflagged.
    ///
    /// # Errors
    ///
    /// Returns [`StriplogError::ZeroThickness`] when the total thickness is
    /// zero (a log of points), rather than letting a NaN propagate.
    pub fn net_to_gross(&self, attr: &str) -> Result<f64, StriplogError> {
        let mut net = 0.0;
        let mut total = 0.0;
        for iv in &self.intervals {
            total += iv.thickness();
            if iv.primary().and_then(|c| c.get_bool(attr)) == Some(true) {
                net += iv.thickness();
            }
        }
        if total == 0.0 {
            return Err(StriplogError::ZeroThickness);
        }
        Ok(net / total)
    }
}

/// Clamped-window dilation: true wherever any sample in the window is true.
fn dilate(bits: &[bool], element: usize) -> Vec<bool> {
    filter(bits, element, |window| window.iter().any(|&b| b))
}

/// Clamped-window erosion: true only where every sample in the window is.
fn erode(bits: &[bool], element: usize) -> Vec<bool> {
    filter(bits, element, |window| window.iter().all(|&b| b))
}

fn filter(bits: &[bool], element: usize, rule: impl Fn(&[bool]) -> bool) -> Vec<bool> {
    if element <= 1 || bits.is_empty() {
        return bits.to_vec();
    }
    let n = bits.len();
    // Centre the boxcar; an even element reaches one further down.
    let reach_up = (element - 1) / 2;
    let reach_down = element / 2;
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(reach_up);
            let hi = (i + reach_down).min(n - 1);
            rule(&bits[lo..=hi])
        })
        .collect()
}
