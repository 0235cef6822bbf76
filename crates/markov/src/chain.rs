//! The empirical Markov chain: per-lag transition counts, probabilities
//! and randomness statistics.

use std::collections::BTreeSet;

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

use strata_interval::Component;
use strata_log::Striplog;

use crate::config::ChainConfig;
use crate::counts::{CountMatrix, Matrix};
use crate::error::MarkovError;

const EPSILON: f64 = 1e-12;

/// A chi-squared report on the randomness of the observed sequence.
///
/// If `statistic > critical`, the hypothesis that the sequence is randomly
/// ordered can be rejected at the confidence level the report was built
/// with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chi2 {
    /// The chi-squared statistic over observed vs expected counts.
    pub statistic: f64,
    /// The critical value at the requested confidence level.
    pub critical: f64,
    /// Where `statistic` falls on the chi-squared CDF.
    pub percentile: f64,
    /// Degrees of freedom used.
    pub dof: usize,
}

/// An empirical Markov chain over an ordered sequence of states.
///
/// Built from the sequence itself
/// ([`from_sequence`](MarkovChain::from_sequence)) or from the
/// depth-ordered primary components of a striplog
/// ([`from_striplog`](MarkovChain::from_striplog)). The chain holds one
/// count matrix per lag in `1..=max_lag`: at lag `L`, every pair
/// `(seq[t], seq[t + L])` is counted.
///
/// Self-transitions are governed solely by the config's `include_self`
/// flag: when true (the default), a state genuinely following itself is
/// counted at every lag; when false, self-pairs are skipped at every lag.
///
/// States are the sorted distinct elements of the sequence; matrix indices
/// refer to that order ([`states`](MarkovChain::states)).
#[derive(Debug, Clone)]
pub struct MarkovChain<S> {
    states: Vec<S>,
    counts: Vec<CountMatrix>,
    include_self: bool,
}

impl<S: Clone + Ord> MarkovChain<S> {
    /// Builds a chain from an ordered state sequence.
    ///
    /// # Errors
    ///
    /// - [`MarkovError::ZeroMaxLag`] for an invalid config.
    /// - [`MarkovError::EmptySequence`] for an empty sequence.
    /// - [`MarkovError::InsufficientData`] when the sequence is shorter
    ///   than `max_lag + 1`.
    pub fn from_sequence(seq: &[S], config: &ChainConfig) -> Result<Self, MarkovError> {
        config.validate()?;
        if seq.is_empty() {
            return Err(MarkovError::EmptySequence);
        }
        let min = config.max_lag() + 1;
        if seq.len() < min {
            return Err(MarkovError::InsufficientData { n: seq.len(), min });
        }

        let states: Vec<S> = seq
            .iter()
            .cloned()
            .collect::<BTreeSet<S>>()
            .into_iter()
            .collect();
        let index = |s: &S| {
            states
                .binary_search(s)
                .expect("every state comes from the sequence")
        };

        let mut counts = Vec::with_capacity(config.max_lag());
        for lag in 1..=config.max_lag() {
            let mut matrix = CountMatrix::zeros(states.len());
            for t in 0..seq.len() - lag {
                let i = index(&seq[t]);
                let j = index(&seq[t + lag]);
                if i == j && !config.include_self() {
                    continue;
                }
                matrix.increment(i, j);
            }
            counts.push(matrix);
        }

        debug!(
            states = states.len(),
            observations = seq.len(),
            max_lag = config.max_lag(),
            "built markov chain"
        );
        Ok(Self {
            states,
            counts,
            include_self: config.include_self(),
        })
    }

    /// The distinct states, sorted; matrix indices refer to this order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// The number of distinct states.
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// The largest lag the chain was built with.
    pub fn max_lag(&self) -> usize {
        self.counts.len()
    }

    /// Whether self-transitions were counted.
    pub fn include_self(&self) -> bool {
        self.include_self
    }

    /// The observed transition counts at `lag`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::InvalidLag`] outside `1..=max_lag`.
    pub fn observed_counts(&self, lag: usize) -> Result<&CountMatrix, MarkovError> {
        self.counts
            .get(lag.wrapping_sub(1))
            .ok_or(MarkovError::InvalidLag {
                lag,
                max_lag: self.max_lag(),
            })
    }

    /// The row-stochastic transition probabilities at `lag`.
    ///
    /// Each row sums to 1, except rows for states with no observed
    /// outgoing transition, which stay all-zero; those states are listed
    /// by [`zero_outgoing`](MarkovChain::zero_outgoing).
    pub fn probabilities(&self, lag: usize) -> Result<Matrix, MarkovError> {
        Ok(self.observed_counts(lag)?.to_probabilities())
    }

    /// The states with no observed outgoing transition at `lag`.
    pub fn zero_outgoing(&self, lag: usize) -> Result<Vec<&S>, MarkovError> {
        let counts = self.observed_counts(lag)?;
        Ok(self
            .states
            .iter()
            .enumerate()
            .filter(|&(i, _)| counts.row_total(i) == 0)
            .map(|(_, s)| s)
            .collect())
    }

    /// The marginal state frequencies, estimated from the lag-1 counts as
    /// `max(outgoing, incoming)` per state, normalized. All-zero when no
    /// transitions were observed.
    pub fn state_frequencies(&self) -> Vec<f64> {
        let counts = &self.counts[0];
        let weights: Vec<f64> = (0..self.n_states())
            .map(|i| counts.row_total(i).max(counts.col_total(i)) as f64)
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return vec![0.0; self.n_states()];
        }
        weights.into_iter().map(|w| w / total).collect()
    }

    /// The expected counts at `lag` under the hypothesis of a randomly
    /// ordered sequence.
    ///
    /// With self-transitions included this is the independent-trials
    /// expectation `row_i * col_j / total`. With a hollow matrix the
    /// margins no longer factorize and the iterative method of
    /// Powers & Easterling (1982) is used instead, with the diagonal held
    /// at zero.
    pub fn expected_counts(&self, lag: usize) -> Result<Matrix, MarkovError> {
        let observed = self.observed_counts(lag)?;
        let n = observed.n_states();
        let total = observed.total() as f64;
        let mut expected = Matrix::zeros(n);
        if total == 0.0 {
            return Ok(expected);
        }

        if self.include_self {
            for i in 0..n {
                for j in 0..n {
                    let e = observed.row_total(i) as f64 * observed.col_total(j) as f64 / total;
                    expected.set(i, j, e);
                }
            }
            return Ok(expected);
        }

        if n < 2 {
            return Err(MarkovError::InsufficientStates { n, min: 2 });
        }
        let (a, b) = powers_easterling(observed);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let e = a[i] * b[j];
                expected.set(i, j, if e.is_finite() { e } else { 0.0 });
            }
        }
        Ok(expected)
    }

    /// The normalized difference `(observed - expected) / sqrt(expected)`
    /// at `lag`: which transitions occur more (positive) or less
    /// (negative) often than a random ordering predicts.
    pub fn normalized_difference(&self, lag: usize) -> Result<Matrix, MarkovError> {
        let observed = self.observed_counts(lag)?;
        let expected = self.expected_counts(lag)?;
        let n = observed.n_states();
        let mut out = Matrix::zeros(n);
        for i in 0..n {
            for j in 0..n {
                let o = observed.get(i, j) as f64;
                let e = expected.get(i, j);
                out.set(i, j, (o - e) / (e + EPSILON).sqrt());
            }
        }
        Ok(out)
    }

    /// The chi-squared statistic at `lag`, with the critical value at
    /// confidence level `q` (e.g. 0.95) and the statistic's percentile.
    ///
    /// Degrees of freedom are `(m - 1)^2` with self-transitions included,
    /// `(m - 1)^2 - m` for a hollow matrix, over `m` states.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::InsufficientStates`] when the degrees of
    /// freedom would not be positive.
    pub fn chi_squared(&self, lag: usize, q: f64) -> Result<Chi2, MarkovError> {
        let observed = self.observed_counts(lag)?;
        let expected = self.expected_counts(lag)?;
        let m = self.n_states();
        let (dof, min_states) = if self.include_self {
            ((m as i64 - 1).pow(2), 2)
        } else {
            ((m as i64 - 1).pow(2) - m as i64, 3)
        };
        if dof < 1 {
            return Err(MarkovError::InsufficientStates {
                n: m,
                min: min_states,
            });
        }

        let mut statistic = 0.0;
        for i in 0..m {
            for j in 0..m {
                let o = observed.get(i, j) as f64;
                let e = expected.get(i, j);
                statistic += (o - e) * (o - e) / (e + EPSILON);
            }
        }

        let dist = ChiSquared::new(dof as f64).expect("dof is at least 1");
        Ok(Chi2 {
            statistic,
            critical: dist.inverse_cdf(q),
            percentile: dist.cdf(statistic),
            dof: dof as usize,
        })
    }
}

impl MarkovChain<Component> {
    /// Builds a chain from the depth-ordered primary components of a
    /// striplog. Intervals without a primary contribute the empty
    /// component as their state.
    pub fn from_striplog(log: &Striplog, config: &ChainConfig) -> Result<Self, MarkovError> {
        let seq: Vec<Component> = log
            .sorted()
            .iter()
            .map(|iv| iv.primary().cloned().unwrap_or_default())
            .collect();
        Self::from_sequence(&seq, config)
    }
}

/// One round of the Powers & Easterling fixed-point iteration for the
/// expected counts of a hollow contingency matrix. Returns the row and
/// column factors `(a, b)` with `E[i][j] = a[i] * b[j]` off the diagonal.
fn powers_easterling(observed: &CountMatrix) -> (Vec<f64>, Vec<f64>) {
    const MAX_ITER: usize = 100;
    const TOL: f64 = 1e-3;

    let n = observed.n_states();
    let rows: Vec<f64> = (0..n).map(|i| observed.row_total(i) as f64).collect();
    let cols: Vec<f64> = (0..n).map(|j| observed.col_total(j) as f64).collect();

    let mut a: Vec<f64> = rows.iter().map(|r| r / (n as f64 - 1.0)).collect();
    let mut b: Vec<f64> = vec![0.0; n];

    for _ in 0..MAX_ITER {
        let sum_a: f64 = a.iter().sum();
        let new_b: Vec<f64> = cols
            .iter()
            .zip(&a)
            .map(|(c, ai)| c / (sum_a - ai + EPSILON))
            .collect();
        let sum_b: f64 = new_b.iter().sum();
        let new_a: Vec<f64> = rows
            .iter()
            .zip(&new_b)
            .map(|(r, bj)| r / (sum_b - bj + EPSILON))
            .collect();

        let step = |old: &[f64], new: &[f64]| {
            old.iter()
                .zip(new)
                .map(|(o, n)| (o - n).abs() / (n.abs() + EPSILON))
                .fold(0.0_f64, f64::max)
        };
        let converged = step(&a, &new_a) < TOL && step(&b, &new_b) < TOL;
        a = new_a;
        b = new_b;
        if converged {
            break;
        }
    }
    (a, b)
}
