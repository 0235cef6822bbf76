//! Random sequence generation from a chain's lag-1 probabilities.

use crate::chain::MarkovChain;
use crate::error::MarkovError;

impl<S: Clone + Ord> MarkovChain<S> {
    /// Generates `n` states by walking the lag-1 transition probabilities.
    ///
    /// The walk begins after `start`; when `start` is `None`, the initial
    /// state is drawn from the marginal state frequencies. The returned
    /// sequence has exactly `n` states and does not include the start
    /// state itself.
    ///
    /// # Errors
    ///
    /// - [`MarkovError::UnknownState`] when `start` is not one of the
    ///   chain's states.
    /// - [`MarkovError::NoTransitions`] when the chain observed no
    ///   transitions to draw an initial state from.
    /// - [`MarkovError::NoOutgoingTransitions`] when the walk reaches a
    ///   state that was never observed transitioning onward.
    pub fn generate(
        &self,
        n: usize,
        start: Option<&S>,
        rng: &mut impl rand::Rng,
    ) -> Result<Vec<S>, MarkovError> {
        let probs = self.probabilities(1)?;
        let mut current = match start {
            Some(s) => self
                .states()
                .binary_search(s)
                .map_err(|_| MarkovError::UnknownState)?,
            None => {
                sample_weighted(&self.state_frequencies(), rng).ok_or(MarkovError::NoTransitions)?
            }
        };

        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let next = sample_weighted(probs.row(current), rng).ok_or(
                MarkovError::NoOutgoingTransitions {
                    state_index: current,
                },
            )?;
            out.push(self.states()[next].clone());
            current = next;
        }
        Ok(out)
    }
}

/// Draws an index proportionally to `weights` via the cumulative
/// distribution. Returns `None` when the weights sum to zero. Entries with
/// zero weight are never drawn.
fn sample_weighted(weights: &[f64], rng: &mut impl rand::Rng) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let u: f64 = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            last_positive = Some(i);
        }
        cumulative += w;
        if cumulative > u && w > 0.0 {
            return Some(i);
        }
    }
    // Floating-point rounding can leave u just above the final cumulative.
    last_positive
}
