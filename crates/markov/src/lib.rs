//! Empirical Markov chains over interval-log classifications.
//!
//! This crate turns an ordered sequence of states — typically the
//! depth-ordered primary components of a
//! [`Striplog`](strata_log::Striplog) — into transition-count and
//! transition-probability matrices, with the classic sequence-randomness
//! statistics on top.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  sequence    │────▶│  count pairs   │────▶│  probabilities,  │
//!  │  (states)    │     │  per lag       │     │  chi², generate  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! Self-transition policy: a state genuinely following itself in the
//! sequence is a real transition and is counted at every lag, unless the
//! config sets `include_self` to false, which excludes self-pairs at every
//! lag. There is no lag-dependent special case.
//!
//! # Quick start
//!
//! ```rust
//! use strata_markov::{ChainConfig, MarkovChain};
//!
//! let seq: Vec<&str> = vec!["sst", "sst", "mud", "sst"];
//! let chain = MarkovChain::from_sequence(&seq, &ChainConfig::new())?;
//!
//! let p = chain.probabilities(1)?;
//! // "sst" follows itself half the time in this sequence.
//! assert_eq!(p.get(1, 1), 0.5);
//! # Ok::<(), strata_markov::MarkovError>(())
//! ```

pub mod chain;
pub mod config;
pub mod counts;
pub mod error;
pub mod generate;

pub use chain::{Chi2, MarkovChain};
pub use config::ChainConfig;
pub use counts::{CountMatrix, Matrix};
pub use error::MarkovError;
