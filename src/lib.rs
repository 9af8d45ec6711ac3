//! # vose_alias
//!
//! Constant-time sampling from a fixed discrete distribution.
//!
//! This crate implements
//! [Vose's Alias Method](https://www.keithschwarz.com/darts-dice-coins/):
//! an O(n) pass turns a set of weighted outcomes into two parallel tables
//! (probability and alias), after which each draw costs one uniform column
//! pick plus one coin flip, no matter how many outcomes there are or how
//! skewed their weights.
//!
//! The pipeline is strictly linear:
//!
//! 1. [`normalize`] turns `(outcome, weight)` pairs into a [`Distribution`].
//! 2. [`build`] (or [`build_with`] and a [`BuildConfig`]) turns the distribution
//!    into [`AliasTables`].
//! 3. [`draw_one`] / [`draw_n`] (or the methods on [`AliasTables`]) sample it.
//!
//! ## Quick start
//!
//! ```rust
//! use rand::{SeedableRng, rngs::StdRng};
//! use vose_alias::{build, draw_n, normalize};
//!
//! # fn main() -> Result<(), vose_alias::AliasError> {
//! let dist = normalize([("common", 60.0), ("rare", 9.0), ("legendary", 1.0)])?;
//! let tables = build(&dist)?;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let draws = draw_n(&tables, &mut rng, 1_000)?;
//! assert_eq!(draws.len(), 1_000);
//! # Ok(()) }
//! ```
//!
//! ## Enum outcomes
//!
//! With the `derive` feature (on by default):
//!
//! ```rust,ignore
//! use vose_alias::WeightedOutcome;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, WeightedOutcome)]
//! enum Loot {
//!     #[weight(60)] Common,
//!     #[weight(30)] Uncommon,
//!     #[weight(1/10)] Legendary,
//! }
//!
//! let tables = Loot::alias_tables()?;
//! let item: Loot = tables.sample_owned(&mut rand::rng());
//! ```
//!
//! ## Performance
//! * **Build**: O(n) time, O(n) space.
//! * **Sample**: O(1) per draw (2 random numbers, 1 branch).
//! * With the `parallel` feature, [`draw_n_par`] spreads large draws over rayon.
//!
//! ## Gotchas
//! * Weights must be finite and non-negative, and not all zero.
//! * Outcomes must be distinct.
//! * Tables are immutable. If the weights change, build new tables.
//! * Seeded sampling is reproducible because outcomes keep insertion order;
//!   feeding a `HashMap` in gives whatever order that map iterates in.

mod builder;
mod config;
mod distribution;
mod error;
mod mass;
#[cfg(feature = "parallel")]
mod parallel;
mod sampler;

/// A minimal interface for index samplers.
#[allow(clippy::len_without_is_empty)]
pub trait IndexSampler {
    fn len(&self) -> usize;
    fn sample_index<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> usize;
}

pub use builder::{AliasTables, build, build_with};
pub use config::BuildConfig;
pub use distribution::{Distribution, normalize};
pub use error::{AliasError, DistributionFault};
#[cfg(feature = "parallel")]
pub use parallel::draw_n_par;
pub use sampler::{SampleIter, draw_n, draw_one};

/// Derive macro imported from `vose_alias_macros`.
#[cfg(feature = "derive")]
pub use vose_alias_macros::WeightedOutcome;

/// Enums whose variants are the outcomes of a distribution.
///
/// Usually implemented with `#[derive(WeightedOutcome)]`, which reads a
/// `#[weight(..)]` attribute on every variant.
pub trait WeightedOutcome: Sized + Copy + Eq + std::hash::Hash + 'static {
    /// Every variant with its raw weight, in declaration order.
    const WEIGHTS: &'static [(Self, f64)];

    /// Normalized distribution over the variants.
    ///
    /// # Errors
    /// See [`normalize`].
    fn distribution() -> Result<Distribution<Self>, AliasError> {
        normalize(Self::WEIGHTS.iter().copied())
    }

    /// Ready-to-sample tables over the variants.
    ///
    /// # Errors
    /// See [`normalize`] and [`build`].
    fn alias_tables() -> Result<AliasTables<Self>, AliasError> {
        build(&Self::distribution()?)
    }
}
