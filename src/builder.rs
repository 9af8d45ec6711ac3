//! Vose's alias method: table construction.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::config::BuildConfig;
use crate::distribution::{Distribution, normalize};
use crate::error::{AliasError, DistributionFault};
use crate::mass::Compensated;

/// Probability and alias tables for one distribution.
///
/// Column `i` holds outcome `i`. A draw picks a column uniformly and keeps it
/// with probability `prob[i]`, otherwise it yields `alias[i]`. Columns whose
/// probability settled at exactly 1 carry no alias.
#[derive(Debug, Clone)]
pub struct AliasTables<O> {
    pub(crate) dist: Distribution<O>,
    pub(crate) prob: Vec<f64>,
    pub(crate) alias: Vec<Option<usize>>,
}

/// Build tables for `dist` with the default [`BuildConfig`].
///
/// # Errors
/// See [`build_with`].
pub fn build<O>(dist: &Distribution<O>) -> Result<AliasTables<O>, AliasError>
where
    O: Eq + Hash + Clone,
{
    build_with(dist, &BuildConfig::default())
}

/// Build tables for `dist`. O(n) time and space.
///
/// # Errors
/// [`AliasError::InvalidDistribution`] if `dist` is empty, holds a negative or
/// non-finite probability, or does not sum to 1 within `config.tolerance()`.
pub fn build_with<O>(
    dist: &Distribution<O>,
    config: &BuildConfig,
) -> Result<AliasTables<O>, AliasError>
where
    O: Eq + Hash + Clone,
{
    validate(dist.probabilities(), config.tolerance())?;

    let n = dist.len();
    let mut scaled: Vec<Compensated> = dist
        .probabilities()
        .iter()
        .map(|&p| Compensated::product(p, n as f64))
        .collect();

    let mut prob = vec![0.0f64; n];
    let mut alias = vec![None; n];

    let mut small = Vec::with_capacity(n);
    let mut large = Vec::with_capacity(n);
    for (i, s) in scaled.iter().enumerate() {
        if s.value() < 1.0 {
            small.push(i);
        } else {
            large.push(i);
        }
    }
    debug!(
        n,
        small = small.len(),
        large = large.len(),
        "building alias tables"
    );

    while let (Some(&s), Some(&l)) = (small.last(), large.last()) {
        small.pop();
        large.pop();

        let p = scaled[s].value().clamp(0.0, 1.0);
        prob[s] = p;
        alias[s] = Some(l);

        // l donates 1 - p to fill column s
        scaled[l].add(p);
        scaled[l].add(-1.0);
        trace!(small = s, large = l, remaining = scaled[l].value(), "paired");

        if scaled[l].value() < 1.0 {
            small.push(l);
        } else {
            large.push(l);
        }
    }

    // Whatever is left is 1 up to rounding.
    for i in small.into_iter().chain(large) {
        prob[i] = 1.0;
    }

    Ok(AliasTables {
        dist: dist.clone(),
        prob,
        alias,
    })
}

fn validate(probs: &[f64], tolerance: f64) -> Result<(), DistributionFault> {
    if probs.is_empty() {
        return Err(DistributionFault::Empty);
    }
    for (index, &value) in probs.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(DistributionFault::NegativeProbability { index, value });
        }
    }
    let sum = probs.iter().copied().collect::<Compensated>().value();
    if (1.0 - sum).abs() > tolerance {
        return Err(DistributionFault::SumOutOfTolerance { sum, tolerance });
    }
    Ok(())
}

impl<O: Eq + Hash + Clone> AliasTables<O> {
    /// Normalize `weights` and build tables in one step.
    ///
    /// # Errors
    /// Anything [`normalize`] or [`build`] can return.
    pub fn from_weights<I>(weights: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (O, f64)>,
    {
        build(&normalize(weights)?)
    }

    /// Probability-table entry for `outcome`.
    pub fn probability(&self, outcome: &O) -> Option<f64> {
        self.dist.index_of(outcome).map(|i| self.prob[i])
    }

    /// Alias-table entry for `outcome`. `None` both for unknown outcomes and
    /// for columns that settled at probability 1.
    pub fn alias(&self, outcome: &O) -> Option<&O> {
        let i = self.dist.index_of(outcome)?;
        self.alias[i].map(|a| &self.dist.outcomes()[a])
    }

    /// Both tables as plain maps, for collaborators that want mappings rather
    /// than the column layout.
    pub fn to_maps(&self) -> (HashMap<O, f64>, HashMap<O, O>) {
        let probs = self
            .probability_entries()
            .map(|(o, p)| (o.clone(), p))
            .collect();
        let aliases = self
            .alias_entries()
            .map(|(o, a)| (o.clone(), a.clone()))
            .collect();
        (probs, aliases)
    }
}

impl<O> AliasTables<O> {
    /// Number of columns (outcomes).
    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    pub fn outcomes(&self) -> &[O] {
        self.dist.outcomes()
    }

    /// The distribution these tables were built from.
    pub fn distribution(&self) -> &Distribution<O> {
        &self.dist
    }

    /// `(outcome, probability-table entry)` for every column, in column order.
    pub fn probability_entries(&self) -> impl Iterator<Item = (&O, f64)> + '_ {
        self.dist.outcomes().iter().zip(self.prob.iter().copied())
    }

    /// `(outcome, alias)` for every column that has an alias.
    pub fn alias_entries(&self) -> impl Iterator<Item = (&O, &O)> + '_ {
        let outcomes = self.dist.outcomes();
        outcomes
            .iter()
            .zip(self.alias.iter())
            .filter_map(move |(o, a)| a.map(|a| (o, &outcomes[a])))
    }
}
