//! Normalized discrete distributions over labeled outcomes.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::error::AliasError;
use crate::mass::Compensated;

/// A finite discrete distribution: each outcome paired with its probability.
///
/// Outcomes keep the order they were supplied in, so a table built from the
/// same input and sampled with the same seeded RNG always yields the same
/// sequence, whatever the hasher does.
#[derive(Debug, Clone)]
pub struct Distribution<O> {
    outcomes: Vec<O>,
    probs: Vec<f64>,
    index: HashMap<O, usize>,
}

/// Turn non-negative weights into probabilities that sum to one.
///
/// Accepts any `(outcome, weight)` iterator: a `HashMap`, `BTreeMap`, `Vec`
/// or array all work.
///
/// # Errors
/// * [`AliasError::InvalidWeight`] if a weight is negative, `NaN` or infinite.
/// * [`AliasError::DegenerateDistribution`] if the weights add up to zero
///   (this includes empty input).
/// * [`AliasError::DuplicateOutcome`] if an outcome appears twice.
pub fn normalize<O, I>(weights: I) -> Result<Distribution<O>, AliasError>
where
    O: Eq + Hash + Clone,
    I: IntoIterator<Item = (O, f64)>,
{
    let (outcomes, weights) = collect_unique(weights)?;

    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(AliasError::InvalidWeight { index, value });
        }
    }

    let peak = weights.iter().copied().fold(0.0, f64::max);
    if peak == 0.0 {
        return Err(AliasError::DegenerateDistribution);
    }

    let scale = exact_scale(peak);
    let total = weights
        .iter()
        .map(|&w| w * scale)
        .collect::<Compensated>()
        .value();
    debug!(outcomes = outcomes.len(), total, scale, "normalizing weights");

    let probs = weights.iter().map(|&w| (w * scale) / total).collect();
    Ok(Distribution::from_parts(outcomes, probs))
}

/// Power of two that brings `peak` below 4 when it is at least 1, so the
/// scaled sum of n weights is at most 4n. Multiplying by a power of two is
/// exact, so inputs that never overflow normalize to the same bits.
fn exact_scale(peak: f64) -> f64 {
    if peak < 1.0 {
        return 1.0;
    }
    let exp = (((peak.to_bits() >> 52) & 0x7ff) as i32 - 1023).min(1022);
    f64::from_bits(((1023 - exp) as u64) << 52)
}

fn collect_unique<O, I>(pairs: I) -> Result<(Vec<O>, Vec<f64>), AliasError>
where
    O: Eq + Hash + Clone,
    I: IntoIterator<Item = (O, f64)>,
{
    let pairs = pairs.into_iter();
    let (lower, _) = pairs.size_hint();
    let mut outcomes = Vec::with_capacity(lower);
    let mut values = Vec::with_capacity(lower);
    let mut seen = HashMap::with_capacity(lower);
    for (index, (o, v)) in pairs.enumerate() {
        if seen.insert(o.clone(), index).is_some() {
            return Err(AliasError::DuplicateOutcome { index });
        }
        outcomes.push(o);
        values.push(v);
    }
    Ok((outcomes, values))
}

impl<O: Eq + Hash + Clone> Distribution<O> {
    /// Wrap probabilities that were computed elsewhere.
    ///
    /// Nothing is checked beyond uniqueness of the outcomes: the table builder
    /// validates the values, so a bad distribution is refused there.
    ///
    /// # Errors
    /// [`AliasError::DuplicateOutcome`] if an outcome appears twice.
    pub fn from_probabilities<I>(pairs: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (O, f64)>,
    {
        let (outcomes, probs) = collect_unique(pairs)?;
        Ok(Self::from_parts(outcomes, probs))
    }

    fn from_parts(outcomes: Vec<O>, probs: Vec<f64>) -> Self {
        let index = outcomes
            .iter()
            .enumerate()
            .map(|(i, o)| (o.clone(), i))
            .collect();
        Self {
            outcomes,
            probs,
            index,
        }
    }

    /// Probability of `outcome`, or `None` if it is not part of the distribution.
    pub fn probability(&self, outcome: &O) -> Option<f64> {
        self.index.get(outcome).map(|&i| self.probs[i])
    }

    pub(crate) fn index_of(&self, outcome: &O) -> Option<usize> {
        self.index.get(outcome).copied()
    }
}

impl<O> Distribution<O> {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes in insertion order.
    pub fn outcomes(&self) -> &[O] {
        &self.outcomes
    }

    /// Probabilities, parallel to [`outcomes`](Self::outcomes).
    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&O, f64)> + '_ {
        self.outcomes.iter().zip(self.probs.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn probabilities_follow_weights() {
        let d = normalize([("a", 1.0), ("b", 3.0)]).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.probability(&"a"), Some(0.25));
        assert_eq!(d.probability(&"b"), Some(0.75));
        assert_eq!(d.probability(&"c"), None);
    }

    #[test]
    fn keeps_insertion_order() {
        let d = normalize([("z", 1.0), ("a", 1.0), ("m", 2.0)]).unwrap();
        assert_eq!(d.outcomes(), &["z", "a", "m"]);
        assert_eq!(d.probabilities(), &[0.25, 0.25, 0.5]);
    }

    #[test]
    fn zero_weights_are_allowed() {
        let d = normalize([("a", 0.0), ("b", 2.0)]).unwrap();
        assert_eq!(d.probability(&"a"), Some(0.0));
        assert_eq!(d.probability(&"b"), Some(1.0));
    }

    #[test]
    fn rejects_negative_weight() {
        let err = normalize([("A", -1.0), ("B", 2.0)]).unwrap_err();
        assert_eq!(
            err,
            AliasError::InvalidWeight {
                index: 0,
                value: -1.0
            }
        );
    }

    #[test]
    fn rejects_non_finite_weight() {
        assert!(matches!(
            normalize([("A", f64::NAN), ("B", 2.0)]),
            Err(AliasError::InvalidWeight { index: 0, .. })
        ));
        assert!(matches!(
            normalize([("A", 1.0), ("B", f64::INFINITY)]),
            Err(AliasError::InvalidWeight { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_zero_total() {
        assert_eq!(
            normalize([("A", 0.0), ("B", 0.0)]).unwrap_err(),
            AliasError::DegenerateDistribution
        );
        assert_eq!(
            normalize(Vec::<(&str, f64)>::new()).unwrap_err(),
            AliasError::DegenerateDistribution
        );
    }

    #[test]
    fn huge_weights_do_not_overflow() {
        let d = normalize([("a", 1e308), ("b", 1e308)]).unwrap();
        assert_eq!(d.probabilities(), &[0.5, 0.5]);

        let d = normalize([("a", f64::MAX), ("b", f64::MAX), ("c", 0.0), ("d", f64::MAX)]).unwrap();
        for p in &d.probabilities()[..2] {
            assert!((p - 1.0 / 3.0).abs() < 1e-15, "p={p}");
        }
        assert_eq!(d.probability(&"c"), Some(0.0));

        let d = normalize([("a", 3e307), ("b", 1e308)]).unwrap();
        assert!((d.probability(&"a").unwrap() - 3.0 / 13.0).abs() < 1e-15);
    }

    #[test]
    fn scale_is_a_power_of_two() {
        assert_eq!(exact_scale(0.5), 1.0);
        assert_eq!(exact_scale(1.0), 1.0);
        assert_eq!(exact_scale(3.0), 0.5);
        assert_eq!(exact_scale(1024.0), 1.0 / 1024.0);
        let s = exact_scale(f64::MAX);
        assert!(s > 0.0 && (f64::MAX * s) < 4.0);
    }

    #[test]
    fn rejects_duplicates() {
        assert_eq!(
            normalize([("A", 1.0), ("B", 1.0), ("A", 2.0)]).unwrap_err(),
            AliasError::DuplicateOutcome { index: 2 }
        );
    }

    #[test]
    fn accepts_maps() {
        let weights: BTreeMap<String, f64> =
            [("x".to_string(), 2.0), ("y".to_string(), 6.0)].into();
        let d = normalize(weights).unwrap();
        assert_eq!(d.probability(&"y".to_string()), Some(0.75));
    }

    #[test]
    fn negative_zero_counts_as_zero() {
        let d = normalize([("a", -0.0), ("b", 1.0)]).unwrap();
        assert_eq!(d.probability(&"b"), Some(1.0));
    }
}
