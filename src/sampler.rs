use rand::Rng;
use tracing::debug;

use crate::{IndexSampler, builder::AliasTables, error::AliasError};

impl<O> AliasTables<O> {
    /// Draw a column index in O(1): one uniform column, one coin flip.
    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let col = rng.random_range(0..self.prob.len());
        let u: f64 = rng.random();
        // prob == 1 always accepts, so a missing alias is never reached
        if u <= self.prob[col] {
            col
        } else {
            self.alias[col].unwrap_or(col)
        }
    }

    /// Sample an outcome **by reference**.
    ///
    /// # Panics
    /// Never panics for a well-constructed table.
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a O {
        &self.dist.outcomes()[self.sample_index(rng)]
    }

    /// Sample an outcome **by value** (clones the chosen outcome).
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> O
    where
        O: Clone,
    {
        self.sample(rng).clone()
    }

    /// Endless stream of independent draws.
    pub fn sample_iter<'a, R: Rng>(&'a self, rng: R) -> SampleIter<'a, O, R> {
        SampleIter { tables: self, rng }
    }
}

/// Iterator returned by [`AliasTables::sample_iter`].
#[derive(Debug)]
pub struct SampleIter<'a, O, R> {
    tables: &'a AliasTables<O>,
    rng: R,
}

impl<'a, O, R: Rng> Iterator for SampleIter<'a, O, R> {
    type Item = &'a O;

    #[inline]
    fn next(&mut self) -> Option<&'a O> {
        Some(self.tables.sample(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Draw a single outcome from `tables`.
pub fn draw_one<O: Clone, R: Rng + ?Sized>(tables: &AliasTables<O>, rng: &mut R) -> O {
    tables.sample_owned(rng)
}

/// Draw `n` independent outcomes, in draw order.
///
/// `n` is signed so a caller passing through unchecked input gets an error
/// rather than a wrapped-around count.
///
/// # Errors
/// [`AliasError::InvalidSampleSize`] if `n <= 0`. Nothing is drawn in that case.
pub fn draw_n<O: Clone, R: Rng + ?Sized>(
    tables: &AliasTables<O>,
    rng: &mut R,
    n: i64,
) -> Result<Vec<O>, AliasError> {
    let count = sample_size(n)?;
    debug!(n = count, columns = tables.len(), "drawing samples");
    Ok((0..count).map(|_| tables.sample_owned(rng)).collect())
}

pub(crate) fn sample_size(n: i64) -> Result<usize, AliasError> {
    if n <= 0 {
        return Err(AliasError::InvalidSampleSize { requested: n });
    }
    usize::try_from(n).map_err(|_| AliasError::InvalidSampleSize { requested: n })
}

impl<O> IndexSampler for AliasTables<O> {
    #[inline]
    fn len(&self) -> usize {
        // inherent methods, not these trait methods
        AliasTables::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        AliasTables::sample_index(self, rng)
    }
}
