//! Bulk sampling on the rayon pool.
//!
//! Draws are split into fixed-size chunks and every chunk gets its own
//! `ChaCha8Rng` stream keyed by `(seed, chunk index)`. The output is therefore
//! a pure function of the tables, `n` and `seed`; the number of worker threads
//! does not change it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::{builder::AliasTables, error::AliasError, sampler::sample_size};

const CHUNK: usize = 1 << 14;

/// Parallel counterpart of [`draw_n`](crate::draw_n), seeded instead of taking an RNG.
///
/// # Errors
/// [`AliasError::InvalidSampleSize`] if `n <= 0`.
pub fn draw_n_par<O>(tables: &AliasTables<O>, n: i64, seed: u64) -> Result<Vec<O>, AliasError>
where
    O: Clone + Send + Sync,
{
    let count = sample_size(n)?;
    let chunks = count.div_ceil(CHUNK);
    debug!(n = count, chunks, "drawing samples in parallel");

    let mut out: Vec<O> = Vec::with_capacity(count);
    out.par_extend((0..chunks).into_par_iter().flat_map_iter(|chunk| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(chunk as u64);
        let len = CHUNK.min(count - chunk * CHUNK);
        (0..len)
            .map(|_| tables.sample_owned(&mut rng))
            .collect::<Vec<_>>()
    }));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> AliasTables<u32> {
        AliasTables::from_weights((0..50u32).map(|i| (i, f64::from(i % 7) + 0.5))).unwrap()
    }

    #[test]
    fn exact_length_across_chunk_boundary() {
        let t = tables();
        for n in [1, CHUNK as i64 - 1, CHUNK as i64, CHUNK as i64 + 1, 3 * CHUNK as i64 + 17] {
            assert_eq!(draw_n_par(&t, n, 9).unwrap().len() as i64, n);
        }
    }

    #[test]
    fn independent_of_pool_size() {
        let t = tables();
        let n = 5 * CHUNK as i64 + 3;
        let one = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| draw_n_par(&t, n, 1234).unwrap());
        let four = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| draw_n_par(&t, n, 1234).unwrap());
        assert_eq!(one, four);
        assert_ne!(one, draw_n_par(&t, n, 1235).unwrap());
    }

    #[test]
    fn rejects_non_positive() {
        let t = tables();
        assert!(matches!(
            draw_n_par(&t, 0, 1),
            Err(AliasError::InvalidSampleSize { requested: 0 })
        ));
    }
}
