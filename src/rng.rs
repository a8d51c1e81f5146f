//! Injectable randomness.
//!
//! Both synthesizers consume randomness exclusively as fractions in
//! `[0, 1)`, so the whole search can be driven by anything that produces
//! them: the default `fastrand` PRNG, a seeded one, or a scripted sequence
//! in tests.

/// A source of uniform random fractions in `[0, 1)`.
pub trait RandomSource {
    fn fraction(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn fraction(&mut self) -> f64 {
        self.f64()
    }
}

/// Uniform index into a collection of `len` elements. `len` must be nonzero.
pub(crate) fn index(len: usize, rng: &mut dyn RandomSource) -> usize {
    debug_assert!(len > 0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let idx = (rng.fraction() * len as f64) as usize;
    idx.min(len - 1)
}

pub(crate) fn choose<'a, T>(items: &'a [T], rng: &mut dyn RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[index(items.len(), rng)])
    }
}

/// Fisher-Yates shuffle driven by fractions.
pub(crate) fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = index(i + 1, rng);
        items.swap(i, j);
    }
}

/// Sample `count` items uniformly without replacement. `count` must not
/// exceed `items.len()`.
pub(crate) fn sample<T: Clone>(items: &[T], count: usize, rng: &mut dyn RandomSource) -> Vec<T> {
    debug_assert!(count <= items.len());
    let mut pool = items.to_vec();
    shuffle(&mut pool, rng);
    pool.truncate(count);
    pool
}

pub(crate) fn coin_flip(rng: &mut dyn RandomSource) -> bool {
    rng.fraction() < 0.5
}
