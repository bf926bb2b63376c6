//! Source of filler praise.

use rand::seq::SliceRandom;

/// Picks entries from a praise pool.
pub trait PraiseSampler: Send + Sync {
    /// Return up to `count` distinct entries of `pool`.
    fn sample(&self, pool: &[&'static str], count: usize) -> Vec<&'static str>;
}

/// Uniform random choice from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPraise;

impl PraiseSampler for RandomPraise {
    fn sample(&self, pool: &[&'static str], count: usize) -> Vec<&'static str> {
        pool.choose_multiple(&mut rand::thread_rng(), count)
            .copied()
            .collect()
    }
}

/// Takes consecutive entries starting at `offset`, wrapping around.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicPraise {
    pub offset: usize,
}

impl DeterministicPraise {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

impl PraiseSampler for DeterministicPraise {
    fn sample(&self, pool: &[&'static str], count: usize) -> Vec<&'static str> {
        if pool.is_empty() {
            return Vec::new();
        }
        (0..count.min(pool.len()))
            .map(|i| pool[(self.offset + i) % pool.len()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: &[&str] = &["a", "b", "c"];

    #[test]
    fn test_random_praise_is_distinct_and_bounded() {
        let picked = RandomPraise.sample(POOL, 2);
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);
        assert_eq!(RandomPraise.sample(POOL, 10).len(), 3);
    }

    #[test]
    fn test_deterministic_praise_wraps() {
        assert_eq!(DeterministicPraise::new(2).sample(POOL, 2), vec!["c", "a"]);
        assert_eq!(DeterministicPraise::default().sample(&[], 2), Vec::<&str>::new());
    }
}
