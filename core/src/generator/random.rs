use super::*;

/// Uniform sampling without replacement, reproducible from a seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomSampler {
    seed: u64,
}

impl RandomSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineSampler for RandomSampler {
    fn sample(self, candidates: &[TileId], amount: usize) -> Vec<TileId> {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        if amount > candidates.len() {
            log::warn!(
                "Requested {} mines but only {} candidate tiles, placing all of them",
                amount,
                candidates.len()
            );
        }
        let amount = amount.min(candidates.len());

        // partial Fisher-Yates, only the first `amount` slots get shuffled
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut pool = candidates.to_vec();
        for i in 0..amount {
            let j = rng.random_range(i..pool.len());
            pool.swap(i, j);
        }
        pool.truncate(amount);
        pool
    }
}
