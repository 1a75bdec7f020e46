//! Corpus generation for fuzz sessions.
//!
//! A corpus is a deterministic prefix (one singleton tuple per pool value, for
//! unary and zero-ary targets) followed by [`RANDOM_ROWS`] tuples sampled
//! uniformly, with replacement, from the union of all pools.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::pool::all_values;
use super::value::Value;

/// Number of randomly sampled tuples appended to every corpus.
pub const RANDOM_ROWS: usize = 200;

/// Positional arguments for one call.
pub type ArgumentTuple = Vec<Value>;

/// Random corpus generator over the adversarial value pool.
pub struct CorpusGenerator {
    rng: StdRng,
}

impl CorpusGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator whose random tail is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a corpus for a target of the given arity.
    ///
    /// Every tuple has length `max(arity, 1)`.
    pub fn generate(&mut self, arity: usize) -> Vec<ArgumentTuple> {
        let width = arity.max(1);
        let pool = all_values();
        let prefix = if arity <= 1 { pool.len() } else { 0 };
        let mut corpus = Vec::with_capacity(prefix + RANDOM_ROWS);

        if arity <= 1 {
            corpus.extend(pool.iter().map(|value| vec![value.clone()]));
        }
        for _ in 0..RANDOM_ROWS {
            let row: ArgumentTuple = (0..width).map(|_| self.pick(pool)).collect();
            corpus.push(row);
        }
        corpus
    }

    fn pick(&mut self, pool: &[Value]) -> Value {
        pool[self.rng.gen_range(0..pool.len())].clone()
    }
}

impl Default for CorpusGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a fresh corpus with an unseeded random tail.
pub fn generate_corpus(arity: usize) -> Vec<ArgumentTuple> {
    CorpusGenerator::new().generate(arity)
}

/// Generate a corpus whose random tail is fixed by `seed`.
pub fn generate_corpus_seeded(arity: usize, seed: u64) -> Vec<ArgumentTuple> {
    CorpusGenerator::with_seed(seed).generate(arity)
}
