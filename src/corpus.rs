// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

//! Test cases and the append-only collection they are scored against.

use rand::RngCore;

/// Draws thrown away before each sampled key.
pub const SKIP_DRAWS: usize = 1000;
pub const MIN_BUCKETS: u32 = 10;
pub const BUCKET_SPAN: u64 = 20;
pub const MIN_LOAD_FACTOR: u64 = 2;
pub const LOAD_FACTOR_SPAN: u64 = 5;

/// A fixed sample of keys and the bucket count they are spread over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    values: Vec<u64>,
    buckets: u32,
}

impl TestCase {
    /// A bucket count of zero is raised to one.
    pub fn new(values: Vec<u64>, buckets: u32) -> Self {
        Self {
            values,
            buckets: buckets.max(1),
        }
    }

    /// Samples a new case: 10..=29 buckets, 2..=6 keys per bucket, every key
    /// taken after skipping [`SKIP_DRAWS`] draws of the stream.
    pub fn synthesize(rng: &mut impl RngCore) -> Self {
        let buckets = (rng.next_u64() % BUCKET_SPAN) as u32 + MIN_BUCKETS;
        let factor = rng.next_u64() % LOAD_FACTOR_SPAN + MIN_LOAD_FACTOR;
        let size = buckets as usize * factor as usize;

        let mut values = Vec::with_capacity(size);
        for _ in 0..size {
            for _ in 0..SKIP_DRAWS {
                rng.next_u64();
            }
            values.push(rng.next_u64());
        }
        Self { values, buckets }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn buckets(&self) -> u32 {
        self.buckets
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered, append-only collection of [`TestCase`]s with a size cap.
#[derive(Debug, Clone)]
pub struct Corpus {
    tests: Vec<TestCase>,
    capacity: usize,
}

impl Corpus {
    pub fn new(capacity: usize) -> Self {
        Self {
            tests: Vec::new(),
            capacity,
        }
    }

    /// A corpus holding one freshly synthesized case.
    pub fn seeded(rng: &mut impl RngCore, capacity: usize) -> Self {
        let mut corpus = Self::new(capacity.max(1));
        corpus.tests.push(TestCase::synthesize(rng));
        corpus
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tests.len() >= self.capacity
    }

    /// Synthesizes and appends one case. No draws are made once full.
    pub fn grow(&mut self, rng: &mut impl RngCore) -> bool {
        if self.is_full() {
            return false;
        }
        self.tests.push(TestCase::synthesize(rng));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_mt::Mt64;

    #[test]
    fn test_synthesize_respects_ranges() {
        let mut rng = Mt64::new(12345);
        for _ in 0..20 {
            let t = TestCase::synthesize(&mut rng);
            assert!((10..=29).contains(&t.buckets()), "buckets {}", t.buckets());
            assert_eq!(t.len() % t.buckets() as usize, 0);
            let factor = t.len() / t.buckets() as usize;
            assert!((2..=6).contains(&factor), "factor {}", factor);
        }
    }

    #[test]
    fn test_synthesize_skip_samples_the_stream() {
        let mut rng = Mt64::new(42);
        let mut mirror = rng.clone();
        let t = TestCase::synthesize(&mut rng);

        mirror.next_u64();
        mirror.next_u64();
        for &value in t.values() {
            for _ in 0..SKIP_DRAWS {
                mirror.next_u64();
            }
            assert_eq!(value, mirror.next_u64());
        }
        assert_eq!(rng.next_u64(), mirror.next_u64());
    }

    #[test]
    fn test_zero_buckets_raised_to_one() {
        let t = TestCase::new(vec![1, 2, 3], 0);
        assert_eq!(t.buckets(), 1);
    }

    #[test]
    fn test_corpus_stops_at_capacity() {
        let mut rng = Mt64::new(5);
        let mut corpus = Corpus::seeded(&mut rng, 3);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.grow(&mut rng));
        assert!(corpus.grow(&mut rng));
        assert!(corpus.is_full());

        let mut before = rng.clone();
        for _ in 0..10 {
            assert!(!corpus.grow(&mut rng));
        }
        assert_eq!(corpus.len(), 3);
        // a full corpus leaves the stream untouched
        assert_eq!(rng.next_u64(), before.next_u64());
    }

    #[test]
    fn test_seeded_corpus_keeps_at_least_one_slot() {
        let mut rng = Mt64::new(3);
        let mut corpus = Corpus::seeded(&mut rng, 0);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.is_full());
        assert!(!corpus.grow(&mut rng));
    }
}
