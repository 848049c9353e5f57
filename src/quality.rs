// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

//! Bucket-uniformity cost of a parameter set.
//!
//! The cost of one test case is the population standard deviation of the
//! bucket occupancy counts around the ideal load. The ideal load is the
//! *integer* quotient `keys / buckets`, so cases whose key count is not a
//! multiple of the bucket count never reach zero. This truncation is part of
//! the search landscape and is kept on purpose.

use crate::corpus::TestCase;
use crate::hash::HashParams;

/// Occupancy of every bucket after hashing all keys of `test`.
pub fn bucket_counts(test: &TestCase, params: &HashParams) -> Vec<u32> {
    let buckets = test.buckets();
    let mut counts = vec![0u32; buckets as usize];
    for &key in test.values() {
        counts[params.hash(key, buckets) as usize] += 1;
    }
    counts
}

/// Integer ideal load, `keys / buckets` rounded down.
pub fn ideal_load(test: &TestCase) -> f64 {
    (test.len() as u64 / u64::from(test.buckets())) as f64
}

/// Standard deviation of bucket counts around [`ideal_load`]. Lower is better.
pub fn cost(test: &TestCase, params: &HashParams) -> f64 {
    let avg = ideal_load(test);
    let counts = bucket_counts(test, params);
    let sum: f64 = counts
        .iter()
        .map(|&c| {
            let d = f64::from(c) - avg;
            d * d
        })
        .sum();
    (sum / counts.len() as f64).sqrt()
}

/// Mean of [`cost`] over every test case. This is the optimized quantity.
///
/// An empty collection scores `0.0`.
pub fn corpus_cost(tests: &[TestCase], params: &HashParams) -> f64 {
    if tests.is_empty() {
        return 0.0;
    }
    let total: f64 = tests.iter().map(|t| cost(t, params)).sum();
    total / tests.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Stage;
    use rand_mt::Mt64;

    fn passthrough_params() -> HashParams {
        let stage = Stage {
            shift_l: 0,
            shift_r: 63,
            mult: 1,
            add: 0,
        };
        HashParams::new([stage, stage])
    }

    fn collapsing_params() -> HashParams {
        let stage = Stage {
            shift_l: 0,
            shift_r: 0,
            mult: 0,
            add: 0,
        };
        HashParams::new([stage, stage])
    }

    #[test]
    fn test_perfect_spread_costs_zero() {
        let test = TestCase::new(vec![0, 1], 2);
        assert_eq!(cost(&test, &passthrough_params()), 0.0);
    }

    #[test]
    fn test_all_in_one_bucket() {
        // 4 keys in 2 buckets, counts [4, 0] against avg 2 -> sqrt((4 + 4) / 2) = 2
        let test = TestCase::new(vec![10, 11, 12, 13], 2);
        assert_eq!(bucket_counts(&test, &collapsing_params()), vec![4, 0]);
        assert!((cost(&test, &collapsing_params()) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ideal_load_truncates() {
        // 5 keys over 2 buckets -> avg 2, not 2.5
        let test = TestCase::new(vec![0, 1, 2, 3, 4], 2);
        assert_eq!(ideal_load(&test), 2.0);
        // counts [3, 2] -> sqrt((1 + 0) / 2)
        let expected = (0.5f64).sqrt();
        assert!((cost(&test, &passthrough_params()) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_cost_is_non_negative_and_deterministic() {
        let mut rng = Mt64::new(12345);
        let test = TestCase::synthesize(&mut rng);
        for _ in 0..50 {
            let params = HashParams::random(&mut rng);
            let a = cost(&test, &params);
            assert!(a >= 0.0);
            assert_eq!(a, cost(&test, &params));
        }
    }

    #[test]
    fn test_bucket_counts_sum_to_key_count() {
        let mut rng = Mt64::new(8);
        let test = TestCase::synthesize(&mut rng);
        let params = HashParams::random(&mut rng);
        let counts = bucket_counts(&test, &params);
        assert_eq!(counts.len(), test.buckets() as usize);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), test.len());
    }

    #[test]
    fn test_corpus_cost_is_mean() {
        let params = passthrough_params();
        let even = TestCase::new(vec![0, 1], 2);
        let lopsided = TestCase::new(vec![0, 2, 4, 6], 2);
        let tests = vec![even.clone(), lopsided.clone()];
        let expected = (cost(&even, &params) + cost(&lopsided, &params)) / 2.0;
        assert!((corpus_cost(&tests, &params) - expected).abs() < 1e-12);
        assert_eq!(corpus_cost(&[], &params), 0.0);
    }
}
