// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

//! The two-stage shift/xor/add/multiply hash family being searched.
//!
//! Each stage transforms the running value as
//! `((v >> shift_r) ^ (v < shift_l) ^ v + add) * mult` with wrapping 64-bit
//! arithmetic. `shift_l` only takes part through the comparison, which
//! contributes a single low bit.
//!
//! Shift counts are drawn as `r % 63 - 1` and can therefore hold `u32::MAX`.
//! Counts of 64 or more shift by `count mod 64`.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STAGES: usize = 2;

/// One shift/xor/add/multiply round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Stage {
    pub shift_l: u32,
    pub shift_r: u32,
    pub mult: u64,
    pub add: u64,
}

/// `r % 63 - 1`, wrapping, truncated to 32 bits. Yields 0..=61 or `u32::MAX`.
pub fn random_shift(rng: &mut impl RngCore) -> u32 {
    (rng.next_u64() % 63).wrapping_sub(1) as u32
}

impl Stage {
    pub fn random(rng: &mut impl RngCore) -> Self {
        // Draw order: shift_l, shift_r, add, mult.
        let shift_l = random_shift(rng);
        let shift_r = random_shift(rng);
        let add = rng.next_u64();
        let mult = rng.next_u64();
        Self {
            shift_l,
            shift_r,
            mult,
            add,
        }
    }

    #[inline]
    pub fn apply(&self, v: u64) -> u64 {
        let below = (v < u64::from(self.shift_l)) as u64;
        (v.wrapping_shr(self.shift_r) ^ below ^ v)
            .wrapping_add(self.add)
            .wrapping_mul(self.mult)
    }
}

/// A full parameter set: one [`Stage`] per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HashParams {
    pub stages: [Stage; STAGES],
}

impl HashParams {
    pub fn new(stages: [Stage; STAGES]) -> Self {
        Self { stages }
    }

    pub fn random(rng: &mut impl RngCore) -> Self {
        let first = Stage::random(rng);
        let second = Stage::random(rng);
        Self {
            stages: [first, second],
        }
    }

    /// Runs the key through every stage without the final reduction.
    #[inline]
    pub fn mix(&self, key: u64) -> u64 {
        self.stages.iter().fold(key, |v, stage| stage.apply(v))
    }

    /// Maps `key` to a bucket in `0..buckets`.
    #[inline]
    pub fn hash(&self, key: u64, buckets: u32) -> u32 {
        debug_assert!(buckets >= 1, "bucket count must be at least 1");
        (self.mix(key) % u64::from(buckets)) as u32
    }
}

/// Free-function form of [`HashParams::hash`].
#[inline]
pub fn hash(key: u64, params: &HashParams, buckets: u32) -> u32 {
    params.hash(key, buckets)
}

impl fmt::Display for HashParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(
                f,
                "L{} R{} +{:#018x} *{:#018x}",
                stage.shift_l, stage.shift_r, stage.add, stage.mult
            )?;
        }
        Ok(())
    }
}
