// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

//! The single move operator of the search.
//!
//! A call picks a stage (`r % 2`) and one of ten kinds (`r % 10`), both
//! uniformly, then touches exactly one field of that stage.

use rand::RngCore;
use std::fmt;

use crate::hash::{random_shift, HashParams, STAGES};

/// Upper bound (exclusive) of the additive nudges.
pub const NUDGE_RANGE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MutationKind {
    ShiftL,
    ShiftR,
    AddReplace,
    MultReplace,
    AddIncrement,
    MultIncrement,
    AddDecrement,
    MultDecrement,
    AddBitFlip,
    MultBitFlip,
}

impl MutationKind {
    /// Every kind, in draw-index order.
    pub const ALL: [MutationKind; 10] = [
        MutationKind::ShiftL,
        MutationKind::ShiftR,
        MutationKind::AddReplace,
        MutationKind::MultReplace,
        MutationKind::AddIncrement,
        MutationKind::MultIncrement,
        MutationKind::AddDecrement,
        MutationKind::MultDecrement,
        MutationKind::AddBitFlip,
        MutationKind::MultBitFlip,
    ];

    fn from_draw(r: u64) -> Self {
        Self::ALL[(r % Self::ALL.len() as u64) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            MutationKind::ShiftL => "shift_l",
            MutationKind::ShiftR => "shift_r",
            MutationKind::AddReplace => "add_replace",
            MutationKind::MultReplace => "mult_replace",
            MutationKind::AddIncrement => "add_inc",
            MutationKind::MultIncrement => "mult_inc",
            MutationKind::AddDecrement => "add_dec",
            MutationKind::MultDecrement => "mult_dec",
            MutationKind::AddBitFlip => "add_flip",
            MutationKind::MultBitFlip => "mult_flip",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a [`mutate`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub stage: usize,
    pub kind: MutationKind,
}

/// Applies one random single-field change to `params` in place.
pub fn mutate(params: &mut HashParams, rng: &mut impl RngCore) -> Mutation {
    let stage = (rng.next_u64() % STAGES as u64) as usize;
    let kind = MutationKind::from_draw(rng.next_u64());
    let s = &mut params.stages[stage];
    match kind {
        MutationKind::ShiftL => s.shift_l = random_shift(rng),
        MutationKind::ShiftR => s.shift_r = random_shift(rng),
        MutationKind::AddReplace => s.add = rng.next_u64(),
        MutationKind::MultReplace => s.mult = rng.next_u64(),
        MutationKind::AddIncrement => s.add = s.add.wrapping_add(rng.next_u64() % NUDGE_RANGE),
        MutationKind::MultIncrement => s.mult = s.mult.wrapping_add(rng.next_u64() % NUDGE_RANGE),
        MutationKind::AddDecrement => s.add = s.add.wrapping_sub(rng.next_u64() % NUDGE_RANGE),
        MutationKind::MultDecrement => s.mult = s.mult.wrapping_sub(rng.next_u64() % NUDGE_RANGE),
        MutationKind::AddBitFlip => s.add ^= 1u64 << (rng.next_u64() % 64),
        MutationKind::MultBitFlip => s.mult ^= 1u64 << (rng.next_u64() % 64),
    }
    Mutation { stage, kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Stage;
    use rand_mt::Mt64;
    use std::collections::HashMap;

    /// Names of the fields that differ between two stages.
    fn changed_fields(a: &Stage, b: &Stage) -> Vec<&'static str> {
        let mut out = Vec::new();
        if a.shift_l != b.shift_l {
            out.push("shift_l");
        }
        if a.shift_r != b.shift_r {
            out.push("shift_r");
        }
        if a.add != b.add {
            out.push("add");
        }
        if a.mult != b.mult {
            out.push("mult");
        }
        out
    }

    fn field_of(kind: MutationKind) -> &'static str {
        match kind {
            MutationKind::ShiftL => "shift_l",
            MutationKind::ShiftR => "shift_r",
            MutationKind::AddReplace
            | MutationKind::AddIncrement
            | MutationKind::AddDecrement
            | MutationKind::AddBitFlip => "add",
            _ => "mult",
        }
    }

    #[test]
    fn test_mutation_touches_one_field_of_one_stage() {
        let mut rng = Mt64::new(12345);
        let mut params = HashParams::random(&mut rng);
        for _ in 0..2000 {
            let before = params;
            let m = mutate(&mut params, &mut rng);
            for i in 0..STAGES {
                let changed = changed_fields(&before.stages[i], &params.stages[i]);
                if i == m.stage {
                    assert!(changed.len() <= 1, "{:?} changed {:?}", m, changed);
                    if let Some(field) = changed.first() {
                        assert_eq!(*field, field_of(m.kind));
                    }
                } else {
                    assert!(changed.is_empty(), "untouched stage {} changed {:?}", i, changed);
                }
            }
        }
    }

    #[test]
    fn test_bit_flips_always_change_the_field() {
        let mut rng = Mt64::new(77);
        let mut params = HashParams::random(&mut rng);
        let mut flips = 0;
        while flips < 100 {
            let before = params;
            let m = mutate(&mut params, &mut rng);
            if matches!(m.kind, MutationKind::AddBitFlip | MutationKind::MultBitFlip) {
                let s = m.stage;
                let diff = (before.stages[s].add ^ params.stages[s].add)
                    | (before.stages[s].mult ^ params.stages[s].mult);
                assert_eq!(diff.count_ones(), 1);
                flips += 1;
            }
        }
    }

    #[test]
    fn test_kinds_and_stages_roughly_uniform() {
        let mut rng = Mt64::new(2024);
        let mut params = HashParams::default();
        let mut kinds: HashMap<MutationKind, usize> = HashMap::new();
        let mut stages = [0usize; STAGES];
        let n = 50_000;
        for _ in 0..n {
            let m = mutate(&mut params, &mut rng);
            *kinds.entry(m.kind).or_insert(0) += 1;
            stages[m.stage] += 1;
        }
        assert_eq!(kinds.len(), MutationKind::ALL.len());
        for (kind, count) in &kinds {
            let share = *count as f64 / n as f64;
            assert!((share - 0.1).abs() < 0.015, "{} share {}", kind, share);
        }
        for count in stages {
            let share = count as f64 / n as f64;
            assert!((share - 0.5).abs() < 0.02, "stage share {}", share);
        }
    }
}
