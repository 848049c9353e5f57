// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use rand::RngCore;

use crate::corpus::TestCase;
use crate::hash::HashParams;
use crate::mutation::{mutate, Mutation};
use crate::quality::corpus_cost;

/// One member of the population.
///
/// `curr` is the candidate being mutated, `best` the lowest-cost variant seen
/// so far and `eval` its cost against the current corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Specimen {
    pub curr: HashParams,
    pub best: HashParams,
    pub eval: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Cost did not increase; `best` now equals `curr`.
    Accepted,
    /// Cost increased and `curr` was rolled back to `best`.
    Reverted,
    /// Cost increased but `curr` keeps the worse candidate.
    Drifted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub mutation: Mutation,
    pub outcome: StepOutcome,
    pub cost: f64,
}

impl Specimen {
    pub fn random(rng: &mut impl RngCore, tests: &[TestCase]) -> Self {
        Self::from_params(HashParams::random(rng), tests)
    }

    pub fn from_params(params: HashParams, tests: &[TestCase]) -> Self {
        Self {
            curr: params,
            best: params,
            eval: corpus_cost(tests, &params),
        }
    }

    /// Drops any drift and rescores `best` against `tests`.
    ///
    /// Needed whenever the corpus changes, since cached costs are relative to it.
    pub fn rebase(&mut self, tests: &[TestCase]) {
        self.curr = self.best;
        self.eval = corpus_cost(tests, &self.best);
    }

    /// Mutates `curr` once and applies the acceptance rule.
    ///
    /// Equal cost is accepted. On a worse cost one draw decides (`r & 2`)
    /// whether to roll back or to keep exploring from the worse point.
    pub fn step(&mut self, rng: &mut impl RngCore, tests: &[TestCase]) -> Step {
        let mutation = mutate(&mut self.curr, rng);
        let cost = corpus_cost(tests, &self.curr);
        let outcome = if cost <= self.eval {
            self.best = self.curr;
            self.eval = cost;
            StepOutcome::Accepted
        } else if rng.next_u64() & 2 != 0 {
            self.curr = self.best;
            StepOutcome::Reverted
        } else {
            StepOutcome::Drifted
        };
        Step {
            mutation,
            outcome,
            cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_mt::Mt64;

    fn corpus(rng: &mut Mt64, n: usize) -> Vec<TestCase> {
        (0..n).map(|_| TestCase::synthesize(rng)).collect()
    }

    #[test]
    fn test_new_specimen_caches_cost_of_best() {
        let mut rng = Mt64::new(12345);
        let tests = corpus(&mut rng, 2);
        let s = Specimen::random(&mut rng, &tests);
        assert_eq!(s.curr, s.best);
        assert_eq!(s.eval, corpus_cost(&tests, &s.best));
    }

    #[test]
    fn test_eval_never_increases_and_matches_best() {
        let mut rng = Mt64::new(31337);
        let tests = corpus(&mut rng, 2);
        let mut s = Specimen::random(&mut rng, &tests);
        for _ in 0..500 {
            let before = s.eval;
            let step = s.step(&mut rng, &tests);
            assert!(s.eval <= before);
            assert_eq!(s.eval, corpus_cost(&tests, &s.best));
            match step.outcome {
                StepOutcome::Accepted => {
                    assert_eq!(s.curr, s.best);
                    assert_eq!(step.cost, s.eval);
                }
                StepOutcome::Reverted => {
                    assert_eq!(s.curr, s.best);
                    assert!(step.cost > s.eval);
                }
                StepOutcome::Drifted => assert!(step.cost > s.eval),
            }
        }
    }

    #[test]
    fn test_both_rejection_paths_occur() {
        let mut rng = Mt64::new(4);
        let tests = corpus(&mut rng, 1);
        let mut s = Specimen::random(&mut rng, &tests);
        let (mut reverted, mut drifted) = (0, 0);
        for _ in 0..2000 {
            match s.step(&mut rng, &tests).outcome {
                StepOutcome::Reverted => reverted += 1,
                StepOutcome::Drifted => drifted += 1,
                StepOutcome::Accepted => {}
            }
        }
        assert!(reverted > 0 && drifted > 0, "reverted {} drifted {}", reverted, drifted);
    }

    #[test]
    fn test_rebase_resets_curr_and_rescores() {
        let mut rng = Mt64::new(9);
        let mut tests = corpus(&mut rng, 1);
        let mut s = Specimen::random(&mut rng, &tests);
        for _ in 0..50 {
            s.step(&mut rng, &tests);
        }
        tests.push(TestCase::synthesize(&mut rng));
        s.rebase(&tests);
        assert_eq!(s.curr, s.best);
        assert_eq!(s.eval, corpus_cost(&tests, &s.best));
    }
}
