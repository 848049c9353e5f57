// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

//! Population search driver.
//!
//! Every loop first checks whether the corpus is due to grow, then runs one
//! mutation pass over the whole population in index order, then decides
//! whether to report. The global best moves only on a strictly lower cost, so
//! on ties the earlier holder keeps it.

use rand::RngCore;
use rand_mt::Mt64;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::corpus::Corpus;
use crate::hash::HashParams;
use crate::mutation::MutationKind;
use crate::naming::params::generate_params_name;
use crate::report::{Report, Reporter};
use crate::settings::SearchSettings;
use crate::specimen::{Specimen, Step, StepOutcome};

/// When [`Search::run`] should return. The default never stops.
#[derive(Debug, Clone, Default)]
pub struct StopCondition {
    pub max_loops: Option<u64>,
    pub max_duration: Option<Duration>,
    pub cancel: Option<Arc<AtomicBool>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    LoopLimit,
    TimeLimit,
    Cancelled,
}

impl StopCondition {
    pub fn never() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            max_loops: settings.max_loops,
            max_duration: settings.max_duration(),
            cancel: None,
        }
    }

    pub fn with_max_loops(mut self, loops: u64) -> Self {
        self.max_loops = Some(loops);
        self
    }

    pub fn with_max_duration(mut self, duration: Duration) -> Self {
        self.max_duration = Some(duration);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check(&self, loops_done: u64, started: Instant) -> Option<StopReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if let Some(max) = self.max_loops {
            if loops_done >= max {
                return Some(StopReason::LoopLimit);
            }
        }
        if let Some(max) = self.max_duration {
            if started.elapsed() >= max {
                return Some(StopReason::TimeLimit);
            }
        }
        None
    }
}

/// Acceptance counters for the whole run.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub accepted: u64,
    pub reverted: u64,
    pub drifted: u64,
    /// Times the population-wide best moved to a strictly lower cost.
    pub improvements: u64,
    pub corpus_growths: u64,
    pub accepted_by_kind: HashMap<MutationKind, u64>,
}

impl SearchStats {
    pub fn record(&mut self, step: &Step) {
        match step.outcome {
            StepOutcome::Accepted => {
                self.accepted += 1;
                *self.accepted_by_kind.entry(step.mutation.kind).or_insert(0) += 1;
            }
            StepOutcome::Reverted => self.reverted += 1,
            StepOutcome::Drifted => self.drifted += 1,
        }
    }

    pub fn steps(&self) -> u64 {
        self.accepted + self.reverted + self.drifted
    }

    /// One-line summary, accepted counts listed in kind order.
    pub fn summary(&self) -> String {
        let mut kinds: Vec<_> = self.accepted_by_kind.iter().collect();
        kinds.sort();
        let kinds: Vec<String> = kinds.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!(
            "steps={} accepted={} reverted={} drifted={} improvements={} growths={} [{}]",
            self.steps(),
            self.accepted,
            self.reverted,
            self.drifted,
            self.improvements,
            self.corpus_growths,
            kinds.join(" ")
        )
    }
}

/// What [`Search::run`] hands back once it stops.
#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub reason: StopReason,
    pub loops: u64,
    pub elapsed: Duration,
    pub tests: usize,
    pub best_eval: f64,
    pub best_params: HashParams,
}

fn best_index(population: &[Specimen]) -> usize {
    let mut best = 0;
    for (i, s) in population.iter().enumerate() {
        if s.eval < population[best].eval {
            best = i;
        }
    }
    best
}

pub struct Search<R: RngCore = Mt64> {
    rng: R,
    corpus: Corpus,
    population: Vec<Specimen>,
    best: usize,
    /// Index of the next loop to run.
    loops: u64,
    show: bool,
    last_report: Instant,
    settings: SearchSettings,
    stats: SearchStats,
}

impl Search<Mt64> {
    /// Seeds the Mersenne Twister with `settings.seed` and bootstraps.
    pub fn new(settings: SearchSettings) -> Self {
        let rng = Mt64::new(settings.seed);
        Self::with_rng(rng, settings)
    }
}

impl<R: RngCore> Search<R> {
    /// One test case, then every specimen scored against it.
    pub fn with_rng(mut rng: R, mut settings: SearchSettings) -> Self {
        settings.sanitize();
        let corpus = Corpus::seeded(&mut rng, settings.max_tests);
        let population: Vec<Specimen> = (0..settings.specimens)
            .map(|_| Specimen::random(&mut rng, corpus.tests()))
            .collect();
        // Scanning instead of starting at 0 can, on some seeds, skip early reports an unscanned start would emit.
        let best = best_index(&population);
        log::debug!(
            "bootstrapped {} specimens against {} keys in {} buckets, best eval {:.6}",
            population.len(),
            corpus.tests()[0].len(),
            corpus.tests()[0].buckets(),
            population[best].eval
        );
        Self {
            rng,
            corpus,
            population,
            best,
            loops: 0,
            show: false,
            last_report: Instant::now(),
            settings,
            stats: SearchStats::default(),
        }
    }

    pub fn loops(&self) -> u64 {
        self.loops
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn population(&self) -> &[Specimen] {
        &self.population
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best_specimen(&self) -> &Specimen {
        &self.population[self.best]
    }

    pub fn best_eval(&self) -> f64 {
        self.best_specimen().eval
    }

    pub fn best_params(&self) -> HashParams {
        self.best_specimen().best
    }

    fn snapshot(&self, loop_index: u64) -> Report {
        Report {
            loops: loop_index,
            tests: self.corpus.len(),
            eval: self.best_eval(),
            params: self.best_params(),
        }
    }

    /// Appends one test case and rescores the whole population against the
    /// larger corpus. Does nothing once the corpus is full.
    pub fn grow_corpus(&mut self) -> bool {
        if !self.corpus.grow(&mut self.rng) {
            return false;
        }
        let tests = self.corpus.tests();
        for specimen in self.population.iter_mut() {
            specimen.rebase(tests);
        }
        self.best = best_index(&self.population);
        self.show = true;
        self.stats.corpus_growths += 1;
        log::info!(
            "loop {}: corpus grown to {} tests, best eval {:.6} ({})",
            self.loops,
            self.corpus.len(),
            self.best_eval(),
            generate_params_name(&self.best_params(), self.best_eval())
        );
        true
    }

    /// Mutates every specimen once, in index order.
    pub fn mutation_pass(&mut self) {
        let tests = self.corpus.tests();
        for i in 0..self.population.len() {
            let step = self.population[i].step(&mut self.rng, tests);
            self.stats.record(&step);
            if step.outcome == StepOutcome::Accepted
                && self.population[i].eval < self.population[self.best].eval
            {
                self.best = i;
                self.show = true;
                self.stats.improvements += 1;
            }
        }
    }

    /// Runs one loop. Returns a report when one is due.
    pub fn step(&mut self) -> Option<Report> {
        let loop_index = self.loops;

        if !self.corpus.is_full() && (loop_index + 1) % self.settings.growth_period() == 0 {
            self.grow_corpus();
        }

        self.mutation_pass();

        let timed = loop_index % self.settings.report_check_interval == 0
            && self.last_report.elapsed() >= self.settings.report_interval();
        let report = if self.show || timed {
            self.show = false;
            self.last_report = Instant::now();
            Some(self.snapshot(loop_index))
        } else {
            None
        };

        self.loops += 1;
        report
    }

    /// Loops until `stop` fires, sending reports to `reporter`.
    ///
    /// If the last loop did not report, a closing report is sent so the final
    /// state is always visible.
    pub fn run(&mut self, stop: &StopCondition, reporter: &mut impl Reporter) -> SearchSummary {
        let started = Instant::now();
        let first_loop = self.loops;
        let mut reported_last = false;

        let reason = loop {
            if let Some(reason) = stop.check(self.loops - first_loop, started) {
                break reason;
            }
            match self.step() {
                Some(report) => {
                    reporter.report(&report);
                    log::debug!("{}", self.stats.summary());
                    reported_last = true;
                }
                None => reported_last = false,
            }
        };

        if !reported_last && self.loops > first_loop {
            reporter.report(&self.snapshot(self.loops - 1));
        }

        let summary = SearchSummary {
            reason,
            loops: self.loops - first_loop,
            elapsed: started.elapsed(),
            tests: self.corpus.len(),
            best_eval: self.best_eval(),
            best_params: self.best_params(),
        };
        log::info!(
            "stopped ({:?}) after {} loops in {:.1}s, best eval {:.6}",
            summary.reason,
            summary.loops,
            summary.elapsed.as_secs_f64(),
            summary.best_eval
        );
        summary
    }
}
