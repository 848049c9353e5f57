// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

//! Randomized search for the parameters of a two-stage shift/xor/multiply
//! hash that spreads 64-bit keys evenly over a small number of buckets.
//!
//! A fixed population of candidates is mutated one field at a time and scored
//! by the standard deviation of bucket occupancy over a corpus of sampled
//! test cases. The corpus grows slowly over the run so the population cannot
//! overfit a handful of samples.

pub mod corpus;
pub mod hash;
pub mod mutation;
pub mod naming;
pub mod quality;
pub mod report;
pub mod search;
pub mod settings;
pub mod specimen;

pub use corpus::{Corpus, TestCase};
pub use hash::{hash, HashParams, Stage, STAGES};
pub use mutation::{mutate, Mutation, MutationKind};
pub use quality::{bucket_counts, corpus_cost, cost};
pub use report::{Report, Reporter, StdoutReporter};
pub use search::{Search, SearchStats, SearchSummary, StopCondition, StopReason};
pub use settings::SearchSettings;
pub use specimen::{Specimen, Step, StepOutcome};
