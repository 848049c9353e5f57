// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::fmt;

use crate::hash::HashParams;

/// Progress snapshot: loop index, corpus size and the population's best.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub loops: u64,
    pub tests: usize,
    pub eval: f64,
    pub params: HashParams,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "loops: {}", self.loops)?;
        writeln!(f, "tests: {}", self.tests)?;
        write!(f, "eval: {}", self.eval)?;
        for stage in &self.params.stages {
            write!(f, "\nshiftL: {}", stage.shift_l)?;
            write!(f, "\nshiftR: {}", stage.shift_r)?;
            write!(f, "\nadd:    {}", stage.add)?;
            write!(f, "\nmult:   {}", stage.mult)?;
        }
        Ok(())
    }
}

/// Sink for progress reports.
pub trait Reporter {
    fn report(&mut self, report: &Report);
}

/// Prints each report to stdout, one field per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&mut self, report: &Report) {
        println!("{}", report);
    }
}

/// Keeps every report in memory.
impl Reporter for Vec<Report> {
    fn report(&mut self, report: &Report) {
        self.push(report.clone());
    }
}
