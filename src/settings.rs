// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILE_NAME: &str = "hashtune_settings.json";

pub const DEFAULT_SEED: u64 = 12345;
pub const DEFAULT_SPECIMENS: usize = 100;
pub const DEFAULT_MAX_TESTS: usize = 1000;
pub const DEFAULT_GROWTH_PERIOD_LOG2: u32 = 18;
pub const DEFAULT_REPORT_CHECK_INTERVAL: u64 = 1 << 10;
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 60;

/// Tunables of a search run. Missing fields in a settings file fall back to
/// the defaults: seed 12345, 100 specimens, up to 1000 tests, growth every
/// 2^18 loops, timed reports every 60 s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub seed: u64,
    pub specimens: usize,
    pub max_tests: usize,
    /// The corpus grows on every loop `n` where `(n + 1)` is a multiple of `2^growth_period_log2`.
    pub growth_period_log2: u32,
    /// Timed reports are only considered on loops that are multiples of this.
    pub report_check_interval: u64,
    pub report_interval_secs: u64,
    pub max_loops: Option<u64>,
    pub max_seconds: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            specimens: DEFAULT_SPECIMENS,
            max_tests: DEFAULT_MAX_TESTS,
            growth_period_log2: DEFAULT_GROWTH_PERIOD_LOG2,
            report_check_interval: DEFAULT_REPORT_CHECK_INTERVAL,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            max_loops: None,
            max_seconds: None,
        }
    }
}

impl SearchSettings {
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(SETTINGS_FILE_NAME)
    }

    pub fn load_from_disk(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&data)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn save_to_disk(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn sanitize(&mut self) {
        self.specimens = self.specimens.clamp(1, 100_000);
        self.max_tests = self.max_tests.clamp(1, 1_000_000);
        self.growth_period_log2 = self.growth_period_log2.clamp(0, 40);
        self.report_check_interval = self.report_check_interval.clamp(1, 1 << 30);
        self.report_interval_secs = self.report_interval_secs.min(86_400);
    }

    pub fn growth_period(&self) -> u64 {
        1u64 << self.growth_period_log2.min(63)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_seconds.map(Duration::from_secs)
    }
}
