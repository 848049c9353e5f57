// Hashtune - Hash Parameter Search
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hashtune::naming::run::generate_run_name;
use hashtune::{Search, SearchSettings, StdoutReporter, StopCondition};

#[derive(Parser, Debug)]
#[command(name = "hashtune")]
#[command(about = "Search shift/xor/multiply hash parameters for uniform bucket spread")]
struct CliArgs {
    /// Settings file (JSON). Defaults to ./hashtune_settings.json when present.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Seed for the Mersenne Twister stream.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many loops; if omitted, run until interrupted (^C).
    #[arg(long)]
    max_loops: Option<u64>,

    /// Stop after this many seconds of wall-clock time.
    #[arg(long)]
    max_seconds: Option<u64>,

    /// Write the effective settings to this path and exit.
    #[arg(long)]
    write_settings: Option<PathBuf>,
}

fn load_settings(cli: &CliArgs) -> anyhow::Result<SearchSettings> {
    let mut settings = match &cli.settings {
        Some(path) => SearchSettings::load_from_disk(path)?,
        None => {
            let path = SearchSettings::default_path();
            if path.exists() {
                log::info!("loading settings from {}", path.display());
                SearchSettings::load_from_disk(&path)?
            } else {
                SearchSettings::default()
            }
        }
    };

    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(loops) = cli.max_loops {
        settings.max_loops = Some(loops);
    }
    if let Some(secs) = cli.max_seconds {
        settings.max_seconds = Some(secs);
    }
    settings.sanitize();
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let cli = CliArgs::parse();
    let settings = load_settings(&cli)?;

    if let Some(path) = &cli.write_settings {
        settings
            .save_to_disk(path)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("settings written to {}", path.display());
        return Ok(());
    }

    let stop_flag = Arc::new(AtomicBool::new(false));
    {
        let stop_flag = stop_flag.clone();
        ctrlc::set_handler(move || {
            stop_flag.store(true, Ordering::Relaxed);
        })?;
    }

    log::info!(
        "run {}: seed={} specimens={} max_tests={} growth every 2^{} loops",
        generate_run_name(&settings),
        settings.seed,
        settings.specimens,
        settings.max_tests,
        settings.growth_period_log2
    );

    let stop = StopCondition::from_settings(&settings).with_cancel_flag(stop_flag);
    let mut search = Search::new(settings);
    let summary = search.run(&stop, &mut StdoutReporter);

    log::info!("{}", search.stats().summary());
    log::info!(
        "final: {} tests, best eval {} after {} loops",
        summary.tests,
        summary.best_eval,
        summary.loops
    );
    Ok(())
}
