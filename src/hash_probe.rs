// Standalone scorer for a single parameter set
// Run with: cargo run --bin hash_probe -- --params L1,R1,ADD1,MULT1,L2,R2,ADD2,MULT2

use anyhow::{bail, Context};
use clap::Parser;
use rand_mt::Mt64;

use hashtune::naming::params::generate_params_name;
use hashtune::quality::ideal_load;
use hashtune::{bucket_counts, corpus_cost, cost, HashParams, Stage, TestCase, STAGES};

#[derive(Parser, Debug)]
#[command(name = "hash_probe")]
#[command(about = "Score one hash parameter set against freshly sampled test cases")]
struct CliArgs {
    /// Eight comma-separated values in report order: shiftL,shiftR,add,mult per stage.
    /// Shift values may be given as -1.
    #[arg(long, allow_hyphen_values = true)]
    params: String,

    /// Number of test cases to sample.
    #[arg(long, default_value_t = 100)]
    tests: usize,

    /// Seed for the sampling stream.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Print every bucket count next to the ideal load.
    #[arg(long, default_value_t = false)]
    histogram: bool,
}

fn parse_shift(text: &str) -> anyhow::Result<u32> {
    let value: i64 = text.trim().parse().with_context(|| format!("bad shift {:?}", text))?;
    if !(-1..=i64::from(u32::MAX)).contains(&value) {
        bail!("shift {} out of range", value);
    }
    Ok(value as u32)
}

fn parse_word(text: &str) -> anyhow::Result<u64> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.with_context(|| format!("bad 64-bit value {:?}", text))
}

fn parse_params(text: &str) -> anyhow::Result<HashParams> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != STAGES * 4 {
        bail!("expected {} values, got {}", STAGES * 4, fields.len());
    }
    let mut stages = [Stage::default(); STAGES];
    for (stage, chunk) in stages.iter_mut().zip(fields.chunks(4)) {
        *stage = Stage {
            shift_l: parse_shift(chunk[0])?,
            shift_r: parse_shift(chunk[1])?,
            add: parse_word(chunk[2])?,
            mult: parse_word(chunk[3])?,
        };
    }
    Ok(HashParams::new(stages))
}

fn main() -> anyhow::Result<()> {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .init();

    let cli = CliArgs::parse();
    let params = parse_params(&cli.params)?;
    if cli.tests == 0 {
        bail!("--tests must be at least 1");
    }

    let mut rng = Mt64::new(cli.seed);
    let tests: Vec<TestCase> = (0..cli.tests).map(|_| TestCase::synthesize(&mut rng)).collect();
    log::info!("sampled {} test cases with seed {}", tests.len(), cli.seed);

    for (i, test) in tests.iter().enumerate() {
        println!(
            "test {:4}: buckets={:2} keys={:3} cost={:.6}",
            i,
            test.buckets(),
            test.len(),
            cost(test, &params)
        );
        if cli.histogram {
            let counts = bucket_counts(test, &params);
            let line: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
            println!("           ideal={} counts=[{}]", ideal_load(test), line.join(" "));
        }
    }

    let mean = corpus_cost(&tests, &params);
    println!("params: {}", params);
    println!("name:   {}", generate_params_name(&params, mean));
    println!("mean:   {}", mean);
    Ok(())
}
