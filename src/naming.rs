pub mod run {
    // Search run naming

    static RUN_NAME_ADJECTIVES: &[&str] = &[
        "Tranquillus", "Placidus", "Serenus", "Aequus", "Lenis", "Stabilis", "Constans", "Tacitus",
        "Modestus", "Parvus", "Exiguus", "Minutus", "Levis", "Suavis", "Clarus", "Lucidus",
        "Vivax", "Mobilis", "Agilis", "Celer", "Rapidum", "Fluxus", "Motus", "Vigens",
        "Grandis", "Vastus", "Immensus", "Infinitus", "Turbidus", "Procellosus", "Fulminans", "Ferox",
    ];

    pub(super) static RUN_NAME_NOUNS: &[&str] = &[
        "Cribrum", "Loculus", "Arca", "Cista", "Capsa", "Alveus", "Urna", "Amphora",
        "Horreum", "Cella", "Thesaurus", "Receptaculum", "Vas", "Modius", "Saccus", "Corbis",
        "Mensura", "Libra", "Norma", "Regula", "Ordo", "Series", "Numerus", "Summa",
        "Turba", "Multitudo", "Acervus", "Cumulus", "Chaos", "Vortex", "Fluctus", "Aestus",
    ];

    /// Scatters a 64-bit word; splitmix64 finalizer.
    pub(super) fn scramble(mut x: u64) -> u64 {
        x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        x = (x ^ (x >> 27)).wrapping_mul(0x94d4_9bb1_33ae_f111);
        x ^ (x >> 31)
    }

    /// Picks the word at `score` (0..=1, clamped) along `words`, nudged by at
    /// most one slot either way depending on `seed`.
    pub(super) fn pick<'a>(words: &[&'a str], score: f64, seed: u64) -> &'a str {
        let last = words.len().saturating_sub(1);
        let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 };
        let base = (score * last as f64).round() as usize;
        let index = match scramble(seed) % 3 {
            0 => base.saturating_sub(1),
            1 => base,
            _ => base + 1,
        };
        words.get(index.min(last)).copied().unwrap_or("")
    }

    /// Human-readable run label derived from the settings and seed.
    ///
    /// Output format: `Hashtune_<Adj>-<Noun>-<seed%10000>_<YYYYMMDD_HHMMSS_mmm>UTC`
    pub fn generate_run_name(settings: &crate::SearchSettings) -> String {
        // 1 = corpus grows every loop, 0 = every 2^40 loops
        let pace = 1.0 - f64::from(settings.growth_period_log2) / 40.0;
        // 0 = tiny search, 1 = wide population and corpus
        let breadth = (settings.specimens as f64 / 200.0 + settings.max_tests as f64 / 2000.0) / 2.0;

        let adj = pick(RUN_NAME_ADJECTIVES, pace, settings.seed ^ 0xA11C_E551);
        let noun = pick(RUN_NAME_NOUNS, breadth, settings.seed ^ 0xBADC_0DE5);

        let num = settings.seed % 10_000;

        let now = chrono::Utc::now();
        let ts = format!(
            "{}_{:03}",
            now.format("%Y%m%d_%H%M%S"),
            now.timestamp_subsec_millis()
        );

        format!("Hashtune_{}-{}-{:04}_{}UTC", adj, noun, num, ts)
    }
}

pub mod params {
    use super::run::{pick, scramble};
    use crate::HashParams;

    static GENUS: &[&str] = &[
        "Mixtor", "Cribrator", "Distributor", "Dispersor", "Permutator", "Turbator", "Agitator", "Miscellus",
        "Partitor", "Divisor", "Sparsor", "Volvens",
    ];

    static SPECIES: &[&str] = &[
        "aequalis", "uniformis", "planus", "levis", "modicus", "mediocris", "inaequalis", "asper",
        "scaber", "hirtus", "confusus", "turbidus",
    ];

    const SALT_GENUS: u64 = 0x6E75_5301;
    const SALT_SPECIES: u64 = 0x5EC1_E502;

    fn fnv1a64_init() -> u64 {
        0xcbf2_9ce4_8422_2325
    }

    fn fnv1a64_add_u64(mut hash: u64, value: u64) -> u64 {
        for byte in value.to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash
    }

    /// Stable FNV-1a digest of every field of `params`.
    pub fn params_fingerprint(params: &HashParams) -> u64 {
        let mut h = fnv1a64_init();
        for stage in &params.stages {
            h = fnv1a64_add_u64(h, u64::from(stage.shift_l));
            h = fnv1a64_add_u64(h, u64::from(stage.shift_r));
            h = fnv1a64_add_u64(h, stage.add);
            h = fnv1a64_add_u64(h, stage.mult);
        }
        h
    }

    /// Latin label for a parameter set. The genus follows the fingerprint, the
    /// species drifts with `eval` (smoother spread sorts toward "aequalis").
    pub fn generate_params_name(params: &HashParams, eval: f64) -> String {
        let fp = params_fingerprint(params);
        let genus = GENUS[(scramble(fp ^ SALT_GENUS) % GENUS.len() as u64) as usize];
        let species = pick(SPECIES, eval / 4.0, fp ^ SALT_SPECIES);

        format!("{}-{}-{:04x}", genus, species, fp & 0xffff)
    }
}
