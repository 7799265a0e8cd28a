use std::path::PathBuf;

use anyhow::Context;
use bmi_synth::{
    parameters::{DEFAULT_NOISE_SCALE, DEFAULT_SAMPLE_COUNT, DEFAULT_THRESHOLD},
    plot, summary, table, Parameters, Session,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Generate synthetic height/weight samples, label them by a noisy BMI
/// biomarker and render the result as a CSV table and SVG charts.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of samples (M)
    #[arg(short = 'm', long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// Standard deviation of the biomarker noise (sigma)
    #[arg(long, default_value_t = DEFAULT_NOISE_SCALE)]
    sigma: f64,

    /// Classification threshold (tau)
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    tau: f64,

    /// Seed for reproducible runs; OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Drop physiologically implausible samples before rendering
    #[arg(long)]
    filter: bool,

    /// Directory receiving samples.csv and the charts
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let parameters = Parameters::new(args.samples, args.sigma, args.tau)?;
    let mut session = match args.seed {
        Some(seed) => Session::seeded(parameters, seed)?,
        None => Session::new(parameters)?,
    };

    if args.filter {
        session.filter()?;
        if session.samples().is_empty() {
            warn!("every sample was filtered out, rendering empty charts");
        }
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let table_path = args.output_dir.join("samples.csv");
    table::write_table_file(session.samples(), &table_path)
        .with_context(|| format!("writing {}", table_path.display()))?;

    let plots = plot::render_all(session.samples(), session.parameters().threshold(), &args.output_dir)
        .context("rendering charts")?;

    if let Some(summary) = summary::summarize(session.samples()) {
        info!(
            height_mean = summary.height.mean,
            weight_mean = summary.weight.mean,
            bmi_mean = summary.bmi.mean,
            height_weight_correlation = summary.height_weight_correlation(),
            "sample summary"
        );
    }

    let counts = session.counts();
    println!(
        "samples: {}, healthy: {}, diabetic: {}",
        session.samples().len(),
        counts.healthy,
        counts.diabetic
    );
    println!("table: {}", table_path.display());
    println!("bmi histogram: {}", plots.bmi_histogram.display());
    println!("biomarker histogram: {}", plots.biomarker_histogram.display());
    println!("scatter: {}", plots.scatter.display());

    Ok(())
}
