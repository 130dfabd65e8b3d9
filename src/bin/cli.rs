//! CLI application for garment measurement from a photo.
//!
//! Usage:
//!   tailor-measure <image> --height 180                          # Height-only estimate
//!   tailor-measure <image> --height 180 --landmarks pose.json    # Calibrated from keypoints
//!   tailor-measure <image> --height 180 --landmarks pose.json --json -o out.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tailor_measure::{
    BoxedProvider, EngineConfig, MeasurementEngine, NoPersonProvider, SharedProvider,
    StaticProvider,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tailor-measure")]
#[command(author, version, about = "Thobe measurements from a photo and a height", long_about = None)]
struct Args {
    /// Front-facing photo of the subject
    #[arg(required = true)]
    image: PathBuf,

    /// Subject's true height in centimetres
    #[arg(long)]
    height: f64,

    /// Fit type ("Standard", anything else is slim)
    #[arg(long, default_value = "Standard")]
    fit_type: String,

    /// Recorded detector output (JSON) to use as keypoints
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Heuristics config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tailor_measure={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = MeasurementEngine::new(config);

    let landmarks = args.landmarks.clone();
    let mut provider = SharedProvider::get_or_try_init(move || {
        let provider: BoxedProvider = match landmarks {
            Some(path) => {
                tracing::debug!(path = %path.display(), "replaying recorded keypoints");
                Box::new(StaticProvider::from_json_file(path)?)
            }
            None => Box::new(NoPersonProvider),
        };
        Ok(provider)
    })
    .context("Failed to initialize landmark provider")?;

    let image_bytes = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;

    let result = engine
        .measure(&mut provider, &image_bytes, args.height, &args.fit_type)
        .with_context(|| format!("Failed to measure {}", args.image.display()))?;

    let output_str = if args.json {
        result.to_json_pretty()?
    } else {
        format!("Image: {}\n{}", args.image.display(), result)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        tracing::info!(path = %path.display(), "output written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}
