//! Skin metrics command-line tool: analyzes image frames as one stream.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use skin_metrics::config::Config;
use skin_metrics::filters::create_filter;
use skin_metrics::landmarks::LandmarkSet;
use skin_metrics::utils::image_conversion::load_frame;
use skin_metrics::{SkinAnalyzer, SkinMetrics};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image frames to analyze, in stream order
    #[arg(required_unless_present = "print_config")]
    frames: Vec<PathBuf>,

    /// Landmark file (JSON or YAML list of [x, y] rows) applied to every frame
    #[arg(short, long)]
    landmarks: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Smoother override (none, exponential[:alpha], moving_average[:window])
    #[arg(short, long)]
    filter: Option<String>,

    /// Normalize lighting before analysis
    #[arg(long)]
    normalize_lighting: bool,

    /// Seed for reproducible fallback jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Disable fallback jitter
    #[arg(long)]
    no_jitter: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: String,
    #[serde(flatten)]
    metrics: &'a SkinMetrics,
}

fn load_config(args: &Args) -> Config {
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if args.normalize_lighting {
        config.lighting.enabled = true;
    }
    if args.seed.is_some() {
        config.fallback.seed = args.seed;
    }
    if args.no_jitter {
        config.fallback.jitter = false;
    }
    config
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    let config = load_config(&args);

    if args.print_config {
        print!("{}", serde_yaml::to_string(&config).context("Failed to serialize configuration")?);
        return Ok(());
    }

    let landmarks = args
        .landmarks
        .as_ref()
        .map(|path| {
            LandmarkSet::from_file(path).with_context(|| format!("Failed to load landmarks from {}", path.display()))
        })
        .transpose()?;

    let mut analyzer = SkinAnalyzer::new(config)?;
    if let Some(filter_str) = &args.filter {
        analyzer.set_filter(create_filter(filter_str)?);
    }

    info!("Analyzing {} frame(s) with {}", args.frames.len(), analyzer.filter_name());

    for path in &args.frames {
        let frame = load_frame(path).with_context(|| format!("Failed to load frame {}", path.display()))?;
        let metrics = analyzer.process(&frame, landmarks.as_ref());
        let record = FrameRecord {
            frame: path.display().to_string(),
            metrics: &metrics,
        };
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}
