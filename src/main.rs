use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use phonegrab::config::{self, AppConfig};
use phonegrab::detection::preprocessing::ThresholdMode;
use phonegrab::{ScanError, Session};

#[derive(Parser)]
#[command(name = "phonegrab")]
#[command(about = "Extract phone numbers from images with OCR")]
struct Cli {
    /// Images to scan (.png, .jpg, .jpeg, .bmp)
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the OCR models
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Binarization threshold: a level from 0 to 255, or "otsu"
    #[arg(long, value_name = "LEVEL")]
    threshold: Option<ThresholdMode>,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Write the effective configuration to the default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Open the window even when images are given
    #[cfg(feature = "gui")]
    #[arg(long)]
    gui: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr; stdout only carries the numbers
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_model_dir_override(args.model_dir.clone());
    if let Some(threshold) = args.threshold {
        config.preprocess.threshold = threshold;
    }

    if args.init_config {
        let path = config::default_config_path()
            .context("Could not determine the platform config directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        config::save_config(&config, &path)?;
        info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    if wants_gui(&args) {
        return launch_gui(config, args.debug_out);
    }

    let mut session = Session::from_config(&config, args.debug_out)?;

    session.select_images(args.images);

    // The session logs skipped files, failed images and the summary itself
    match session.process() {
        Ok(_) => {}
        Err(ScanError::NoImagesSelected) => return Ok(()),
        Err(e) => return Err(e.into()),
    }

    match session.copy_text() {
        Ok(payload) => println!("{}", payload.text),
        Err(ScanError::EmptyResultCopy) => info!("No numbers found"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn wants_gui(args: &Cli) -> bool {
    args.gui || args.images.is_empty()
}

#[cfg(not(feature = "gui"))]
fn wants_gui(_args: &Cli) -> bool {
    false
}

#[cfg(feature = "gui")]
fn launch_gui(config: AppConfig, debug_out: Option<PathBuf>) -> anyhow::Result<()> {
    phonegrab::gui::run(config, debug_out).map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

#[cfg(not(feature = "gui"))]
fn launch_gui(_config: AppConfig, _debug_out: Option<PathBuf>) -> anyhow::Result<()> {
    anyhow::bail!("this build was compiled without the `gui` feature")
}
