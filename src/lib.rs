//! Layoutscan: heuristic layout analysis for scanned print templates.
//!
//! Given a photo or scan of a printed card, layoutscan finds the boxes that
//! probably hold text, proposes where a printed code block (QR or barcode)
//! might sit, and labels the page as the dense front or the sparse back.
//! Nothing is recognised or decoded; the output is geometry only.
//!
//! # Modules
//!
//! - [`raster`]: Image loading and the luminance buffer
//! - [`regions`]: Edge detection, dilation and text region extraction
//! - [`marker`]: Corner detection and marker candidate scoring
//! - [`layout`]: Descriptor types and front/back classification
//! - [`analysis`]: The end-to-end pipeline and batch directory scanning
//! - [`report`]: Text, JSON and CSV rendering
//! - [`job`]: Job-status update statements for a background worker
//! - [`error`]: Error types for layoutscan operations

pub mod analysis;
pub mod error;
mod gradient;
pub mod job;
pub mod layout;
pub mod marker;
pub mod raster;
pub mod regions;
pub mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use analysis::{analyze_path, analyze_raster, analyze_target, AnalyzeOptions, Analysis};
pub use error::LayoutscanError;
pub use layout::{LayoutDescriptor, LayoutType, MarkerCandidate, TextRegion};
pub use raster::RasterImage;

/// The layoutscan CLI application.
#[derive(Parser)]
#[command(name = "layoutscan")]
#[command(version, author, about)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Image file to analyze, or a directory to scan recursively.
    image_path: PathBuf,

    /// Output format ('text', 'json', or 'csv').
    #[arg(long, env = "LAYOUTSCAN_OUTPUT", default_value = "text")]
    output: String,

    /// List every detected text region in the text report.
    #[arg(long)]
    list_regions: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Run the layoutscan CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LayoutscanError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Reject a bad format before spending time on analysis.
    let format: report::ReportFormat = cli.output.parse()?;
    let report_opts = report::ReportOptions {
        format,
        list_regions: cli.list_regions,
    };

    let analyses = analyze_target(&cli.image_path, &AnalyzeOptions::default())?;
    let rendered = report::render(&analyses, &report_opts)?;
    print!("{}", rendered);

    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("layoutscan={}", level)));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
