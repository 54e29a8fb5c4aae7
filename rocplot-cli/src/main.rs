//! rocplot CLI: compute a ROC curve from a label/score table and save it as an image.

use clap::Parser;
use rocplot_core::RocplotConfig;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const USAGE: &str = "Usage: rocplot <input_file> <output_image>";

/// Plot the ROC curve of a binary classifier and report its AUC.
///
/// The first two columns of the input table are read as (label, score). The
/// larger label value is the positive class.
#[derive(Parser, Debug)]
#[command(
    name = "rocplot",
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Spreadsheet (xlsx, xls, ods) or delimited text (csv, tsv) with labels and scores
    input_file: PathBuf,

    /// Image to write (png, jpg, bmp or svg, chosen by extension)
    output_image: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Anything but exactly two paths is a usage error, flags included.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    let config = RocplotConfig::default();
    init_tracing(&config.log_level);

    let curve = rocplot_core::generate_roc_curve(&cli.input_file, &cli.output_image, &config)?;
    tracing::debug!(
        auc = curve.auc,
        points = curve.points.len(),
        "ROC computation finished"
    );

    println!("ROC curve saved as {}", cli.output_image.display());
    Ok(())
}

/// Human-readable logs on stderr; stdout is reserved for the result line.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}
