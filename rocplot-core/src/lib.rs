//! # rocplot-core: ROC curves and AUC for binary classifiers
//!
//! Loads `(label, score)` pairs from the first two columns of a spreadsheet or
//! delimited text file, computes the ROC curve and its area, and renders the
//! curve to an image.
//!
//! Conventions:
//! - the larger of the two label values is the positive class;
//! - samples with equal scores share one threshold step.

pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod roc;

pub use config::{PlotConfig, RocplotConfig};
pub use data::{Dataset, LabelValue, PositiveClass, load_dataset, load_samples};
pub use error::RocError;
pub use render::{ImageFormat, render_roc};
pub use roc::{RocCurve, RocOptions, RocPoint, Sample, roc_auc, roc_curve, roc_curve_with};

use std::path::Path;

/// Load `input`, compute its ROC curve and render it to `output`.
///
/// Returns the computed curve so callers can report on it.
pub fn generate_roc_curve(
    input: &Path,
    output: &Path,
    config: &RocplotConfig,
) -> error::Result<RocCurve> {
    // Fail on an unusable output extension before reading any input.
    ImageFormat::from_path(output)?;

    let samples = load_samples(input)?;
    let curve = roc_curve_with(&samples, &config.roc)?;
    render_roc(&curve, output, &config.plot)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        auc = curve.auc,
        positives = curve.positives,
        negatives = curve.negatives,
        "Generated ROC curve"
    );
    Ok(curve)
}
