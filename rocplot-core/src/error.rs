//! Error types for the rocplot-core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for loading, computing and rendering ROC curves.
#[derive(Debug, Error)]
pub enum RocError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Labels are not binary: found {count} distinct values ({})", .values.join(", "))]
    NonBinaryLabels { count: usize, values: Vec<String> },

    #[error(
        "Degenerate labels: ROC needs both classes, got {positives} positive and {negatives} negative samples"
    )]
    DegenerateLabels { positives: usize, negatives: usize },

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RocError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the errors caused by the label column rather than the file format.
    pub fn is_degenerate_data(&self) -> bool {
        matches!(
            self,
            Self::NonBinaryLabels { .. } | Self::DegenerateLabels { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RocError>;
