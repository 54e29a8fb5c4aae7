//! Configuration for rocplot.
//!
//! The `rocplot` binary always runs with [`RocplotConfig::default`]. Library
//! callers can layer a TOML file over the defaults with [`load_config_from`];
//! nothing is discovered from the environment or the home directory.

use crate::error::{Result, RocError};
use crate::roc::RocOptions;
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocplotConfig {
    /// Log filter for the stderr subscriber (e.g. "warn", "info", "rocplot_core=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Curve computation options.
    #[serde(default)]
    pub roc: RocOptions,
    /// Chart appearance.
    #[serde(default)]
    pub plot: PlotConfig,
}

impl Default for RocplotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            roc: RocOptions::default(),
            plot: PlotConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Chart appearance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Outer margin around the chart, in pixels.
    #[serde(default = "default_margin")]
    pub margin: i32,
    /// Stroke width for both the curve and the reference diagonal.
    #[serde(default = "default_line_width")]
    pub line_width: u32,
    #[serde(default = "default_title_font_size")]
    pub title_font_size: u32,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: u32,
    /// RGB colour of the ROC curve.
    #[serde(default = "default_curve_color")]
    pub curve_color: [u8; 3],
    /// RGB colour of the chance diagonal.
    #[serde(default = "default_reference_color")]
    pub reference_color: [u8; 3],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            line_width: default_line_width(),
            title_font_size: default_title_font_size(),
            label_font_size: default_label_font_size(),
            curve_color: default_curve_color(),
            reference_color: default_reference_color(),
        }
    }
}

fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    480
}
fn default_margin() -> i32 {
    20
}
fn default_line_width() -> u32 {
    2
}
fn default_title_font_size() -> u32 {
    20
}
fn default_label_font_size() -> u32 {
    15
}
fn default_curve_color() -> [u8; 3] {
    // darkorange
    [255, 140, 0]
}
fn default_reference_color() -> [u8; 3] {
    // navy
    [0, 0, 128]
}

/// Load configuration from defaults merged with a specific TOML file.
pub fn load_config_from(path: &Path) -> Result<RocplotConfig> {
    if !path.exists() {
        return Err(RocError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    let figment =
        Figment::from(Serialized::defaults(RocplotConfig::default())).merge(Toml::file(path));
    extract(figment)
}

fn extract(figment: Figment) -> Result<RocplotConfig> {
    figment
        .extract()
        .map_err(|e| RocError::Config(e.to_string()))
}
