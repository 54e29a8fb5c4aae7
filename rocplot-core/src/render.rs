//! ROC chart rendering with `plotters`.

use crate::config::PlotConfig;
use crate::error::{Result, RocError};
use crate::roc::RocCurve;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

pub const TITLE: &str = "Receiver Operating Characteristic";
pub const X_LABEL: &str = "False Positive Rate";
pub const Y_LABEL: &str = "True Positive Rate";

const X_RANGE: std::ops::Range<f64> = 0.0..1.0;
const Y_RANGE: std::ops::Range<f64> = 0.0..1.05;

/// Output image formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "svg" => Ok(Self::Svg),
            "" => Err(RocError::render(format!(
                "cannot infer image format of {}: no file extension",
                path.display()
            ))),
            other => Err(RocError::render(format!(
                "unsupported image format '.{other}' (expected png, jpg, jpeg, bmp or svg)"
            ))),
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(self, Self::Svg)
    }
}

/// Legend text for a curve, AUC rounded to two decimals.
pub fn legend_label(auc: f64) -> String {
    format!("ROC curve (area = {auc:.2})")
}

/// Render the ROC curve, the chance diagonal and the AUC legend to `path`.
///
/// The file is created or overwritten.
pub fn render_roc(curve: &RocCurve, path: &Path, config: &PlotConfig) -> Result<()> {
    let format = ImageFormat::from_path(path)?;

    // Surface an unwritable destination as a plain I/O error before drawing.
    std::fs::File::create(path).map_err(|e| RocError::io(path, e))?;

    let size = (config.width, config.height);
    let drawn = if format.is_vector() {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_chart(&root, curve, config)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_chart(&root, curve, config)
    };
    drawn?;

    tracing::info!(path = %path.display(), ?format, auc = curve.auc, "ROC curve rendered");
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    curve: &RocCurve,
    config: &PlotConfig,
) -> Result<()> {
    draw_onto(root, curve, config).map_err(|e| RocError::render(e.to_string()))
}

fn draw_onto<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    curve: &RocCurve,
    config: &PlotConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let [r, g, b] = config.curve_color;
    let curve_style = ShapeStyle::from(&RGBColor(r, g, b)).stroke_width(config.line_width);
    let [r, g, b] = config.reference_color;
    let reference_style = ShapeStyle::from(&RGBColor(r, g, b)).stroke_width(config.line_width);

    let mut chart = ChartBuilder::on(root)
        .margin(config.margin)
        .caption(TITLE, ("sans-serif", config.title_font_size))
        .x_label_area_size(50)
        .y_label_area_size(55)
        .build_cartesian_2d(X_RANGE, Y_RANGE)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style(("sans-serif", config.label_font_size))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            curve.points.iter().map(|p| (p.fpr, p.tpr)),
            curve_style,
        ))?
        .label(legend_label(curve.auc))
        .legend(move |(x, y)| PathElement::new(vec![(x - 10, y), (x + 10, y)], curve_style));

    // Chance diagonal
    chart.draw_series(DashedLineSeries::new(
        vec![(0.0, 0.0), (1.0, 1.0)],
        6,
        4,
        reference_style,
    ))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
