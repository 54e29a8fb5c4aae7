//! ROC curve and AUC computation for binary classifiers.
//!
//! Samples are swept in descending score order. All samples sharing a score
//! form a single threshold step, so ties never produce an artificial staircase.
//! AUC is the trapezoidal integral of TPR over FPR.

use crate::error::{Result, RocError};
use serde::{Deserialize, Serialize};

/// One observation: ground truth and the classifier's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// `true` for the positive class.
    pub label: bool,
    pub score: f64,
}

impl Sample {
    pub fn new(label: bool, score: f64) -> Self {
        Self { label, score }
    }
}

/// A single point on the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    /// False positive rate: FP / (FP + TN).
    pub fpr: f64,
    /// True positive rate (recall): TP / (TP + FN).
    pub tpr: f64,
    /// Samples with `score >= threshold` are predicted positive.
    pub threshold: f64,
}

/// ROC curve with AUC.
#[derive(Debug, Clone)]
pub struct RocCurve {
    /// Points from (0, 0) to (1, 1), ordered by decreasing threshold.
    pub points: Vec<RocPoint>,
    /// Area under the curve (trapezoidal rule).
    pub auc: f64,
    pub positives: usize,
    pub negatives: usize,
}

impl RocCurve {
    pub fn fprs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.fpr).collect()
    }

    pub fn tprs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.tpr).collect()
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.threshold).collect()
    }
}

/// Options controlling which points are reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocOptions {
    /// Remove interior points that lie on the straight segment between their
    /// neighbours. They add nothing to the drawn curve or the AUC.
    #[serde(default = "default_drop_intermediate")]
    pub drop_intermediate: bool,
}

impl Default for RocOptions {
    fn default() -> Self {
        Self {
            drop_intermediate: default_drop_intermediate(),
        }
    }
}

fn default_drop_intermediate() -> bool {
    true
}

/// Cumulative confusion counts at one threshold.
#[derive(Debug, Clone, Copy)]
struct Step {
    threshold: f64,
    tp: usize,
    fp: usize,
}

/// Compute the ROC curve with default options.
pub fn roc_curve(samples: &[Sample]) -> Result<RocCurve> {
    roc_curve_with(samples, &RocOptions::default())
}

/// Compute the ROC curve.
///
/// # Errors
///
/// Returns [`RocError::Input`] for empty input or NaN scores, and
/// [`RocError::DegenerateLabels`] when either class is absent.
pub fn roc_curve_with(samples: &[Sample], options: &RocOptions) -> Result<RocCurve> {
    if samples.is_empty() {
        return Err(RocError::input("no samples to evaluate"));
    }
    if let Some(pos) = samples.iter().position(|s| s.score.is_nan()) {
        return Err(RocError::input(format!("score at sample {} is NaN", pos + 1)));
    }

    let positives = samples.iter().filter(|s| s.label).count();
    let negatives = samples.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(RocError::DegenerateLabels {
            positives,
            negatives,
        });
    }

    let steps = threshold_steps(samples);

    let p = positives as f64;
    let n = negatives as f64;
    let to_point = |step: &Step| RocPoint {
        fpr: step.fp as f64 / n,
        tpr: step.tp as f64 / p,
        threshold: step.threshold,
    };

    let all_points: Vec<RocPoint> = steps.iter().map(to_point).collect();
    let auc = trapezoidal_auc(
        &all_points.iter().map(|p| p.fpr).collect::<Vec<_>>(),
        &all_points.iter().map(|p| p.tpr).collect::<Vec<_>>(),
    );

    let points = if options.drop_intermediate {
        prune_collinear(&steps).iter().map(to_point).collect()
    } else {
        all_points
    };

    tracing::debug!(
        samples = samples.len(),
        positives,
        negatives,
        thresholds = steps.len() - 1,
        points = points.len(),
        auc,
        "Computed ROC curve"
    );

    Ok(RocCurve {
        points,
        auc,
        positives,
        negatives,
    })
}

/// Compute only the AUC of the ROC curve.
///
/// Shorthand for `roc_curve(samples)?.auc`.
pub fn roc_auc(samples: &[Sample]) -> Result<f64> {
    Ok(roc_curve(samples)?.auc)
}

/// Area under a piecewise-linear curve by the trapezoidal rule.
///
/// `x` must be sorted ascending. Returns 0.0 for fewer than two points or
/// mismatched lengths.
pub fn trapezoidal_auc(x: &[f64], y: &[f64]) -> f64 {
    if x.len() < 2 || x.len() != y.len() {
        return 0.0;
    }
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

/// Cumulative counts at every distinct score, highest first, behind a
/// leading `+inf` step where nothing is predicted positive.
fn threshold_steps(samples: &[Sample]) -> Vec<Step> {
    let mut sorted: Vec<&Sample> = samples.iter().collect();
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut steps = Vec::with_capacity(sorted.len() + 1);
    steps.push(Step {
        threshold: f64::INFINITY,
        tp: 0,
        fp: 0,
    });

    let mut tp = 0usize;
    let mut fp = 0usize;
    for group in sorted.chunk_by(|a, b| a.score == b.score) {
        for sample in group {
            if sample.label {
                tp += 1;
            } else {
                fp += 1;
            }
        }
        steps.push(Step {
            threshold: group[0].score,
            tp,
            fp,
        });
    }
    steps
}

/// Keep the endpoints and every interior step that turns a corner.
///
/// Collinearity is decided on the integer counts, so vertical, horizontal and
/// diagonal runs are all detected exactly.
fn prune_collinear(steps: &[Step]) -> Vec<Step> {
    if steps.len() <= 2 {
        return steps.to_vec();
    }
    let mut kept = Vec::with_capacity(steps.len());
    kept.push(steps[0]);
    for w in steps.windows(3) {
        let (prev, cur, next) = (w[0], w[1], w[2]);
        // Counts only grow along the sweep, so these differences never underflow.
        let (dfp_in, dtp_in) = (cur.fp - prev.fp, cur.tp - prev.tp);
        let (dfp_out, dtp_out) = (next.fp - cur.fp, next.tp - cur.tp);
        if dfp_in * dtp_out != dtp_in * dfp_out {
            kept.push(cur);
        }
    }
    kept.push(steps[steps.len() - 1]);
    kept
}
