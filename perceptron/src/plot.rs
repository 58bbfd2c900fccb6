//! Plain data for an external plotter: the points split by class and the two
//! lines sampled over `x ∈ [-1, 1]`.

use crate::{Dataset, Label, LinearBoundary, Perceptron, Point};

/// Distance between two consecutive samples of a line.
pub const STEP: f32 = 0.1;

/// Samples per line, both ends of `[-1, 1]` included.
pub const SAMPLES: usize = 21;

pub type Polyline = Vec<[f32; 2]>;

/// The sample abscissas, computed from an integer index so rounding errors
/// don't accumulate along the line.
pub fn sample_xs() -> impl Iterator<Item = f32> {
    (0..SAMPLES).map(|i| -1. + STEP * i as f32)
}

pub fn target_line(boundary: &LinearBoundary) -> Polyline {
    sample_xs().map(|x| [x, boundary.value_at(x)]).collect()
}

/// The learned decision boundary, `None` while `wy` is zero.
pub fn decision_boundary(perceptron: &Perceptron) -> Option<Polyline> {
    sample_xs()
        .map(|x| perceptron.decision_boundary_at(x).map(|y| [x, y]))
        .collect()
}

/// Splits the points by label, `(positive, negative)`.
pub fn partition(dataset: &Dataset) -> (Polyline, Polyline) {
    let with = |label: Label| coords(dataset.iter().filter(|p| p.label() == label));
    (with(Label::Positive), with(Label::Negative))
}

fn coords<'a>(points: impl Iterator<Item = &'a Point>) -> Polyline {
    points.map(|p| [p.x(), p.y()]).collect()
}
