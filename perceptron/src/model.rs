use serde::Serialize;

use crate::{Dataset, Label, PerceptronErr, Result};

/// A validated, strictly positive and finite learning rate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LearningRate(f32);

impl LearningRate {
    pub const DEFAULT: Self = Self(0.1);

    /// Creates a new `LearningRate`.
    ///
    /// # Returns
    /// An error if `lr` is not a positive finite number.
    pub fn new(lr: f32) -> Result<Self> {
        if !lr.is_finite() || lr <= 0. {
            return Err(PerceptronErr::invalid(
                "learning rate",
                format!("expected a positive number, got {lr}"),
            ));
        }

        Ok(Self(lr))
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LearningRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The learnable parameters of a two input perceptron.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Weights {
    pub wx: f32,
    pub wy: f32,
    pub bias: f32,
}

impl Weights {
    pub fn new(wx: f32, wy: f32, bias: f32) -> Self {
        Self { wx, wy, bias }
    }

    /// The weighted sum fed to the step activation.
    #[inline]
    pub fn sum(&self, x: f32, y: f32) -> f32 {
        self.wx * x + self.wy * y + self.bias
    }
}

/// A single layer perceptron with a step activation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Perceptron {
    weights: Weights,
}

impl Perceptron {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Zeroes every weight and the bias.
    pub fn reset(&mut self) {
        self.weights = Weights::default();
    }

    /// Classifies `(x, y)`, a zero weighted sum is classified as positive.
    #[inline]
    pub fn predict(&self, x: f32, y: f32) -> Label {
        Label::from_activation(self.weights.sum(x, y))
    }

    /// Runs one training round over `dataset`.
    ///
    /// # Arguments
    /// * `dataset` - The labeled points, visited in order.
    /// * `lr` - The raw learning rate.
    ///
    /// # Returns
    /// The amount of misclassified points, or an error if `lr` is not
    /// positive, in which case the weights are left untouched.
    pub fn update_on_round(&mut self, dataset: &Dataset, lr: f32) -> Result<usize> {
        let lr = LearningRate::new(lr)?;
        Ok(self.train_round(dataset, lr))
    }

    /// Online perceptron rule: every misclassified point updates the weights
    /// immediately, so later points in the same round see the new weights.
    ///
    /// # Returns
    /// The amount of misclassified points.
    pub fn train_round(&mut self, dataset: &Dataset, lr: LearningRate) -> usize {
        let lr = lr.get();
        let mut errors = 0;

        for point in dataset {
            let prediction = self.predict(point.x(), point.y());
            let error = point.label().value() - prediction.value();

            if error != 0. {
                errors += 1;

                let delta = lr * error;
                self.weights.wx += delta * point.x();
                self.weights.wy += delta * point.y();
                self.weights.bias += delta;
            }
        }

        errors
    }

    /// Solves `wx * x + wy * y + bias = 0` for `y`.
    ///
    /// # Returns
    /// `None` when `wy` is zero, the boundary is then vertical or undefined.
    pub fn decision_boundary_at(&self, x: f32) -> Option<f32> {
        let Weights { wx, wy, bias } = self.weights;
        (wy != 0.).then(|| -(wx * x + bias) / wy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinearBoundary, Point};

    const EPS: f32 = 1e-6;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn zero_sum_is_positive() {
        let p = Perceptron::new();
        assert_eq!(p.predict(0.3, -0.8), Label::Positive);

        let p = Perceptron::with_weights(Weights::new(1., 1., 0.));
        assert_eq!(p.predict(0.5, -0.5), Label::Positive);
        assert_eq!(p.predict(0.5, -0.6), Label::Negative);
    }

    #[test]
    fn online_update_matches_hand_computation() {
        let line = LinearBoundary::new(0., 0.).unwrap();
        let ds = Dataset::new(vec![
            Point::labeled(0., 1., &line),
            Point::labeled(0., -1., &line),
        ]);

        let mut p = Perceptron::new();
        let errors = p.update_on_round(&ds, 0.1).unwrap();

        assert_eq!(errors, 1);
        let w = p.weights();
        assert_close(w.wx, 0.);
        assert_close(w.wy, 0.2);
        assert_close(w.bias, -0.2);
    }

    #[test]
    fn later_points_see_updated_weights() {
        let ds = Dataset::new(vec![
            Point::new(1., 0., Label::Negative),
            Point::new(1., 0., Label::Negative),
        ]);

        let mut p = Perceptron::new();
        // The first point pushes the sum to -0.4, so the second is already correct.
        assert_eq!(p.update_on_round(&ds, 0.1).unwrap(), 1);
    }

    #[test]
    fn rejects_bad_learning_rate_without_touching_weights() {
        let ds = Dataset::new(vec![Point::new(0., -1., Label::Negative)]);
        let mut p = Perceptron::new();

        for lr in [0., -0.5, f32::NAN, f32::INFINITY] {
            let err = p.update_on_round(&ds, lr).unwrap_err();
            assert!(err.is_invalid_argument());
        }

        assert_eq!(p.weights(), Weights::default());
    }

    #[test]
    fn decision_boundary() {
        let p = Perceptron::with_weights(Weights::new(1., 2., -1.));
        assert_close(p.decision_boundary_at(1.).unwrap(), 0.);
        assert_close(p.decision_boundary_at(-1.).unwrap(), 1.);

        let p = Perceptron::with_weights(Weights::new(1., 0., -1.));
        assert!(p.decision_boundary_at(0.).is_none());
    }

    #[test]
    fn reset_zeroes_weights() {
        let mut p = Perceptron::with_weights(Weights::new(0.3, -0.2, 0.1));
        p.reset();
        assert_eq!(p.weights(), Weights::default());
    }
}
