use std::fmt::{self, Display};

use serde::Serialize;

use crate::{Dataset, Perceptron};

/// Classification quality of a perceptron over a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub correct: usize,
    pub wrong: usize,
    /// Percentage in `[0, 100]`, zero for an empty dataset.
    pub accuracy: f32,
}

/// Counts how many points `perceptron` classifies correctly. Never mutates.
pub fn compute_metrics(dataset: &Dataset, perceptron: &Perceptron) -> Metrics {
    let correct = dataset
        .iter()
        .filter(|p| perceptron.predict(p.x(), p.y()) == p.label())
        .count();

    let accuracy = if dataset.is_empty() {
        0.
    } else {
        100. * correct as f32 / dataset.len() as f32
    };

    Metrics {
        correct,
        wrong: dataset.len() - correct,
        accuracy,
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accuracy {:.1}% ({} correct, {} wrong)",
            self.accuracy, self.correct, self.wrong
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Label, Point, Weights};

    #[test]
    fn empty_dataset() {
        let m = compute_metrics(&Dataset::default(), &Perceptron::new());
        assert_eq!(m, Metrics::default());
        assert_eq!(m.accuracy, 0.);
    }

    #[test]
    fn counts_correct_and_wrong() {
        let ds = Dataset::new(vec![
            Point::new(0., 1., Label::Positive),
            Point::new(0., -1., Label::Negative),
            Point::new(0.5, 0.5, Label::Negative),
            Point::new(-0.5, -0.5, Label::Negative),
        ]);
        let p = Perceptron::with_weights(Weights::new(0., 1., 0.));

        let m = compute_metrics(&ds, &p);
        assert_eq!(m.correct, 3);
        assert_eq!(m.wrong, 1);
        assert_eq!(m.accuracy, 75.);
        assert_eq!(m.to_string(), "accuracy 75.0% (3 correct, 1 wrong)");
    }
}
