//! Learning core of the perceptron playground: a ground truth line, labeled
//! synthetic data, the perceptron itself and the metrics derived from it.

pub mod boundary;
pub mod data;
pub mod error;
pub mod metrics;
pub mod model;
pub mod plot;

pub use boundary::LinearBoundary;
pub use data::{DataGenerator, Dataset, Label, Point};
pub use error::{PerceptronErr, Result};
pub use metrics::{Metrics, compute_metrics};
pub use model::{LearningRate, Perceptron, Weights};
