use std::fmt;

use perceptron::{Metrics, Weights, plot::Polyline};
use serde::Serialize;

use crate::state::Phase;

/// Outcome of one completed training round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u64,
    pub errors: usize,
    /// Every point was classified correctly, training stopped.
    pub converged: bool,
}

/// Everything an external display needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub phase: Phase,
    pub round: u64,
    pub weights: Weights,
    pub metrics: Metrics,
    /// The target line's equation, e.g. `y = 0.5x + 0.2`.
    pub equation: String,
    pub positive: Polyline,
    pub negative: Polyline,
    pub target_line: Polyline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_boundary: Option<Polyline>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Weights { wx, wy, bias } = self.weights;
        write!(
            f,
            "round {} [{:?}] wx={wx:.3} wy={wy:.3} bias={bias:.3} {}",
            self.round, self.phase, self.metrics
        )
    }
}

/// Events published by a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingEvent {
    /// The state changed, sent after every state affecting operation.
    Updated(Frame),
    /// A round finished without errors, training stopped on its own.
    Converged { round: u64 },
}
