use log::{debug, info};
use perceptron::{
    DataGenerator, Dataset, LearningRate, LinearBoundary, Metrics, Perceptron, Weights,
    compute_metrics, plot,
};

use crate::{
    Result,
    config::PlaygroundConfig,
    event::{Frame, RoundReport},
    state::{Phase, TrainingState},
};

/// Owns the whole training state and applies every transition to it.
///
/// All operations validate their input before touching anything, so a
/// rejected call leaves the controller exactly as it was.
pub struct TrainingController {
    boundary: LinearBoundary,
    generator: DataGenerator,
    dataset: Dataset,
    perceptron: Perceptron,
    state: TrainingState,
    learning_rate: LearningRate,
    num_points: usize,
}

impl TrainingController {
    /// Creates a new `TrainingController` with freshly generated data.
    ///
    /// # Arguments
    /// * `boundary` - The initial target line.
    /// * `generator` - The source of every dataset.
    /// * `num_points` - The size of the initial dataset.
    ///
    /// # Errors
    /// Returns an invalid argument error if `num_points` is out of bounds.
    pub fn new(
        boundary: LinearBoundary,
        mut generator: DataGenerator,
        num_points: usize,
    ) -> Result<Self> {
        let dataset = generator.generate(num_points, &boundary)?;
        Ok(Self::with_dataset(boundary, generator, dataset))
    }

    /// Creates a new `TrainingController` around an existing dataset.
    pub fn with_dataset(
        boundary: LinearBoundary,
        generator: DataGenerator,
        dataset: Dataset,
    ) -> Self {
        Self {
            boundary,
            generator,
            num_points: dataset.len(),
            dataset,
            perceptron: Perceptron::new(),
            state: TrainingState::default(),
            learning_rate: LearningRate::DEFAULT,
        }
    }

    pub fn from_config(config: &PlaygroundConfig) -> Result<Self> {
        config.validate()?;

        let generator = DataGenerator::new(config.max_points, config.seed)?;
        let mut controller = Self::new(config.boundary()?, generator, config.num_points)?;
        controller.learning_rate = config.learning_rate()?;
        Ok(controller)
    }

    /// Starts training, does nothing if it's already running.
    ///
    /// # Returns
    /// Whether the controller moved from idle to running.
    pub fn start(&mut self, lr: f32) -> Result<bool> {
        if self.state.is_running() {
            debug!("start ignored, already running");
            return Ok(false);
        }

        self.learning_rate = LearningRate::new(lr)?;
        self.state.transition(Phase::Running);
        info!(round = self.state.round(); "training started with learning rate {lr}");
        Ok(true)
    }

    /// Runs a single round, a round that arrives while idle is discarded.
    ///
    /// # Returns
    /// The round's report, or `None` if the controller is idle.
    pub fn run_round(&mut self) -> Option<RoundReport> {
        if !self.state.is_running() {
            debug!("round discarded, training is idle");
            return None;
        }

        let errors = self.perceptron.train_round(&self.dataset, self.learning_rate);
        let round = self.state.inc_round();
        let converged = errors == 0;

        debug!(round = round, errors = errors; "round completed");

        if converged {
            self.state.transition(Phase::Idle);
            info!(round = round; "perfect accuracy, every point is classified correctly");
        }

        Some(RoundReport {
            round,
            errors,
            converged,
        })
    }

    /// Stops training, keeping the weights and the round count.
    ///
    /// # Returns
    /// Whether the controller was running.
    pub fn stop(&mut self) -> bool {
        let stopped = self.state.transition(Phase::Idle);
        if stopped {
            info!(round = self.state.round(); "training stopped");
        }

        stopped
    }

    /// Stops training and zeroes the weights and the round count.
    pub fn reset(&mut self) {
        self.stop();
        self.perceptron.reset();
        self.state.rewind();
        info!("perceptron reset");
    }

    /// Stops training and replaces the dataset, the weights are kept.
    ///
    /// # Errors
    /// Returns an invalid argument error if `num_points` is out of bounds.
    pub fn regenerate_data(&mut self, num_points: usize) -> Result<()> {
        let dataset = self.generator.generate(num_points, &self.boundary)?;

        self.stop();
        self.state.rewind();
        self.dataset = dataset;
        self.num_points = num_points;
        info!(points = num_points; "dataset regenerated");
        Ok(())
    }

    /// Stops training, replaces the target line and regenerates the data
    /// against it, the weights are kept.
    ///
    /// # Errors
    /// Returns an invalid argument error if the line is not finite.
    pub fn set_boundary(&mut self, slope: f32, intercept: f32) -> Result<()> {
        let boundary = LinearBoundary::new(slope, intercept)?;
        let dataset = self.generator.generate(self.num_points, &boundary)?;

        self.stop();
        self.state.rewind();
        self.boundary = boundary;
        self.dataset = dataset;
        info!("target line changed to {boundary}");
        Ok(())
    }

    pub fn metrics(&self) -> Metrics {
        compute_metrics(&self.dataset, &self.perceptron)
    }

    /// Builds the display snapshot of the current state.
    pub fn frame(&self) -> Frame {
        let (positive, negative) = plot::partition(&self.dataset);

        Frame {
            phase: self.state.phase(),
            round: self.state.round(),
            weights: self.perceptron.weights(),
            metrics: self.metrics(),
            equation: self.boundary.to_string(),
            positive,
            negative,
            target_line: plot::target_line(&self.boundary),
            decision_boundary: plot::decision_boundary(&self.perceptron),
        }
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    pub fn weights(&self) -> Weights {
        self.perceptron.weights()
    }

    pub fn boundary(&self) -> LinearBoundary {
        self.boundary
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn learning_rate(&self) -> LearningRate {
        self.learning_rate
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perceptron::Point;

    /// Two points that take exactly two rounds to separate at `lr = 0.1`.
    fn two_points() -> TrainingController {
        let line = LinearBoundary::new(0., 0.).unwrap();
        let dataset = Dataset::new(vec![
            Point::labeled(0., 1., &line),
            Point::labeled(0., -1., &line),
        ]);
        let generator = DataGenerator::new(100, Some(1)).unwrap();
        TrainingController::with_dataset(line, generator, dataset)
    }

    #[test]
    fn start_twice_is_a_noop() {
        let mut ctl = two_points();
        assert!(ctl.start(0.1).unwrap());
        assert!(!ctl.start(0.1).unwrap());
        assert!(ctl.state().is_running());
    }

    #[test]
    fn start_while_running_ignores_the_new_rate() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();
        assert!(!ctl.start(-3.).unwrap());
        assert_eq!(ctl.learning_rate().get(), 0.1);
    }

    #[test]
    fn invalid_start_stays_idle() {
        let mut ctl = two_points();
        assert!(ctl.start(0.).unwrap_err().is_invalid_argument());
        assert_eq!(ctl.state().phase(), Phase::Idle);
    }

    #[test]
    fn rounds_until_convergence() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();

        let first = ctl.run_round().unwrap();
        assert_eq!(first, RoundReport { round: 1, errors: 1, converged: false });
        assert!(ctl.state().is_running());

        let second = ctl.run_round().unwrap();
        assert_eq!(second, RoundReport { round: 2, errors: 0, converged: true });
        assert_eq!(ctl.state().phase(), Phase::Idle);
        assert_eq!(ctl.metrics().accuracy, 100.);

        assert!(ctl.run_round().is_none());
        assert_eq!(ctl.state().round(), 2);
    }

    #[test]
    fn stop_keeps_weights_and_round() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();
        ctl.run_round();

        assert!(ctl.stop());
        assert!(!ctl.stop());
        assert_eq!(ctl.state().round(), 1);
        assert!((ctl.weights().wy - 0.2).abs() < 1e-6);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();
        ctl.run_round();

        ctl.reset();
        assert_eq!(ctl.state(), TrainingState::default());
        assert_eq!(ctl.weights(), Weights::default());
    }

    #[test]
    fn regenerate_while_running_keeps_weights() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();
        ctl.run_round();
        let weights = ctl.weights();

        ctl.regenerate_data(50).unwrap();
        assert_eq!(ctl.state().phase(), Phase::Idle);
        assert_eq!(ctl.state().round(), 0);
        assert_eq!(ctl.weights(), weights);
        assert_eq!(ctl.dataset().len(), 50);
    }

    #[test]
    fn rejected_regeneration_changes_nothing() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();
        ctl.run_round();
        let dataset = ctl.dataset().clone();

        for n in [0, 101] {
            assert!(ctl.regenerate_data(n).unwrap_err().is_invalid_argument());
        }

        assert!(ctl.state().is_running());
        assert_eq!(ctl.state().round(), 1);
        assert_eq!(ctl.dataset(), &dataset);
    }

    #[test]
    fn new_boundary_relabels_fresh_data() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();
        ctl.run_round();
        let weights = ctl.weights();

        ctl.set_boundary(-2., 0.5).unwrap();
        assert_eq!(ctl.state(), TrainingState::default());
        assert_eq!(ctl.weights(), weights);
        assert_eq!(ctl.dataset().len(), 2);

        let line = ctl.boundary();
        for p in ctl.dataset() {
            assert_eq!(p.label(), Point::labeled(p.x(), p.y(), &line).label());
        }
    }

    #[test]
    fn rejected_boundary_keeps_running() {
        let mut ctl = two_points();
        ctl.start(0.1).unwrap();

        assert!(ctl.set_boundary(f32::INFINITY, 0.).unwrap_err().is_invalid_argument());
        assert!(ctl.state().is_running());
        assert_eq!(ctl.boundary(), LinearBoundary::new(0., 0.).unwrap());
    }

    #[test]
    fn frame_reflects_state() {
        let mut ctl = two_points();
        let frame = ctl.frame();
        assert_eq!(frame.positive.len(), 1);
        assert_eq!(frame.negative.len(), 1);
        assert!(frame.decision_boundary.is_none());
        assert_eq!(frame.metrics.correct, 1);

        ctl.start(0.1).unwrap();
        ctl.run_round();
        let frame = ctl.frame();
        assert_eq!(frame.round, 1);
        assert_eq!(frame.phase, Phase::Running);
        assert!(frame.decision_boundary.is_some());
        assert_eq!(frame.equation, "y = 0x + 0");
    }

    #[test]
    fn frame_json_omits_a_missing_decision_boundary() {
        let mut ctl = two_points();
        let json = serde_json::to_value(ctl.frame()).unwrap();
        assert!(json.get("decision_boundary").is_none());
        assert_eq!(json["phase"], "idle");

        ctl.start(0.1).unwrap();
        ctl.run_round();
        let json = serde_json::to_value(ctl.frame()).unwrap();
        let line = json["decision_boundary"].as_array().unwrap();
        assert_eq!(line.len(), plot::SAMPLES);
    }

    #[test]
    fn from_config_uses_the_configured_rate() {
        let config = PlaygroundConfig {
            num_points: 30,
            learning_rate: 0.25,
            seed: Some(5),
            ..Default::default()
        };

        let ctl = TrainingController::from_config(&config).unwrap();
        assert_eq!(ctl.dataset().len(), 30);
        assert_eq!(ctl.learning_rate().get(), 0.25);
        assert_eq!(ctl.state(), TrainingState::default());
    }
}
