use std::{env, fs, path::Path, time::Duration};

use log::info;
use perceptron::{LearningRate, LinearBoundary, PerceptronErr};
use serde::Deserialize;

use crate::Result;

/// Environment variable holding the path of the json config file.
pub const CONFIG_ENV: &str = "PLAYGROUND_CONFIG";

/// Settings for a playground run, every field is optional in the json file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    pub num_points: usize,
    pub max_points: usize,
    pub learning_rate: f32,
    pub slope: f32,
    pub intercept: f32,
    pub round_interval_ms: u64,
    pub seed: Option<u64>,
    /// Start training as soon as the session is up.
    pub autostart: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        let boundary = LinearBoundary::default();

        Self {
            num_points: 100,
            max_points: 1000,
            learning_rate: LearningRate::DEFAULT.get(),
            slope: boundary.slope(),
            intercept: boundary.intercept(),
            round_interval_ms: 500,
            seed: None,
            autostart: false,
        }
    }
}

impl PlaygroundConfig {
    /// Reads a config from a json file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads the config named by the first cli argument or by `PLAYGROUND_CONFIG`,
    /// falling back to the defaults when neither is present.
    pub fn locate() -> Result<Self> {
        let path = env::args().nth(1).or_else(|| env::var(CONFIG_ENV).ok());

        let config = match path {
            Some(path) => {
                info!("loading config from {path}");
                Self::load(path)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks every field the same way the training operations would.
    pub fn validate(&self) -> Result<()> {
        if self.max_points == 0 {
            return Err(PerceptronErr::invalid("max_points", "must be positive").into());
        }

        if self.num_points == 0 || self.num_points > self.max_points {
            return Err(PerceptronErr::invalid(
                "num_points",
                format!("expected a value in 1..={}, got {}", self.max_points, self.num_points),
            )
            .into());
        }

        if self.round_interval_ms == 0 {
            return Err(PerceptronErr::invalid("round_interval_ms", "must be positive").into());
        }

        self.boundary()?;
        self.learning_rate()?;
        Ok(())
    }

    pub fn boundary(&self) -> Result<LinearBoundary> {
        Ok(LinearBoundary::new(self.slope, self.intercept)?)
    }

    pub fn learning_rate(&self) -> Result<LearningRate> {
        Ok(LearningRate::new(self.learning_rate)?)
    }

    pub fn round_interval(&self) -> Duration {
        Duration::from_millis(self.round_interval_ms)
    }
}
