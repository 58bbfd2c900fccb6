use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Uniform};

use super::{Dataset, Point};
use crate::{LinearBoundary, PerceptronErr, Result};

/// Samples labeled points uniformly from the `[-1, 1]` square.
pub struct DataGenerator<R: Rng = StdRng> {
    rng: R,
    coords: Uniform<f32>,
    max_points: usize,
}

impl DataGenerator<StdRng> {
    /// Creates a new `DataGenerator` backed by a `StdRng`.
    ///
    /// # Arguments
    /// * `max_points` - The largest dataset this generator will produce.
    /// * `seed` - A fixed seed for reproducible runs, os entropy otherwise.
    pub fn new(max_points: usize, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::with_rng(rng, max_points)
    }
}

impl<R: Rng> DataGenerator<R> {
    /// Creates a new `DataGenerator` from any random number generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `max_points` - The largest dataset this generator will produce.
    pub fn with_rng(rng: R, max_points: usize) -> Result<Self> {
        Ok(Self {
            rng,
            coords: Uniform::new_inclusive(-1., 1.)?,
            max_points,
        })
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Checks a point count against this generator's bounds.
    pub fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(PerceptronErr::invalid("point count", "must be positive"));
        }

        if n > self.max_points {
            return Err(PerceptronErr::invalid(
                "point count",
                format!("{n} exceeds the maximum of {}", self.max_points),
            ));
        }

        Ok(())
    }

    /// Generates `n` points labeled against `boundary`.
    ///
    /// # Arguments
    /// * `n` - The amount of points, in `1..=max_points`.
    /// * `boundary` - The line used to label every point.
    ///
    /// # Returns
    /// A fresh dataset, or an error if `n` is out of bounds.
    pub fn generate(&mut self, n: usize, boundary: &LinearBoundary) -> Result<Dataset> {
        self.validate(n)?;

        let dataset: Dataset = (0..n)
            .map(|_| {
                let x = self.coords.sample(&mut self.rng);
                let y = self.coords.sample(&mut self.rng);
                Point::labeled(x, y, boundary)
            })
            .collect();

        debug!(points = n; "generated dataset against {boundary}");
        Ok(dataset)
    }
}
