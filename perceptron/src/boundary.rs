use std::fmt::{self, Display};

use crate::{PerceptronErr, Result};

/// The ground truth line `y = slope * x + intercept` used to label points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearBoundary {
    slope: f32,
    intercept: f32,
}

impl LinearBoundary {
    /// Creates a new `LinearBoundary`.
    ///
    /// # Arguments
    /// * `slope` - The slope of the line.
    /// * `intercept` - The value of the line at `x = 0`.
    ///
    /// # Returns
    /// An error if either value is not finite.
    pub fn new(slope: f32, intercept: f32) -> Result<Self> {
        if !slope.is_finite() {
            return Err(PerceptronErr::invalid("slope", format!("{slope} is not finite")));
        }

        if !intercept.is_finite() {
            return Err(PerceptronErr::invalid(
                "intercept",
                format!("{intercept} is not finite"),
            ));
        }

        Ok(Self { slope, intercept })
    }

    pub fn slope(&self) -> f32 {
        self.slope
    }

    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    #[inline]
    pub fn value_at(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }

    /// Whether `(x, y)` lies strictly above the line, points on it are not.
    #[inline]
    pub fn is_above(&self, x: f32, y: f32) -> bool {
        y > self.value_at(x)
    }
}

impl Default for LinearBoundary {
    fn default() -> Self {
        Self {
            slope: 0.5,
            intercept: 0.2,
        }
    }
}

impl Display for LinearBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.intercept.is_sign_negative() && self.intercept != 0. {
            '-'
        } else {
            '+'
        };

        write!(f, "y = {}x {sign} {}", self.slope, self.intercept.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_at() {
        let line = LinearBoundary::new(2., -1.).unwrap();
        assert_eq!(line.value_at(0.), -1.);
        assert_eq!(line.value_at(1.), 1.);
    }

    #[test]
    fn on_the_line_is_not_above() {
        let line = LinearBoundary::new(0., 0.).unwrap();
        assert!(line.is_above(0., 0.1));
        assert!(!line.is_above(0., 0.));
        assert!(!line.is_above(0., -0.1));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(LinearBoundary::new(f32::NAN, 0.).unwrap_err().is_invalid_argument());
        assert!(LinearBoundary::new(0., f32::INFINITY).is_err());
    }

    #[test]
    fn equation() {
        assert_eq!(LinearBoundary::default().to_string(), "y = 0.5x + 0.2");
        let line = LinearBoundary::new(-1., -0.3).unwrap();
        assert_eq!(line.to_string(), "y = -1x - 0.3");
    }
}
