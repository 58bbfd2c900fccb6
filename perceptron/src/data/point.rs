use crate::LinearBoundary;

/// The binary class of a point, `+1` above the boundary and `-1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Step activation, the boundary itself counts as positive.
    #[inline]
    pub fn from_activation(sum: f32) -> Self {
        if sum >= 0. {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Self::Positive => 1.,
            Self::Negative => -1.,
        }
    }
}

/// A labeled sample inside the `[-1, 1]` square.
///
/// The label is fixed when the point is created and is never recomputed,
/// even if the boundary that produced it is later replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
    label: Label,
}

impl Point {
    pub fn new(x: f32, y: f32, label: Label) -> Self {
        Self { x, y, label }
    }

    /// Creates a point labeled against `boundary`.
    ///
    /// # Arguments
    /// * `x` - The horizontal coordinate.
    /// * `y` - The vertical coordinate.
    /// * `boundary` - The line used to label the point.
    pub fn labeled(x: f32, y: f32, boundary: &LinearBoundary) -> Self {
        let label = if boundary.is_above(x, y) {
            Label::Positive
        } else {
            Label::Negative
        };

        Self::new(x, y, label)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn label(&self) -> Label {
        self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_inclusive() {
        assert_eq!(Label::from_activation(0.), Label::Positive);
        assert_eq!(Label::from_activation(-0.), Label::Positive);
        assert_eq!(Label::from_activation(-1e-6), Label::Negative);
    }

    #[test]
    fn labels_against_boundary() {
        let line = LinearBoundary::new(0., 0.).unwrap();
        assert_eq!(Point::labeled(0., 1., &line).label(), Label::Positive);
        assert_eq!(Point::labeled(0., -1., &line).label(), Label::Negative);
        assert_eq!(Point::labeled(0.5, 0., &line).label(), Label::Negative);
    }
}
