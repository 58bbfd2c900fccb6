use std::slice;

use super::{Label, Point};

/// An ordered, immutable collection of labeled points.
///
/// Iteration order is the insertion order, so error counts of a training
/// round are reproducible for the same weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Counts the points carrying the given label.
    pub fn count(&self, label: Label) -> usize {
        self.iter().filter(|p| p.label() == label).count()
    }
}

impl FromIterator<Point> for Dataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Point;
    type IntoIter = slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
