mod dataset;
mod generator;
mod point;

pub use dataset::Dataset;
pub use generator::DataGenerator;
pub use point::{Label, Point};
