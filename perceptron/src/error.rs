use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire perceptron crate.
pub type Result<T> = std::result::Result<T, PerceptronErr>;

/// The perceptron crate's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum PerceptronErr {
    /// A caller supplied value was rejected before any state was touched.
    InvalidArgument { what: &'static str, reason: String },
    /// The coordinate distribution could not be built.
    Sampling(String),
}

impl PerceptronErr {
    /// Creates a new `InvalidArgument` error.
    ///
    /// # Arguments
    /// * `what` - The name of the rejected argument.
    /// * `reason` - A human readable explanation.
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<UniformError> for PerceptronErr {
    fn from(value: UniformError) -> Self {
        Self::Sampling(value.to_string())
    }
}

impl Display for PerceptronErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerceptronErr::InvalidArgument { what, reason } => {
                write!(f, "invalid {what}: {reason}")
            }
            PerceptronErr::Sampling(msg) => write!(f, "sampling error: {msg}"),
        }
    }
}

impl Error for PerceptronErr {}
