use std::{error::Error, fmt, io};

use perceptron::PerceptronErr;

/// The trainer module's result type.
pub type Result<T> = std::result::Result<T, TrainerErr>;

/// Runtime failures, none of them leave the training state half updated.
#[derive(Debug)]
pub enum TrainerErr {
    /// Rejected by the learning core, usually an invalid argument.
    Core(PerceptronErr),
    /// The session task is no longer running.
    SessionClosed,
    /// A control line that doesn't name a known command.
    UnknownCommand(String),
    /// The configuration file is not valid json for a `PlaygroundConfig`.
    Config(serde_json::Error),
    Io(io::Error),
}

impl TrainerErr {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_invalid_argument())
    }
}

impl fmt::Display for TrainerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainerErr::Core(e) => write!(f, "{e}"),
            TrainerErr::SessionClosed => write!(f, "the training session is closed"),
            TrainerErr::UnknownCommand(line) => write!(f, "unknown command: {line}"),
            TrainerErr::Config(e) => write!(f, "invalid config: {e}"),
            TrainerErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for TrainerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrainerErr::Core(e) => Some(e),
            TrainerErr::Config(e) => Some(e),
            TrainerErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PerceptronErr> for TrainerErr {
    fn from(value: PerceptronErr) -> Self {
        Self::Core(value)
    }
}

impl From<serde_json::Error> for TrainerErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}

impl From<io::Error> for TrainerErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
