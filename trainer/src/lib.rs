//! Runtime of the perceptron playground: the training state machine, its
//! round timer and the session that serializes every change to it.

pub mod command;
pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod event;
pub mod schedule;
pub mod session;
pub mod state;

pub use command::Command;
pub use config::PlaygroundConfig;
pub use controller::TrainingController;
pub use error::{Result, TrainerErr};
pub use event::{Frame, RoundReport, TrainingEvent};
pub use session::{Session, SessionHandle};
pub use state::{Phase, TrainingState};
