use std::str::FromStr;

use log::info;

use crate::{Result, TrainerErr, session::SessionHandle};

/// A textual control command, one per input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Start { lr: Option<f32> },
    Stop,
    Reset,
    Regenerate { num_points: Option<usize> },
    Boundary { slope: f32, intercept: f32 },
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = TrainerErr;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let unknown = || TrainerErr::UnknownCommand(line.trim().to_string());

        let cmd = match words.next().ok_or_else(unknown)? {
            "start" => Command::Start {
                lr: words.next().map(parse).transpose()?,
            },
            "stop" => Command::Stop,
            "reset" => Command::Reset,
            "regen" | "regenerate" => Command::Regenerate {
                num_points: words.next().map(parse).transpose()?,
            },
            "boundary" => Command::Boundary {
                slope: words.next().map(parse).transpose()?.ok_or_else(unknown)?,
                intercept: words.next().map(parse).transpose()?.ok_or_else(unknown)?,
            },
            "status" => Command::Status,
            "quit" | "exit" => Command::Quit,
            _ => return Err(unknown()),
        };

        match words.next() {
            Some(_) => Err(unknown()),
            None => Ok(cmd),
        }
    }
}

fn parse<T: FromStr>(word: &str) -> Result<T> {
    word.parse()
        .map_err(|_| TrainerErr::UnknownCommand(format!("cannot parse '{word}'")))
}

impl Command {
    /// Forwards the command to the session.
    ///
    /// # Returns
    /// `false` once the caller should stop reading commands.
    pub async fn apply(self, session: &SessionHandle) -> Result<bool> {
        match self {
            Command::Start { lr } => {
                if !session.start(lr).await? {
                    info!("already training");
                }
            }
            Command::Stop => {
                session.stop().await?;
            }
            Command::Reset => session.reset().await?,
            Command::Regenerate { num_points } => session.regenerate_data(num_points).await?,
            Command::Boundary { slope, intercept } => {
                session.set_boundary(slope, intercept).await?
            }
            Command::Status => {
                let frame = session.snapshot().await?;
                info!("{} | target {}", frame, frame.equation);
            }
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }
}
