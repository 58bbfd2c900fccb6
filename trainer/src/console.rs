use std::io;

use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    Result,
    command::Command,
    event::{Frame, TrainingEvent},
    session::Session,
    state::Phase,
};

/// Reads commands from `input` and writes every published frame to `output`
/// as a json line.
///
/// Once `input` is exhausted the session keeps going until it is idle, so a
/// running training finishes on its own while an idle one ends right away.
///
/// # Returns
/// When `quit` is read, when the input is exhausted and training is idle, or
/// when the session is gone.
///
/// # Errors
/// Returns an error if reading the input or writing a frame fails. Rejected
/// commands are only logged.
pub async fn drive<R, W>(session: &mut Session, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let handle = session.handle();
    let mut lines = input.lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            event = session.next_event() => match event {
                Some(event) => {
                    let idle = handle_event(output, &event).await?;
                    if idle && !input_open {
                        break;
                    }
                }
                None => return Ok(()),
            },

            line = lines.next_line(), if input_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match line.parse::<Command>() {
                    Ok(cmd) => match cmd.apply(&handle).await {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => warn!("{e}"),
                    },
                    Err(e) => warn!("{e}"),
                },
                None => {
                    input_open = false;

                    // Queued events predate the snapshot, an idle frame among
                    // them says nothing about the current phase.
                    while let Some(event) = session.try_next_event() {
                        handle_event(output, &event).await?;
                    }

                    if handle.snapshot().await?.phase == Phase::Idle {
                        break;
                    }

                    info!("input closed, running until convergence");
                }
            },
        }
    }

    // Frames published before the loop ended are still worth showing.
    while let Some(event) = session.try_next_event() {
        handle_event(output, &event).await?;
    }

    Ok(())
}

/// Returns whether the event left the session idle.
async fn handle_event<W>(output: &mut W, event: &TrainingEvent) -> Result<bool>
where
    W: AsyncWrite + Unpin,
{
    match event {
        TrainingEvent::Updated(frame) => {
            write_frame(output, frame).await?;
            Ok(frame.phase == Phase::Idle)
        }
        TrainingEvent::Converged { round } => {
            info!("perfect accuracy achieved after {round} round(s), all points classified correctly");
            Ok(true)
        }
    }
}

async fn write_frame<W>(output: &mut W, frame: &Frame) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    info!("{frame}");

    let mut line = serde_json::to_vec(frame).map_err(io::Error::other)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await?;
    Ok(())
}
