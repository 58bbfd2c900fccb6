use std::time::Duration;

use log::{debug, info, warn};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{
    Result, TrainerErr,
    controller::TrainingController,
    event::{Frame, TrainingEvent},
    schedule::Ticker,
};

const INTENTS_CAPACITY: usize = 32;

/// A request from outside the session task, answered through `reply`.
enum Intent {
    Start {
        lr: Option<f32>,
        reply: oneshot::Sender<Result<bool>>,
    },
    Stop {
        reply: oneshot::Sender<bool>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    Regenerate {
        num_points: Option<usize>,
        reply: oneshot::Sender<Result<()>>,
    },
    SetBoundary {
        slope: f32,
        intercept: f32,
        reply: oneshot::Sender<Result<()>>,
    },
    Snapshot {
        reply: oneshot::Sender<Frame>,
    },
}

/// Represents a training session running in the background.
///
/// A single task owns the `TrainingController` and handles both the timed
/// rounds and the intents sent through `SessionHandle`s, one at a time, so a
/// round never overlaps another round or a user action.
pub struct Session {
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<TrainingEvent>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl Session {
    /// Spawns the session task on the current tokio runtime.
    ///
    /// # Arguments
    /// * `controller` - The training state, moved into the task.
    /// * `period` - The time between two rounds while running.
    ///
    /// # Returns
    /// A new `Session`, whose first event is a frame of the initial state.
    pub fn spawn(controller: TrainingController, period: Duration) -> Self {
        let (intents_tx, intents_rx) = mpsc::channel(INTENTS_CAPACITY);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let driver = Driver {
            controller,
            ticker: Ticker::new(period),
            events: events_tx,
        };

        let task = tokio::spawn(driver.run(intents_rx, shutdown.clone()));

        Self {
            handle: SessionHandle { intents: intents_tx },
            events: events_rx,
            shutdown,
            task,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Waits for the next event, `None` once the session task is gone.
    pub async fn next_event(&mut self) -> Option<TrainingEvent> {
        self.events.recv().await
    }

    /// Returns an event if one is ready, without waiting.
    pub fn try_next_event(&mut self) -> Option<TrainingEvent> {
        self.events.try_recv().ok()
    }

    /// Stops the session task and waits for it to finish.
    pub async fn shutdown(self) -> Result<()> {
        self.shutdown.cancel();
        self.task.await.map_err(|e| {
            warn!("session task failed: {e}");
            TrainerErr::SessionClosed
        })
    }
}

/// A cloneable way to send intents to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    intents: mpsc::Sender<Intent>,
}

impl SessionHandle {
    /// Starts training, with the last used learning rate when `lr` is `None`.
    ///
    /// # Returns
    /// Whether training actually started, `false` if it was already running.
    ///
    /// # Errors
    /// Returns an invalid argument error if `lr` is not positive.
    pub async fn start(&self, lr: Option<f32>) -> Result<bool> {
        self.request(|reply| Intent::Start { lr, reply }).await?
    }

    /// Stops training, returns whether it was running.
    pub async fn stop(&self) -> Result<bool> {
        self.request(|reply| Intent::Stop { reply }).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Intent::Reset { reply }).await
    }

    /// Replaces the dataset, keeping the current size when `num_points` is `None`.
    pub async fn regenerate_data(&self, num_points: Option<usize>) -> Result<()> {
        self.request(|reply| Intent::Regenerate { num_points, reply })
            .await?
    }

    pub async fn set_boundary(&self, slope: f32, intercept: f32) -> Result<()> {
        self.request(|reply| Intent::SetBoundary {
            slope,
            intercept,
            reply,
        })
        .await?
    }

    /// Returns a frame of the current state without changing it.
    pub async fn snapshot(&self) -> Result<Frame> {
        self.request(|reply| Intent::Snapshot { reply }).await
    }

    async fn request<T>(&self, intent: impl FnOnce(oneshot::Sender<T>) -> Intent) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.intents
            .send(intent(tx))
            .await
            .map_err(|_| TrainerErr::SessionClosed)?;

        rx.await.map_err(|_| TrainerErr::SessionClosed)
    }
}

/// The state owned by the session task.
struct Driver {
    controller: TrainingController,
    ticker: Ticker,
    events: mpsc::UnboundedSender<TrainingEvent>,
}

impl Driver {
    async fn run(mut self, mut intents: mpsc::Receiver<Intent>, shutdown: CancellationToken) {
        self.publish_frame();

        loop {
            tokio::select! {
                // Pending intents win over a due tick, so a stop is never
                // followed by one more round.
                biased;

                _ = shutdown.cancelled() => break,

                intent = intents.recv() => match intent {
                    Some(intent) => self.apply(intent),
                    None => break,
                },

                _ = self.ticker.tick() => self.round(),
            }
        }

        debug!("session task finished");
    }

    fn round(&mut self) {
        let Some(report) = self.controller.run_round() else {
            self.ticker.disarm();
            return;
        };

        self.publish_frame();

        if report.converged {
            self.ticker.disarm();
            self.publish(TrainingEvent::Converged {
                round: report.round,
            });
        }
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Start { lr, reply } => {
                let lr = lr.unwrap_or_else(|| self.controller.learning_rate().get());
                let res = self.controller.start(lr);

                match &res {
                    Ok(true) => {
                        self.ticker.arm();
                        self.publish_frame();
                    }
                    Ok(false) => {}
                    Err(e) => info!("request rejected: {e}"),
                }

                let _ = reply.send(res);
            }
            Intent::Stop { reply } => {
                let stopped = self.controller.stop();
                self.ticker.disarm();

                if stopped {
                    self.publish_frame();
                }

                let _ = reply.send(stopped);
            }
            Intent::Reset { reply } => {
                self.controller.reset();
                self.ticker.disarm();
                self.publish_frame();
                let _ = reply.send(());
            }
            Intent::Regenerate { num_points, reply } => {
                let n = num_points.unwrap_or_else(|| self.controller.num_points());
                let res = self.controller.regenerate_data(n);
                self.settle(&res);
                let _ = reply.send(res);
            }
            Intent::SetBoundary {
                slope,
                intercept,
                reply,
            } => {
                let res = self.controller.set_boundary(slope, intercept);
                self.settle(&res);
                let _ = reply.send(res);
            }
            Intent::Snapshot { reply } => {
                let _ = reply.send(self.controller.frame());
            }
        }
    }

    /// After an operation that implies a stop: disarm and publish on success,
    /// leave everything as it was on failure.
    fn settle(&mut self, res: &Result<()>) {
        match res {
            Ok(()) => {
                self.ticker.disarm();
                self.publish_frame();
            }
            Err(e) => info!("request rejected: {e}"),
        }
    }

    fn publish_frame(&self) {
        self.publish(TrainingEvent::Updated(self.controller.frame()));
    }

    fn publish(&self, event: TrainingEvent) {
        if self.events.send(event).is_err() {
            debug!("no one is listening to session events");
        }
    }
}
