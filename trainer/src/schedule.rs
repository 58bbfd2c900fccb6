use std::{future, time::Duration};

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// A repeating round trigger that can be armed and disarmed.
///
/// Missed periods are skipped rather than replayed, so a slow round never
/// produces a burst of catch up rounds.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Schedules the first tick one period from now, does nothing if already armed.
    pub fn arm(&mut self) {
        if self.is_armed() {
            return;
        }

        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    /// Cancels every future tick.
    pub fn disarm(&mut self) {
        self.interval = None;
    }

    /// Waits for the next tick, forever while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending().await,
        }
    }
}
