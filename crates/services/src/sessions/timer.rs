//! One-second heartbeat driving the session countdown.

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns tick tasks for active sessions.
#[derive(Debug, Clone, Copy)]
pub struct SessionTimer {
    period: Duration,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self {
            period: TICK_PERIOD,
        }
    }
}

impl SessionTimer {
    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }

    /// Start ticking. Must be called inside a tokio runtime.
    ///
    /// At most one tick is ever pending: if the consumer has not picked up the
    /// previous one, the new tick is dropped.
    #[must_use]
    pub fn start(&self) -> TimerHandle {
        let (tx, ticks) = mpsc::channel(1);
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut heartbeat = interval(period);
            heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            heartbeat.tick().await;
            loop {
                heartbeat.tick().await;
                match tx.try_send(()) {
                    Ok(()) | Err(TrySendError::Full(())) => {}
                    Err(TrySendError::Closed(())) => break,
                }
            }
        });
        TimerHandle { task, ticks }
    }
}

/// Owner of a running timer. Dropping it stops the ticks.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
    ticks: mpsc::Receiver<()>,
}

impl TimerHandle {
    /// Wait for the next tick. `None` once the timer is cancelled.
    pub async fn next_tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    /// Consume a pending tick without waiting.
    pub fn try_tick(&mut self) -> bool {
        self.ticks.try_recv().is_ok()
    }

    pub fn cancel(&mut self) {
        if !self.task.is_finished() {
            debug!("session timer cancelled");
        }
        self.task.abort();
        self.ticks.close();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
