use thiserror::Error;

/// Default length of a mock test: one hour.
pub const DEFAULT_DURATION_SECS: u32 = 3_600;

/// Below this many seconds the remaining time is shown as a warning.
pub const LOW_TIME_THRESHOLD_SECS: u32 = 300;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CountdownError {
    #[error("test duration must be > 0 seconds")]
    ZeroDuration,
}

/// Remaining test time in whole seconds.
///
/// Only ever decreases, one second per tick, and saturates at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    initial: u32,
    remaining: u32,
}

impl Countdown {
    /// # Errors
    ///
    /// Returns `CountdownError::ZeroDuration` for a zero-length test.
    pub fn new(duration_secs: u32) -> Result<Self, CountdownError> {
        if duration_secs == 0 {
            return Err(CountdownError::ZeroDuration);
        }
        Ok(Self {
            initial: duration_secs,
            remaining: duration_secs,
        })
    }

    #[must_use]
    pub fn initial(&self) -> u32 {
        self.initial
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.initial - self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < LOW_TIME_THRESHOLD_SECS
    }

    /// Take one second off and return what is left.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// `m:ss`, minutes unbounded (`60:00` for a full hour).
    #[must_use]
    pub fn format(&self) -> String {
        format_mmss(self.remaining)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            initial: DEFAULT_DURATION_SECS,
            remaining: DEFAULT_DURATION_SECS,
        }
    }
}

#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}
