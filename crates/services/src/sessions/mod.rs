mod timer;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use timer::{SessionTimer, TICK_PERIOD, TimerHandle};
pub use workflow::{SubmissionReceipt, TestSessionService};
