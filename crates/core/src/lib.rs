#![forbid(unsafe_code)]

pub mod countdown;
pub mod model;
pub mod session;
pub mod time;

pub use countdown::{Countdown, CountdownError};
pub use session::{
    QuestionStatus, SessionError, SessionPhase, SessionProgress, SubmissionRequest, SubmitTrigger,
    TestSession, TickOutcome,
};
pub use time::Clock;
