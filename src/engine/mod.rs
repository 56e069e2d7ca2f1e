//! Quiz session engine: state machine, scoring and option shuffling.

mod clock;
mod session;
mod shuffle;

pub use clock::Clock;
pub use session::{Advance, QuizResults, QuizSession, ReviewEntry, SessionStatus, Tick, percentage};
pub use shuffle::{shuffled_options, shuffled_options_with};
