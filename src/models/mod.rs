mod config;
mod question;

pub use config::{
    DEFAULT_CATEGORY_ID, DEFAULT_QUESTION_COUNT, DEFAULT_TIME_LIMIT_SECONDS, Difficulty,
    MAX_QUESTION_COUNT, MAX_TIME_LIMIT_SECONDS, QuizConfig, category_for_subject,
};
pub use question::{Answer, Question};

/// Which screen the terminal front end is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    /// Waiting on the question provider.
    Loading,
    Quiz,
    Result,
}
