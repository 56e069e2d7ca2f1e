//! Error types shared across the crate.

use std::io;

use thiserror::Error;

/// Errors returned by the quiz session engine and the front end.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available to start a quiz")]
    EmptyQuestionSet,
    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },
    #[error("question {index} has not been answered yet")]
    UnansweredQuestion { index: usize },
    #[error("quiz is not finished ({answered} of {total} questions answered)")]
    SessionIncomplete { answered: usize, total: usize },
    #[error("question provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failures of a question provider.
///
/// Every variant converts into [`QuizError::ProviderUnavailable`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("trivia API returned response code {code}: {reason}")]
    ResponseCode { code: u8, reason: &'static str },
    #[error("malformed question data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
    #[error("provider returned no questions")]
    Empty,
}

/// Rejections raised while building a [`crate::Question`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("correct answer {0:?} also appears among the incorrect answers")]
    DuplicateCorrectAnswer(String),
    #[error("expected 3 or 4 options, got {0}")]
    OptionCount(usize),
    #[error("question text is empty")]
    EmptyText,
}

/// Invalid quiz configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("question count must be between 1 and {max}, got {got}")]
    QuestionCount { got: u32, max: u32 },
    #[error("time limit must be between 1 and {max} seconds, got {got}")]
    TimeLimit { got: u32, max: u32 },
    #[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
    Difficulty(String),
    #[error("unknown subject {0:?}")]
    Subject(String),
}
