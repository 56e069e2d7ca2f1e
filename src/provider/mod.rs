//! Question providers and the fallback to the built-in set.

mod entities;
mod fallback;
mod file;
mod opentdb;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ProviderError;
use crate::models::{Question, QuizConfig};

pub use entities::decode_html_entities;
pub use fallback::{FallbackProvider, builtin_questions};
pub use file::{FileProvider, load_questions_from_json};
pub use opentdb::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, OpenTdbProvider, parse_response};

/// A source of quiz questions.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Short label used in logs and on the welcome screen.
    fn name(&self) -> &str;

    /// Fetch up to `config.question_count()` questions.
    async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>, ProviderError>;
}

/// Where a loaded question set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    Provider(String),
    /// The provider failed; `reason` is its error message.
    Fallback { reason: String },
}

/// Questions ready to start a session with.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
    pub source: QuestionSource,
}

/// Fetch questions, switching to the built-in set if the provider fails.
///
/// This never fails: a provider error or an empty result is logged and
/// replaced by [`builtin_questions`] sized to the configured count.
pub async fn load_questions(provider: &dyn QuestionProvider, config: &QuizConfig) -> QuestionSet {
    let result = match provider.fetch(config).await {
        Ok(questions) if questions.is_empty() => Err(ProviderError::Empty),
        other => other,
    };

    match result {
        Ok(questions) => {
            info!(
                provider = provider.name(),
                count = questions.len(),
                "loaded questions"
            );
            QuestionSet {
                questions,
                source: QuestionSource::Provider(provider.name().to_string()),
            }
        }
        Err(err) => {
            warn!(
                provider = provider.name(),
                error = %err,
                "question provider failed, using built-in questions"
            );
            QuestionSet {
                questions: builtin_questions(config.question_count() as usize),
                source: QuestionSource::Fallback {
                    reason: err.to_string(),
                },
            }
        }
    }
}

/// A question record as the trivia API and question files spell it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    difficulty: String,
}

impl RawQuestion {
    pub(crate) fn decode_entities(self) -> Self {
        Self {
            question: decode_html_entities(&self.question),
            correct_answer: decode_html_entities(&self.correct_answer),
            incorrect_answers: self
                .incorrect_answers
                .iter()
                .map(|answer| decode_html_entities(answer))
                .collect(),
            category: decode_html_entities(&self.category),
            difficulty: self.difficulty,
        }
    }

    pub(crate) fn into_question(self, index: usize) -> Result<Question, ProviderError> {
        Question::new(
            index as u32,
            self.question,
            self.correct_answer,
            self.incorrect_answers,
            self.category,
            self.difficulty,
        )
        .map_err(|source| ProviderError::InvalidQuestion { index, source })
    }
}
