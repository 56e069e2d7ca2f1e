use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{Question, QuizConfig};

use super::QuestionProvider;

/// (question, correct answer, incorrect answers, category, difficulty)
type BuiltinEntry = (&'static str, &'static str, [&'static str; 3], &'static str, &'static str);

const BUILTIN: [BuiltinEntry; 5] = [
    (
        "What is the capital of France?",
        "Paris",
        ["London", "Berlin", "Madrid"],
        "Geography",
        "easy",
    ),
    (
        "Which planet is known as the Red Planet?",
        "Mars",
        ["Venus", "Jupiter", "Saturn"],
        "Science",
        "easy",
    ),
    ("What is 2 + 2?", "4", ["3", "5", "6"], "Mathematics", "easy"),
    (
        "Who painted the Mona Lisa?",
        "Leonardo da Vinci",
        ["Vincent van Gogh", "Pablo Picasso", "Michelangelo"],
        "Art",
        "medium",
    ),
    (
        "What is the largest mammal in the world?",
        "Blue whale",
        ["African elephant", "Giraffe", "Hippopotamus"],
        "Science",
        "medium",
    ),
];

/// The built-in question set sized to `count`.
///
/// Shorter requests take a prefix; longer ones cycle through the set again
/// with fresh sequential ids.
pub fn builtin_questions(count: usize) -> Vec<Question> {
    let mut rng = rand::rng();
    let base: Vec<Question> = BUILTIN
        .iter()
        .enumerate()
        .map(|(id, (text, correct, incorrect, category, difficulty))| {
            Question::assemble(
                id as u32,
                text.to_string(),
                correct.to_string(),
                incorrect.iter().map(|s| s.to_string()).collect(),
                category.to_string(),
                difficulty.to_string(),
                &mut rng,
            )
        })
        .collect();

    (0..count)
        .map(|i| base[i % base.len()].with_id(i as u32))
        .collect()
}

/// Serves the built-in questions. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProvider;

#[async_trait]
impl QuestionProvider for FallbackProvider {
    fn name(&self) -> &str {
        "built-in"
    }

    async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>, ProviderError> {
        Ok(builtin_questions(config.question_count() as usize))
    }
}
