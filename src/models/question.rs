use rand::Rng;

use crate::engine::shuffled_options_with;
use crate::error::QuestionError;

const MIN_OPTIONS: usize = 3;
const MAX_OPTIONS: usize = 4;

/// A multiple-choice question with its options already in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: u32,
    text: String,
    correct_answer: String,
    options: Vec<String>,
    category: String,
    difficulty: String,
}

impl Question {
    /// Build a question and shuffle its options once.
    pub fn new(
        id: u32,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        Self::new_with(
            id,
            text,
            correct_answer,
            incorrect_answers,
            category,
            difficulty,
            &mut rand::rng(),
        )
    }

    /// Like [`Question::new`], shuffling with the given RNG.
    pub fn new_with<R: Rng + ?Sized>(
        id: u32,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
        rng: &mut R,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if incorrect_answers.contains(&correct_answer) {
            return Err(QuestionError::DuplicateCorrectAnswer(correct_answer));
        }

        let option_count = incorrect_answers.len() + 1;
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&option_count) {
            return Err(QuestionError::OptionCount(option_count));
        }

        Ok(Self::assemble(
            id,
            text,
            correct_answer,
            incorrect_answers,
            category.into(),
            difficulty.into(),
            rng,
        ))
    }

    /// Builds and shuffles without validation; callers vouch for the input.
    pub(crate) fn assemble<R: Rng + ?Sized>(
        id: u32,
        text: String,
        correct_answer: String,
        incorrect_answers: Vec<String>,
        category: String,
        difficulty: String,
        rng: &mut R,
    ) -> Self {
        let mut options = incorrect_answers;
        options.push(correct_answer.clone());

        let mut question = Self {
            id,
            text,
            correct_answer,
            options,
            category,
            difficulty,
        };
        question.options = shuffled_options_with(&question, rng);
        question
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Copy of this question under a different id, options kept in order.
    pub(crate) fn with_id(&self, id: u32) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

/// The recorded outcome for one question.
///
/// `selected_answer` is `None` when the countdown ran out first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_index: usize,
    pub selected_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_question_contains_correct_answer_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let question = Question::new_with(
            1,
            "Which planet is known as the Red Planet?",
            "Mars",
            strings(&["Venus", "Jupiter", "Saturn"]),
            "Science",
            "easy",
            &mut rng,
        )
        .unwrap();

        assert_eq!(question.options().len(), 4);
        assert_eq!(
            question.options().iter().filter(|o| *o == "Mars").count(),
            1
        );
        assert_eq!(question.correct_answer(), "Mars");
    }

    #[test]
    fn test_three_options_allowed() {
        let question =
            Question::new(0, "Pick one", "a", strings(&["b", "c"]), "Misc", "easy").unwrap();
        assert_eq!(question.options().len(), 3);
    }

    #[test]
    fn test_rejects_bad_option_counts() {
        assert_eq!(
            Question::new(0, "Q", "a", strings(&["b"]), "", "").unwrap_err(),
            QuestionError::OptionCount(2)
        );
        assert_eq!(
            Question::new(0, "Q", "a", strings(&["b", "c", "d", "e"]), "", "").unwrap_err(),
            QuestionError::OptionCount(5)
        );
    }

    #[test]
    fn test_rejects_duplicate_correct_answer() {
        assert_eq!(
            Question::new(0, "Q", "a", strings(&["a", "b", "c"]), "", "").unwrap_err(),
            QuestionError::DuplicateCorrectAnswer("a".to_string())
        );
    }

    #[test]
    fn test_rejects_empty_text() {
        assert_eq!(
            Question::new(0, "  ", "a", strings(&["b", "c"]), "", "").unwrap_err(),
            QuestionError::EmptyText
        );
    }
}
