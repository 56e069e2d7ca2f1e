use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{Question, QuizConfig};

use super::{QuestionProvider, RawQuestion};

/// Load questions from a JSON array in Open Trivia DB field naming.
///
/// ```json
/// [{"question": "...", "correct_answer": "...", "incorrect_answers": ["...", "..."]}]
/// ```
///
/// `category` and `difficulty` are optional.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, ProviderError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| ProviderError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let raw: Vec<RawQuestion> = serde_json::from_str(&json_content)?;
    if raw.is_empty() {
        return Err(ProviderError::Empty);
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, question)| question.into_question(index))
        .collect()
}

/// Serves questions from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    name: String,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file {}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl QuestionProvider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>, ProviderError> {
        let mut questions = load_questions_from_json(&self.path)?;
        questions.truncate(config.question_count() as usize);
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::process;

    use super::*;
    use crate::models::Difficulty;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("trivia-quiz-{}-{}.json", process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    const THREE_QUESTIONS: &str = r#"[
        {"question": "One?", "correct_answer": "1", "incorrect_answers": ["2", "3", "4"]},
        {"question": "Two?", "correct_answer": "2", "incorrect_answers": ["1", "3"], "category": "Maths"},
        {"question": "Three?", "correct_answer": "3", "incorrect_answers": ["1", "2", "4"], "difficulty": "hard"}
    ]"#;

    #[test]
    fn test_load_questions_from_json() {
        let path = write_temp("load", THREE_QUESTIONS);
        let questions = load_questions_from_json(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[1].category(), "Maths");
        assert_eq!(questions[1].options().len(), 3);
        assert_eq!(questions[2].difficulty(), "hard");
    }

    #[test]
    fn test_missing_file() {
        let err = load_questions_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ProviderError::Io { .. }));
    }

    #[test]
    fn test_empty_and_malformed_files() {
        let empty = write_temp("empty", "[]");
        assert!(matches!(
            load_questions_from_json(&empty),
            Err(ProviderError::Empty)
        ));
        fs::remove_file(&empty).ok();

        let malformed = write_temp("malformed", r#"[{"question": "No answers"}]"#);
        assert!(matches!(
            load_questions_from_json(&malformed),
            Err(ProviderError::Malformed(_))
        ));
        fs::remove_file(&malformed).ok();
    }

    #[tokio::test]
    async fn test_file_provider_truncates_to_count() {
        let path = write_temp("provider", THREE_QUESTIONS);
        let provider = FileProvider::new(&path);
        let config = QuizConfig::new(2, 10, Difficulty::Easy, 9).unwrap();

        let questions = provider.fetch(&config).await.unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(questions.len(), 2);
        assert!(provider.name().starts_with("file "));
    }
}
