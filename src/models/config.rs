use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest batch the Open Trivia DB serves per request.
pub const MAX_QUESTION_COUNT: u32 = 50;
pub const MAX_TIME_LIMIT_SECONDS: u32 = 3600;

pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 30;
/// Open Trivia DB "General Knowledge".
pub const DEFAULT_CATEGORY_ID: u32 = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::Difficulty(s.to_string())),
        }
    }
}

/// Settings fixed before a session starts.
///
/// Values are validated on construction, so a `QuizConfig` in hand always
/// has a positive question count and time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizConfig {
    question_count: u32,
    time_limit_seconds: u32,
    difficulty: Difficulty,
    category_id: u32,
}

impl QuizConfig {
    pub fn new(
        question_count: u32,
        time_limit_seconds: u32,
        difficulty: Difficulty,
        category_id: u32,
    ) -> Result<Self, ConfigError> {
        if question_count == 0 || question_count > MAX_QUESTION_COUNT {
            return Err(ConfigError::QuestionCount {
                got: question_count,
                max: MAX_QUESTION_COUNT,
            });
        }
        if time_limit_seconds == 0 || time_limit_seconds > MAX_TIME_LIMIT_SECONDS {
            return Err(ConfigError::TimeLimit {
                got: time_limit_seconds,
                max: MAX_TIME_LIMIT_SECONDS,
            });
        }

        Ok(Self {
            question_count,
            time_limit_seconds,
            difficulty,
            category_id,
        })
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn category_id(&self) -> u32 {
        self.category_id
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            difficulty: Difficulty::default(),
            category_id: DEFAULT_CATEGORY_ID,
        }
    }
}

/// Maps a school subject name onto an Open Trivia DB category id.
pub fn category_for_subject(subject: &str) -> Result<u32, ConfigError> {
    let id = match subject.trim().to_ascii_lowercase().as_str() {
        "maths" | "mathematics" | "statistics" => 19,
        "science" | "physics" | "chemistry" => 17,
        "english" | "general-knowledge" => 9,
        "social" | "history" | "economics" | "civics" | "politics" | "strategy" => 23,
        "geography" => 22,
        "programming" | "data-structures" => 18,
        _ => return Err(ConfigError::Subject(subject.to_string())),
    };
    Ok(id)
}
