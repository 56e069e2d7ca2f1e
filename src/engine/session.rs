//! Quiz session state machine.
//!
//! A [`QuizSession`] is a plain value: the caller drives it with
//! [`QuizSession::record_answer`], [`QuizSession::advance`] and
//! [`QuizSession::tick`], and reads the outcome with
//! [`QuizSession::results`]. The session never schedules timers or performs
//! IO; see [`crate::scheduler::Countdown`] for the tick cadence.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::Clock;
use crate::error::QuizError;
use crate::models::{Answer, Question, QuizConfig};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Answering the question at this index.
    InProgress(usize),
    /// Every question answered and the last one left. Terminal.
    Complete,
}

/// Outcome of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub done: bool,
}

/// Outcome of [`QuizSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub time_left: u32,
    /// The countdown hit zero on this tick and an empty answer was recorded.
    pub expired: bool,
}

/// Aggregate score for a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResults {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub percentage: u32,
    pub elapsed_seconds: u64,
}

impl QuizResults {
    /// Elapsed time as `m:ss`.
    pub fn time_taken(&self) -> String {
        format!(
            "{}:{:02}",
            self.elapsed_seconds / 60,
            self.elapsed_seconds % 60
        )
    }
}

/// One row of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub question_index: usize,
    pub question_text: String,
    pub options: Vec<String>,
    pub selected_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Rounds `correct / total` to a whole percentage, halves rounding up.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct * 200 + total) / (total * 2)) as u32
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    config: QuizConfig,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    answers: Vec<Option<Answer>>,
    started_at: DateTime<Utc>,
    time_left: u32,
    status: SessionStatus,
    clock: Clock,
}

impl QuizSession {
    /// Start a session on the system clock.
    pub fn start(config: QuizConfig, questions: Vec<Question>) -> Result<Self, QuizError> {
        Self::start_with_clock(config, questions, Clock::System)
    }

    /// Start a session, taking timestamps from `clock`.
    ///
    /// Questions beyond `config.question_count()` are dropped.
    pub fn start_with_clock(
        config: QuizConfig,
        mut questions: Vec<Question>,
        clock: Clock,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        questions.truncate(config.question_count() as usize);

        let session = Self {
            id: Uuid::new_v4(),
            config,
            answers: vec![None; questions.len()],
            questions,
            current_index: 0,
            score: 0,
            started_at: clock.now(),
            time_left: config.time_limit_seconds(),
            status: SessionStatus::InProgress(0),
            clock,
        };

        debug!(
            session = %session.id,
            questions = session.questions.len(),
            time_limit = config.time_limit_seconds(),
            "quiz session started"
        );
        Ok(session)
    }

    /// A fresh session over the same configuration and questions.
    pub fn retake(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            config: self.config,
            questions: self.questions.clone(),
            current_index: 0,
            score: 0,
            answers: vec![None; self.questions.len()],
            started_at: self.clock.now(),
            time_left: self.config.time_limit_seconds(),
            status: SessionStatus::InProgress(0),
            clock: self.clock,
        }
    }

    /// Record the answer for the current question.
    ///
    /// `None` means no option was chosen and is never correct.
    pub fn record_answer(&mut self, selected: Option<&str>) -> Result<Answer, QuizError> {
        let index = self.current_index;
        if self.answers[index].is_some() {
            return Err(QuizError::AlreadyAnswered { index });
        }

        let question = &self.questions[index];
        let is_correct = selected == Some(question.correct_answer());
        let answer = Answer {
            question_index: index,
            selected_answer: selected.map(str::to_string),
            correct_answer: question.correct_answer().to_string(),
            is_correct,
        };

        if is_correct {
            self.score += 1;
        }
        self.answers[index] = Some(answer.clone());

        debug!(session = %self.id, index, is_correct, "answer recorded");
        Ok(answer)
    }

    /// Leave the current question.
    ///
    /// Fails while the current question is unanswered. Leaving the last
    /// question completes the session; advancing a completed session is a
    /// no-op that reports `done` again.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.is_complete() {
            return Ok(Advance { done: true });
        }

        let index = self.current_index;
        if self.answers[index].is_none() {
            return Err(QuizError::UnansweredQuestion { index });
        }

        if index + 1 == self.questions.len() {
            self.status = SessionStatus::Complete;
            info!(
                session = %self.id,
                score = self.score,
                total = self.questions.len(),
                "quiz session complete"
            );
            return Ok(Advance { done: true });
        }

        self.current_index += 1;
        self.time_left = self.config.time_limit_seconds();
        self.status = SessionStatus::InProgress(self.current_index);
        Ok(Advance { done: false })
    }

    /// One second of countdown on the current question.
    ///
    /// Safe to call at any time; once the session is complete it changes
    /// nothing.
    pub fn tick(&mut self) -> Tick {
        if self.is_complete() {
            return Tick {
                time_left: self.time_left,
                expired: false,
            };
        }

        self.time_left = self.time_left.saturating_sub(1);

        let expired = self.time_left == 0 && self.answers[self.current_index].is_none();
        if expired {
            debug!(session = %self.id, index = self.current_index, "question expired");
            // The slot is empty, so this cannot fail.
            let _ = self.record_answer(None);
        }

        Tick {
            time_left: self.time_left,
            expired,
        }
    }

    /// Score summary, timed against the session clock.
    pub fn results(&self) -> Result<QuizResults, QuizError> {
        self.results_at(self.clock.now())
    }

    /// Score summary with elapsed time measured up to `now`.
    pub fn results_at(&self, now: DateTime<Utc>) -> Result<QuizResults, QuizError> {
        let total = self.questions.len();
        let answered = self.answered_count();
        if answered < total {
            return Err(QuizError::SessionIncomplete { answered, total });
        }

        let correct = self
            .answers
            .iter()
            .flatten()
            .filter(|answer| answer.is_correct)
            .count();
        let elapsed_seconds = (now - self.started_at).num_seconds().max(0) as u64;

        Ok(QuizResults {
            correct,
            incorrect: total - correct,
            total,
            percentage: percentage(correct, total),
            elapsed_seconds,
        })
    }

    /// Review rows for every answered question, in quiz order.
    pub fn review(&self) -> Vec<ReviewEntry> {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .filter_map(|(answer, question)| {
                let answer = answer.as_ref()?;
                Some(ReviewEntry {
                    question_index: answer.question_index,
                    question_text: question.text().to_string(),
                    options: question.options().to_vec(),
                    selected_answer: answer.selected_answer.clone(),
                    correct_answer: answer.correct_answer.clone(),
                    is_correct: answer.is_correct,
                })
            })
            .collect()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// The answer recorded for the current question, if any.
    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers[self.current_index].as_ref()
    }

    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index).and_then(Option::as_ref)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, SessionStatus::Complete)
    }
}
