use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use trivia_quiz::{
    Clock, Difficulty, ProviderError, Question, QuestionProvider, QuestionSource, QuizConfig,
    QuizError, QuizResults, QuizSession, load_questions,
};

struct TwoQuestionProvider;

#[async_trait]
impl QuestionProvider for TwoQuestionProvider {
    fn name(&self) -> &str {
        "two-questions"
    }

    async fn fetch(&self, _config: &QuizConfig) -> Result<Vec<Question>, ProviderError> {
        let first = Question::new(
            0,
            "What is the capital of Italy?",
            "Rome",
            vec!["Milan".into(), "Naples".into(), "Turin".into()],
            "Geography",
            "easy",
        )
        .map_err(|source| ProviderError::InvalidQuestion { index: 0, source })?;
        let second = Question::new(
            1,
            "How many legs does a spider have?",
            "8",
            vec!["6".into(), "10".into(), "12".into()],
            "Science",
            "easy",
        )
        .map_err(|source| ProviderError::InvalidQuestion { index: 1, source })?;
        Ok(vec![first, second])
    }
}

struct DownProvider;

#[async_trait]
impl QuestionProvider for DownProvider {
    fn name(&self) -> &str {
        "down"
    }

    async fn fetch(&self, _config: &QuizConfig) -> Result<Vec<Question>, ProviderError> {
        Err(ProviderError::ResponseCode {
            code: 5,
            reason: "rate limited",
        })
    }
}

fn start_time() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

#[tokio::test]
async fn answer_first_and_let_second_expire() {
    let config = QuizConfig::new(2, 5, Difficulty::Easy, 9).unwrap();
    let set = load_questions(&TwoQuestionProvider, &config).await;
    assert_eq!(
        set.source,
        QuestionSource::Provider("two-questions".to_string())
    );

    let clock = Clock::fixed(start_time());
    let mut session = QuizSession::start_with_clock(config, set.questions, clock).unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.total_questions(), 2);

    let answer = session.record_answer(Some("Rome")).unwrap();
    assert!(answer.is_correct);
    assert!(matches!(
        session.record_answer(Some("Rome")),
        Err(QuizError::AlreadyAnswered { index: 0 })
    ));
    assert!(!session.advance().unwrap().done);

    let mut ticks = Vec::new();
    for _ in 0..5 {
        ticks.push(session.tick());
    }
    assert!(ticks[..4].iter().all(|tick| !tick.expired));
    assert!(ticks[4].expired);
    assert_eq!(session.current_answer().unwrap().selected_answer, None);

    assert!(session.advance().unwrap().done);
    assert!(!session.tick().expired);

    let results = session
        .results_at(start_time() + Duration::seconds(6))
        .unwrap();
    assert_eq!(
        results,
        QuizResults {
            correct: 1,
            incorrect: 1,
            total: 2,
            percentage: 50,
            elapsed_seconds: 6,
        }
    );
    assert_eq!(results.time_taken(), "0:06");
}

#[tokio::test]
async fn provider_outage_falls_back_to_builtin_set() {
    let config = QuizConfig::new(6, 30, Difficulty::Medium, 9).unwrap();
    let set = load_questions(&DownProvider, &config).await;

    match &set.source {
        QuestionSource::Fallback { reason } => assert!(reason.contains("rate limited")),
        other => panic!("expected fallback, got {:?}", other),
    }
    assert_eq!(set.questions.len(), 6);

    let session = QuizSession::start(config, set.questions).unwrap();
    assert_eq!(session.total_questions(), 6);
}

#[test]
fn results_refused_until_every_question_is_answered() {
    let config = QuizConfig::new(3, 30, Difficulty::Hard, 9).unwrap();
    let mut session = QuizSession::start(config, trivia_quiz::builtin_questions(3)).unwrap();
    session.record_answer(None).unwrap();
    session.advance().unwrap();

    assert!(matches!(
        session.results(),
        Err(QuizError::SessionIncomplete {
            answered: 1,
            total: 3
        })
    ));
}
