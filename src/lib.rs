//! # trivia-quiz
//!
//! A timed multiple-choice trivia quiz: a session engine, pluggable question
//! providers with a built-in fallback set, and a terminal front end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::{OpenTdbProvider, Quiz, QuizConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let provider = OpenTdbProvider::new()?;
//!
//!     // Run the quiz in the terminal
//!     Quiz::new(QuizConfig::default(), Box::new(provider)).run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The engine can also be driven directly:
//!
//! ```rust
//! use trivia_quiz::{QuizConfig, QuizSession, builtin_questions};
//!
//! let config = QuizConfig::default();
//! let mut session = QuizSession::start(config, builtin_questions(2)).unwrap();
//!
//! let correct = session.current_question().correct_answer().to_string();
//! session.record_answer(Some(&correct)).unwrap();
//! session.advance().unwrap();
//!
//! while !session.tick().expired {}
//! assert!(session.advance().unwrap().done);
//! assert_eq!(session.results().unwrap().percentage, 50);
//! ```

mod app;
pub mod engine;
mod error;
mod models;
pub mod provider;
pub mod scheduler;
pub mod terminal;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{debug, warn};

pub use app::App;
pub use engine::{
    Advance, Clock, QuizResults, QuizSession, ReviewEntry, SessionStatus, Tick, shuffled_options,
};
pub use error::{ConfigError, ProviderError, QuestionError, QuizError};
pub use models::{
    Answer, AppState, DEFAULT_CATEGORY_ID, DEFAULT_QUESTION_COUNT, DEFAULT_TIME_LIMIT_SECONDS,
    Difficulty, MAX_QUESTION_COUNT, MAX_TIME_LIMIT_SECONDS, Question, QuizConfig,
    category_for_subject,
};
pub use provider::{
    FallbackProvider, FileProvider, OpenTdbProvider, QuestionProvider, QuestionSet,
    QuestionSource, builtin_questions, load_questions,
};

/// Longest the event loop blocks on input while no tick is due.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
    provider: Box<dyn QuestionProvider>,
}

impl Quiz {
    /// Create a quiz that draws its questions from `provider`.
    pub fn new(config: QuizConfig, provider: Box<dyn QuestionProvider>) -> Self {
        let app = App::new(config, provider.name());
        Self { app, provider }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app, self.provider.as_ref()).await
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    provider: &dyn QuestionProvider,
) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if app.state == AppState::Loading {
            let set = load_questions(provider, app.config()).await;
            if let Err(err) = app.begin(set, Instant::now()) {
                warn!(error = %err, "could not start quiz");
            }
            continue;
        }

        let timeout = app.countdown().timeout(Instant::now(), IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_input(app, key.code, Instant::now()) {
                    break;
                }
            }
        }

        app.poll_countdown(Instant::now());
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Loading => false,
        AppState::Quiz => handle_quiz_input(app, key, now),
        AppState::Result => handle_result_input(app, key, now),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.request_start();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    let answered = app
        .session()
        .is_some_and(|session| session.current_answer().is_some());

    let result = match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            Ok(())
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            Ok(())
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.answer_option(index).map(|_| ())
        }
        KeyCode::Enter | KeyCode::Char(' ') if answered => app.next_question(now),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer().map(|_| ()),
        KeyCode::Char('n') => app.next_question(now),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => Ok(()),
    };

    if let Err(err) = result {
        debug!(error = %err, "ignored quiz input");
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode, now: Instant) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.retake(now);
            false
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.new_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_app(count: u32) -> App {
        let config = QuizConfig::new(count, 20, Difficulty::Easy, 9).unwrap();
        let mut app = App::new(config, "built-in");
        assert!(!handle_input(&mut app, KeyCode::Enter, Instant::now()));
        assert_eq!(app.state, AppState::Loading);

        let set = QuestionSet {
            questions: builtin_questions(count as usize),
            source: QuestionSource::Provider("built-in".to_string()),
        };
        app.begin(set, Instant::now()).unwrap();
        app
    }

    fn correct_key(app: &App) -> KeyCode {
        let question = app.session().unwrap().current_question();
        let index = question
            .options()
            .iter()
            .position(|o| o == question.correct_answer())
            .unwrap();
        KeyCode::Char(char::from(b'1' + index as u8))
    }

    #[test]
    fn test_quit_from_welcome() {
        let mut app = App::new(QuizConfig::default(), "built-in");
        assert!(handle_input(&mut app, KeyCode::Char('q'), Instant::now()));
    }

    #[test]
    fn test_full_quiz_by_keyboard() {
        let now = Instant::now();
        let mut app = started_app(2);

        let key = correct_key(&app);
        handle_input(&mut app, key, now);
        assert_eq!(app.session().unwrap().score(), 1);

        // Second key press on an answered question changes nothing.
        handle_input(&mut app, KeyCode::Char('1'), now);
        assert_eq!(app.session().unwrap().answered_count(), 1);

        handle_input(&mut app, KeyCode::Enter, now);
        assert_eq!(app.session().unwrap().current_index(), 1);

        // Highlight and submit, then move on to the results.
        handle_input(&mut app, KeyCode::Char('j'), now);
        handle_input(&mut app, KeyCode::Enter, now);
        assert_eq!(app.session().unwrap().answered_count(), 2);
        handle_input(&mut app, KeyCode::Char('n'), now);
        assert_eq!(app.state, AppState::Result);

        let results = app.results().unwrap();
        assert_eq!(results.correct + results.incorrect, 2);
        assert!(results.correct >= 1);
    }

    #[test]
    fn test_next_without_answer_is_ignored() {
        let mut app = started_app(2);
        assert!(!handle_input(&mut app, KeyCode::Char('n'), Instant::now()));
        assert_eq!(app.session().unwrap().current_index(), 0);
    }

    #[test]
    fn test_result_keys() {
        let now = Instant::now();
        let mut app = started_app(1);
        handle_input(&mut app, KeyCode::Char('1'), now);
        handle_input(&mut app, KeyCode::Enter, now);
        assert_eq!(app.state, AppState::Result);

        handle_input(&mut app, KeyCode::Char('r'), now);
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session().unwrap().answered_count(), 0);

        handle_input(&mut app, KeyCode::Char('1'), now);
        handle_input(&mut app, KeyCode::Enter, now);
        handle_input(&mut app, KeyCode::Char('c'), now);
        assert_eq!(app.state, AppState::Welcome);
        assert!(app.session().is_none());
    }
}
