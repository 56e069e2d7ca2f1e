use std::time::Instant;

use tracing::debug;

use crate::engine::{QuizResults, QuizSession, Tick};
use crate::error::QuizError;
use crate::models::{Answer, AppState, QuizConfig};
use crate::provider::{QuestionSet, QuestionSource};
use crate::scheduler::Countdown;

/// Front-end state around one quiz session at a time.
///
/// Owns the countdown cadence: it is armed whenever a question is put on
/// screen and cancelled as soon as that question is answered, expires, or
/// the session is dropped.
pub struct App {
    pub state: AppState,
    config: QuizConfig,
    provider_name: String,
    source: Option<QuestionSource>,
    session: Option<QuizSession>,
    results: Option<QuizResults>,
    selected_option: usize,
    countdown: Countdown,
    result_scroll: usize,
}

impl App {
    pub fn new(config: QuizConfig, provider_name: impl Into<String>) -> Self {
        Self {
            state: AppState::Welcome,
            config,
            provider_name: provider_name.into(),
            source: None,
            session: None,
            results: None,
            selected_option: 0,
            countdown: Countdown::default(),
            result_scroll: 0,
        }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn source(&self) -> Option<&QuestionSource> {
        self.source.as_ref()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn results(&self) -> Option<&QuizResults> {
        self.results.as_ref()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Leave the welcome screen; the caller loads questions next.
    pub fn request_start(&mut self) {
        self.state = AppState::Loading;
    }

    /// Start a session over freshly loaded questions.
    pub fn begin(&mut self, set: QuestionSet, now: Instant) -> Result<(), QuizError> {
        match QuizSession::start(self.config, set.questions) {
            Ok(session) => {
                self.source = Some(set.source);
                self.enter_session(session, now);
                Ok(())
            }
            Err(err) => {
                self.state = AppState::Welcome;
                Err(err)
            }
        }
    }

    fn enter_session(&mut self, session: QuizSession, now: Instant) {
        self.session = Some(session);
        self.results = None;
        self.selected_option = 0;
        self.result_scroll = 0;
        self.state = AppState::Quiz;
        self.countdown.arm(now);
    }

    fn option_count(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.current_question().options().len())
    }

    fn is_answered(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.current_answer().is_some())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.is_answered() {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.is_answered() {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Answer with the highlighted option.
    pub fn submit_answer(&mut self) -> Result<Option<Answer>, QuizError> {
        self.answer_option(self.selected_option)
    }

    /// Answer with the option at `index` in display order.
    ///
    /// Returns `Ok(None)` when there is no session or no such option.
    pub fn answer_option(&mut self, index: usize) -> Result<Option<Answer>, QuizError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let Some(option) = session.current_question().options().get(index).cloned() else {
            return Ok(None);
        };

        let answer = session.record_answer(Some(&option))?;
        self.selected_option = index;
        self.countdown.cancel();
        Ok(Some(answer))
    }

    /// Move past an answered question, or onto the results when it was the
    /// last one.
    pub fn next_question(&mut self, now: Instant) -> Result<(), QuizError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        if session.advance()?.done {
            self.countdown.cancel();
            self.results = Some(session.results()?);
            self.result_scroll = 0;
            self.state = AppState::Result;
        } else {
            self.selected_option = 0;
            self.countdown.arm(now);
        }
        Ok(())
    }

    /// Feed one countdown tick to the session.
    pub fn on_tick(&mut self) -> Option<Tick> {
        let session = self.session.as_mut()?;
        let tick = session.tick();
        if tick.expired {
            debug!(index = session.current_index(), "time is up");
            self.countdown.cancel();
        }
        Some(tick)
    }

    /// Run every tick that has come due by `now`. Returns how many ran.
    pub fn poll_countdown(&mut self, now: Instant) -> usize {
        let mut ticks = 0;
        while self.countdown.take_due(now) {
            self.on_tick();
            ticks += 1;
        }
        ticks
    }

    /// Replay the same questions from the start.
    pub fn retake(&mut self, now: Instant) {
        if let Some(session) = self.session.as_ref() {
            let retake = session.retake();
            self.enter_session(retake, now);
        }
    }

    /// Drop the current session and go back to the welcome screen.
    pub fn new_quiz(&mut self) {
        self.countdown.cancel();
        self.session = None;
        self.results = None;
        self.source = None;
        self.selected_option = 0;
        self.result_scroll = 0;
        self.state = AppState::Welcome;
    }

    pub fn scroll_results_down(&mut self) {
        let total = self.session.as_ref().map_or(0, QuizSession::total_questions);
        if self.result_scroll + 1 < total {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}
