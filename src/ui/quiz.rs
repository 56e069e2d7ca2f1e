use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::QuizSession;
use crate::models::Answer;
use crate::provider::QuestionSource;

const WARNING_SECONDS: u32 = 10;
const DANGER_SECONDS: u32 = 5;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session, app.source());
    render_timer(frame, chunks[1], session);
    render_question_text(frame, chunks[3], session);
    render_options(frame, chunks[4], session, app.selected_option());
    render_feedback(frame, chunks[5], session);
    render_controls(frame, chunks[6], session);
}

fn render_header(frame: &mut Frame, area: Rect, session: &QuizSession, source: Option<&QuestionSource>) {
    let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let category = session.current_question().category();
    let note = match source {
        Some(QuestionSource::Fallback { .. }) => format!("{} · offline set", category),
        _ => category.to_string(),
    };
    frame.render_widget(Paragraph::new(note).fg(Color::DarkGray), left);

    let progress = format!(
        "Question {} of {}",
        session.current_index() + 1,
        session.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::Cyan)
        .bold();
    frame.render_widget(widget, right);
}

fn timer_color(time_left: u32) -> Color {
    if time_left <= DANGER_SECONDS {
        Color::Red
    } else if time_left <= WARNING_SECONDS {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn render_timer(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let time_left = session.time_left();
    let limit = session.config().time_limit_seconds();
    let ratio = f64::from(time_left) / f64::from(limit);

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(timer_color(time_left)))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}s", time_left));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let widget = Paragraph::new(session.current_question().text())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn option_style(option: &str, index: usize, selected: usize, answer: Option<&Answer>) -> Style {
    match answer {
        Some(answer) if option == answer.correct_answer => Style::default().fg(Color::Green).bold(),
        Some(answer) if answer.selected_answer.as_deref() == Some(option) => {
            Style::default().fg(Color::Red).bold()
        }
        Some(_) => Style::default().fg(Color::DarkGray),
        None if index == selected => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
    }
}

fn render_options(frame: &mut Frame, area: Rect, session: &QuizSession, selected: usize) {
    let answer = session.current_answer();
    let options = session.current_question().options();
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let style = option_style(option, index, selected, answer);
        let marker = if answer.is_none() && index == selected {
            ">"
        } else {
            " "
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", index + 1), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let Some(answer) = session.current_answer() else {
        return;
    };

    let (text, color) = match (&answer.selected_answer, answer.is_correct) {
        (_, true) => ("Correct!".to_string(), Color::Green),
        (Some(_), false) => (
            format!("Wrong. The answer was {}", answer.correct_answer),
            Color::Red,
        ),
        (None, false) => (
            format!("Time's up! The answer was {}", answer.correct_answer),
            Color::Red,
        ),
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let text = match session.current_answer() {
        None => "1-4 or j/k + enter answer  ·  q quit",
        Some(_) if session.is_last_question() => "enter see results  ·  q quit",
        Some(_) => "enter next question  ·  q quit",
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_color_thresholds() {
        assert_eq!(timer_color(30), Color::Green);
        assert_eq!(timer_color(11), Color::Green);
        assert_eq!(timer_color(10), Color::Yellow);
        assert_eq!(timer_color(6), Color::Yellow);
        assert_eq!(timer_color(5), Color::Red);
        assert_eq!(timer_color(0), Color::Red);
    }

    #[test]
    fn test_option_style_after_wrong_answer() {
        let answer = Answer {
            question_index: 0,
            selected_answer: Some("Berlin".to_string()),
            correct_answer: "Paris".to_string(),
            is_correct: false,
        };

        assert_eq!(
            option_style("Paris", 0, 0, Some(&answer)).fg,
            Some(Color::Green)
        );
        assert_eq!(
            option_style("Berlin", 1, 0, Some(&answer)).fg,
            Some(Color::Red)
        );
        assert_eq!(
            option_style("Madrid", 2, 0, Some(&answer)).fg,
            Some(Color::DarkGray)
        );
        assert_eq!(option_style("Madrid", 2, 2, None).fg, Some(Color::Cyan));
    }
}
