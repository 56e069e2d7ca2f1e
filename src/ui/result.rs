use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::engine::{QuizResults, ReviewEntry};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(results), Some(session)) = (app.results(), app.session()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], results);
    render_review(frame, chunks[2], &session.review(), app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, results: &QuizResults) {
    let grade_color = get_grade_color(results.percentage);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                results.correct, results.total, results.percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(vec![
            Span::styled(format!("{} correct", results.correct), Color::Green),
            Span::styled("  ·  ", Color::DarkGray),
            Span::styled(format!("{} incorrect", results.incorrect), Color::Red),
            Span::styled("  ·  ", Color::DarkGray),
            Span::styled(format!("time {}", results.time_taken()), Color::Gray),
        ]),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn review_lines(entry: &ReviewEntry) -> Vec<Line<'static>> {
    let (symbol, color) = if entry.is_correct {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
        Span::styled(
            format!("{:2}. ", entry.question_index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            truncate_question(&entry.question_text),
            Style::default().fg(Color::Gray),
        ),
    ])];

    let yours = entry
        .selected_answer
        .clone()
        .unwrap_or_else(|| "no answer".to_string());
    let mut detail = vec![Span::styled(
        format!("       you: {}", yours),
        Style::default().fg(color),
    )];
    if !entry.is_correct {
        detail.push(Span::styled(
            format!("  ·  answer: {}", entry.correct_answer),
            Style::default().fg(Color::Green),
        ));
    }
    lines.push(Line::from(detail));
    lines
}

fn render_review(frame: &mut Frame, area: Rect, review: &[ReviewEntry], scroll: usize) {
    let lines: Vec<Line> = review.iter().flat_map(review_lines).collect();

    // Each entry spans two lines.
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll(((scroll * 2) as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retake  ·  c new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
