use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.config();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} questions · {}s each · {}",
                config.question_count(),
                config.time_limit_seconds(),
                config.difficulty()
            ),
            Color::DarkGray,
        )),
        Line::from(Span::styled(
            format!(
                "category {} · from {}",
                config.category_id(),
                app.provider_name()
            ),
            Color::DarkGray,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ];

    render_centered(frame, area, content, 10);
}

pub fn render_loading(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(Color::Yellow).bold(),
        )),
    ];

    render_centered(frame, area, content, 4);
}

fn render_centered(frame: &mut Frame, area: Rect, content: Vec<Line>, height: u16) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
