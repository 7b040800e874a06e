//! Topic entry screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::TITLE;
use crate::app::App;
use crate::data::CURATED_TOPICS;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from("Two players · One keyboard · Any topic".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Topic: ", Style::default().fg(Color::White)),
            Span::styled(app.topic_input(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    match app.round.notice() {
        Some(notice) => content.push(Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from(Span::styled(
            format!("Try: {}", CURATED_TOPICS.join(", ")),
            Style::default().fg(Color::DarkGray),
        ))),
    }

    content.extend([
        Line::from(""),
        Line::from(vec![
            Span::styled("Player 1 ", Style::default().fg(Color::Blue).bold()),
            Span::styled("W A S D", Style::default().fg(Color::Gray)),
            Span::raw("    "),
            Span::styled("Player 2 ", Style::default().fg(Color::Magenta).bold()),
            Span::styled("↑ ← ↓ →", Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  esc to quit".fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
