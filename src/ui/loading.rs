use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::TITLE;
use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let topic = app
        .round
        .state()
        .topic
        .as_ref()
        .map(|topic| topic.to_string())
        .unwrap_or_default();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Generating questions about ", Style::default().fg(Color::Yellow)),
            Span::styled(topic, Style::default().fg(Color::Yellow).bold()),
            Span::styled("...", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from("esc to cancel".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
