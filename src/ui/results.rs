use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::OPTION_LABELS;
use super::question::player_color;
use crate::app::App;
use crate::game::ResolvedQuestion;
use crate::models::{Outcome, Player, QuestionRecord};

const QUESTION_PREVIEW_LENGTH: usize = 45;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_summary(frame, chunks[1], app);
    render_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let scores = app.round.state().scores;
    let outcome = app.round.outcome().unwrap_or(Outcome::from_scores(&scores));
    let headline_color = match outcome {
        Outcome::Winner(player) => player_color(player),
        Outcome::Tie => Color::Yellow,
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            outcome.headline(),
            Style::default().fg(headline_color).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Player 1  ", Style::default().fg(player_color(Player::One))),
            Span::styled(scores.player1.to_string(), Style::default().fg(Color::White).bold()),
            Span::styled("   :   ", Style::default().fg(Color::DarkGray)),
            Span::styled(scores.player2.to_string(), Style::default().fg(Color::White).bold()),
            Span::styled("  Player 2", Style::default().fg(player_color(Player::Two))),
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

fn render_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let questions = &app.round.state().questions;

    let lines: Vec<Line> = app
        .round
        .state()
        .history
        .iter()
        .filter_map(|resolved| {
            let question = questions.iter().find(|q| q.id() == resolved.question_id)?;
            Some(breakdown_line(question, resolved))
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn breakdown_line<'a>(question: &'a QuestionRecord, resolved: &ResolvedQuestion) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{:2}. ", question.id()),
        Style::default().fg(Color::DarkGray),
    )];

    for player in Player::ALL {
        let (symbol, color) = match resolved.selections.get(player) {
            Some(_) if resolved.was_correct(player) => ("+", Color::Green),
            Some(_) => ("-", Color::Red),
            None => ("·", Color::DarkGray),
        };
        spans.push(Span::styled(format!("{} ", symbol), Style::default().fg(color)));
    }

    spans.push(Span::styled(
        truncate_question(question.text()),
        Style::default().fg(Color::Gray),
    ));
    spans.push(Span::styled(
        format!(
            "  {}) {}",
            OPTION_LABELS[resolved.correct_index],
            question.answers()[resolved.correct_index]
        ),
        Style::default().fg(Color::Green),
    ));

    Line::from(spans)
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
    let widget = Paragraph::new("r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(60);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(truncated.ends_with("..."));
    }
}
