//! Question screen, shown while a question is open and during the reveal.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap};

use super::{OPTION_LABELS, key_label};
use crate::app::App;
use crate::game::{AnswerMark, Phase, QUESTION_TIME};
use crate::models::{Player, QuestionRecord};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.round.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress
        Constraint::Length(3), // Timer
        Constraint::Length(5), // Question text
        Constraint::Min(6),    // Options
        Constraint::Length(5), // Players
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_timer(frame, chunks[1], app);
    render_question_text(frame, chunks[2], question.text());
    render_options(frame, chunks[3], app, question);
    render_players(frame, chunks[4], app, question);
    render_controls(frame, chunks[5], app);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.round.state();
    let progress = format!(
        "Question {} of {}",
        state.current_index + 1,
        state.questions.len()
    );
    let source = state
        .provenance
        .map(|provenance| format!("{} questions", provenance))
        .unwrap_or_default();

    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);
    frame.render_widget(
        Paragraph::new(progress).style(Style::default().fg(Color::Cyan).bold()),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(source)
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        halves[1],
    );
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let remaining = app.round.state().time_remaining;
    let ratio = f64::from(remaining.min(QUESTION_TIME)) / f64::from(QUESTION_TIME);
    let color = match remaining {
        0..=3 => Color::Red,
        4..=7 => Color::Yellow,
        _ => Color::Green,
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{}s", remaining));

    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, question: &QuestionRecord) {
    let marks = app.round.answer_marks();
    let selections = app.round.state().selections;

    let lines: Vec<Line> = question
        .answers()
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let style = match marks[index] {
                AnswerMark::Correct => Style::default().fg(Color::Green).bold(),
                AnswerMark::Incorrect => Style::default().fg(Color::Red),
                AnswerMark::Neutral => Style::default().fg(Color::White),
            };

            let mut spans = vec![
                Span::styled(format!("{}) ", OPTION_LABELS[index]), style),
                Span::styled(answer.as_str(), style),
            ];
            if selections.player1 == Some(index) {
                spans.push(Span::styled("  [P1]", Style::default().fg(Color::Blue).bold()));
            }
            if selections.player2 == Some(index) {
                spans.push(Span::styled("  [P2]", Style::default().fg(Color::Magenta).bold()));
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Answers ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_players(frame: &mut Frame, area: Rect, app: &App, question: &QuestionRecord) {
    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    for (player, column) in Player::ALL.into_iter().zip(columns.iter()) {
        let color = player_color(player);
        let state = app.round.state();
        let selection = match state.selections.get(player) {
            Some(index) => format!("{} - {}", OPTION_LABELS[index], question.answers()[index]),
            None => "No selection".to_string(),
        };
        let keys: Vec<String> = app
            .router()
            .keys_for(player)
            .iter()
            .map(|key| key_label(key))
            .collect();

        let content = vec![
            Line::from(Span::styled(
                format!("Score: {}", state.scores.get(player)),
                Style::default().fg(Color::White).bold(),
            )),
            Line::from(Span::styled(selection, Style::default().fg(color))),
            Line::from(Span::styled(keys.join(" "), Style::default().fg(Color::DarkGray))),
        ];

        let widget = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", player.label()))
                .title_style(Style::default().fg(color).bold())
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(widget, *column);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.round.phase() == Phase::QuestionResolved {
        "next question coming up...  ·  esc quit"
    } else {
        "player 1: w a s d  ·  player 2: arrow keys  ·  esc quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

pub(super) fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Blue,
        Player::Two => Color::Magenta,
    }
}
