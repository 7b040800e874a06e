mod loading;
mod question;
mod results;
mod topic;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::game::Phase;

pub(crate) const TITLE: &str = "DUEL TRIVIA";
pub(crate) const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.round.phase() {
        Phase::TopicEntry => topic::render(frame, area, app),
        Phase::Loading => loading::render(frame, area, app),
        Phase::QuestionOpen | Phase::QuestionResolved => question::render(frame, area, app),
        Phase::RoundComplete => results::render(frame, area, app),
    }
}

/// Display label for a key name from the routing table.
pub(crate) fn key_label(name: &str) -> String {
    match name {
        "arrowup" => "↑".to_string(),
        "arrowdown" => "↓".to_string(),
        "arrowleft" => "←".to_string(),
        "arrowright" => "→".to_string(),
        other => other.to_uppercase(),
    }
}
