//! Loading Steps Widget
//!
//! Shows the rotating three-phase caption while an analysis request is in
//! flight.

use crate::tui::app::LOADING_STEPS;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the in-flight analysis indicator
pub fn render_loading(frame: &mut Frame, area: Rect, step: usize) {
    let block = Block::default()
        .title(" Analyzing ")
        .borders(Borders::ALL)
        .border_style(Theme::active());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active = step % LOADING_STEPS.len();
    let mut phase_spans: Vec<Span> = Vec::new();
    for (i, name) in LOADING_STEPS.iter().enumerate() {
        let (icon, style) = if i == active {
            (Icons::ACTIVE, Theme::active())
        } else {
            (Icons::PENDING, Theme::pending())
        };
        phase_spans.push(Span::styled(format!("{icon} "), style));
        phase_spans.push(Span::styled((*name).to_string(), style));
        if i < LOADING_STEPS.len() - 1 {
            phase_spans.push(Span::styled(format!(" {} ", Icons::ARROW), Theme::text_dim()));
        }
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{}… ", LOADING_STEPS[active]), Theme::active()),
        ]),
        Line::from(phase_spans),
        Line::from(Span::styled(
            "One request at a time; the analysis cannot be cancelled once sent.",
            Theme::text_dim(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
