//! UI Rendering
//!
//! Main layout and rendering logic for the dashboard.

use crate::tui::app::{App, Focus};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets::{cards, steps};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // File input
            Constraint::Length(4), // Drug input
            Constraint::Min(8),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_file_input(frame, chunks[1], app);
    render_drug_input(frame, chunks[2], app);
    render_main(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    if app.show_raw_json {
        render_raw_json(frame, app);
    }
    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mode = if app.multi_mode {
        Span::styled("Multi-drug", Theme::warning())
    } else {
        Span::styled("Single-drug", Theme::text_secondary())
    };

    let title_text = vec![Line::from(vec![
        Span::raw("🧬 "),
        Span::styled("PGX Dash", Theme::title()),
        Span::styled(" Pharmacogenomic Risk Report", Theme::text_secondary()),
        Span::raw("  "),
        mode,
        Span::styled(
            format!("  {}", app.config.backend.base_url),
            Theme::text_dim(),
        ),
    ])];

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(title, area);
}

fn render_file_input(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::FilePath;
    let block = Block::default()
        .title(" Variant File (.vcf) ")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(&app.file_input, rows[0]);

    let status = if let Some(error) = &app.file_error {
        Line::from(vec![
            Span::styled(format!("{} ", Icons::ERROR), Theme::error()),
            Span::styled(error.clone(), Theme::error()),
        ])
    } else if app.inspecting {
        Line::from(Span::styled("Inspecting file…", Theme::active()))
    } else if let Some(file) = &app.selected_file {
        Line::from(vec![
            Span::styled(format!("{} ", Icons::COMPLETE), Theme::success()),
            Span::styled(file.name.clone(), Theme::text()),
            Span::styled(
                format!(
                    "  {} KiB ({}% of limit)",
                    file.size_bytes / 1024,
                    file.usage_percent()
                ),
                Theme::text_secondary(),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "Enter a path and press Enter to validate",
            Theme::text_dim(),
        ))
    };
    frame.render_widget(Paragraph::new(status), rows[1]);
}

fn render_drug_input(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Drugs;
    let block = Block::default()
        .title(" Drugs ")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(&app.drug_input, rows[0]);

    let hint = Line::from(Span::styled(
        "Press Enter to analyze. One drug uses the single endpoint, several the batch endpoint",
        Theme::text_dim(),
    ));
    frame.render_widget(Paragraph::new(hint), rows[1]);
}

fn render_main(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.loading {
        steps::render_loading(frame, area, app.loading_step);
        return;
    }

    let block = Block::default()
        .title(" Risk Report ")
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &app.error {
        let lines = vec![
            Line::from(Span::styled(error.clone(), Theme::error())),
            Line::from(""),
            Line::from(Span::styled(
                "Correct the input and press Enter to retry.",
                Theme::text_secondary(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        return;
    }

    if app.report.is_none() {
        let idle = vec![
            Line::from(Span::styled(
                "No analysis yet.",
                Theme::text_secondary(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Load a .vcf file, enter one or more drugs, and press Enter.",
                Theme::text_dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(idle), inner);
        return;
    }

    let lines = cards::results_lines(app);
    if !app.show_raw_json {
        app.update_scroll_bounds(lines.len() as u16, inner.height);
    }
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));
    frame.render_widget(paragraph, inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let state = if app.loading {
        Span::styled(format!("{}…", app.loading_caption()), Theme::active())
    } else if let Some(feedback) = &app.feedback {
        Span::styled(feedback.clone(), Theme::success())
    } else if app.error.is_some() || app.file_error.is_some() {
        Span::styled("Error", Theme::error())
    } else if let Some(completed) = &app.last_completed {
        Span::styled(
            format!("Ready (completed {})", completed.format("%H:%M:%S")),
            Theme::text_secondary(),
        )
    } else {
        Span::styled("Ready", Theme::text_secondary())
    };

    let shortcuts = vec![
        Span::styled(" [Enter]", Theme::shortcut_key()),
        Span::styled(" Analyze ", Theme::shortcut_desc()),
        Span::styled("[Tab]", Theme::shortcut_key()),
        Span::styled(" Field ", Theme::shortcut_desc()),
        Span::styled("[^B]", Theme::shortcut_key()),
        Span::styled(" Mode ", Theme::shortcut_desc()),
        Span::styled("[^R]", Theme::shortcut_key()),
        Span::styled(" JSON ", Theme::shortcut_desc()),
        Span::styled("[^Y]", Theme::shortcut_key()),
        Span::styled(" Copy ", Theme::shortcut_desc()),
        Span::styled("[^D]", Theme::shortcut_key()),
        Span::styled(" Save ", Theme::shortcut_desc()),
        Span::styled("[^Q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(state)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

fn render_raw_json(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Raw JSON (Esc to close) ")
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let json = app.raw_json().unwrap_or_default();
    let lines: Vec<Line> = json
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Theme::text())))
        .collect();
    app.update_scroll_bounds(lines.len() as u16, inner.height);

    let paragraph = Paragraph::new(lines).scroll((app.raw_scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter        ", Theme::shortcut_key()),
            Span::styled("Validate file / run analysis", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Tab          ", Theme::shortcut_key()),
            Span::styled("Switch between file and drug fields", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+B       ", Theme::shortcut_key()),
            Span::styled("Toggle single/multi-drug mode", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+R       ", Theme::shortcut_key()),
            Span::styled("Toggle raw JSON view", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+Y       ", Theme::shortcut_key()),
            Span::styled("Copy report JSON to clipboard", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+D       ", Theme::shortcut_key()),
            Span::styled("Save report JSON to downloads", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("↑/↓ PgUp/PgDn", Theme::shortcut_key()),
            Span::styled(" Scroll results", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Esc          ", Theme::shortcut_key()),
            Span::styled("Close overlay / clear message", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+Q       ", Theme::shortcut_key()),
            Span::styled("Quit", Theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press Esc to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
