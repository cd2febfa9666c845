//! Terminal User Interface Module
//!
//! The dashboard surface: an upload form, the rotating analysis progress,
//! risk cards and a raw-JSON viewer. Built with Ratatui.
//!
//! # Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  🧬 PGX Dash  Pharmacogenomic Risk Report           Single-drug │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─ Variant File (.vcf) ───────────────────────────────────┐   │
//! │  │ > path/to/sample.vcf            ✓ sample.vcf (1% limit)  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  ┌─ Drugs ─────────────────────────────────────────────────┐   │
//! │  │ > CODEINE, WARFARIN                                      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  ┌─ Risk Report ───────────────────────────────────────────┐   │
//! │  │ [ CODEINE ] Toxic 91%   [scrollable cards + caveats]     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  Ready │ [Enter] Analyze [Tab] Field [^R] JSON [^Q] Quit        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, Focus};
pub use event::{AppAction, EventHandler};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the dashboard
pub async fn run(
    config: crate::config::Config,
    prefill_vcf: Option<PathBuf>,
    prefill_drugs: Option<String>,
) -> anyhow::Result<()> {
    info!("starting TUI mode");

    let mut terminal = init_terminal()?;

    let mut app = App::new(config);
    app.prefill(prefill_vcf, prefill_drugs);

    let mut events = EventHandler::new(std::time::Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events from spawned inspection/analysis tasks
        app.poll_events();

        // Handle user input
        if let Some(action) = events.try_next().await {
            app.handle_action(action);
        }
        if app.should_quit {
            break;
        }

        // Small yield to prevent busy loop
        tokio::task::yield_now().await;
    }

    info!("TUI exited normally");
    Ok(())
}
