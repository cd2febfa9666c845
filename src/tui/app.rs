//! Application State
//!
//! Contains the main application state and logic for the TUI.

use crate::api::{normalize_error_message, ApiClient};
use crate::config::Config;
use crate::export;
use crate::models::AnalysisReport;
use crate::report::{self, RiskCard, ToneCounts};
use crate::tui::event::AppAction;
use crate::vcf::{self, SelectedFile};
use crate::{caveats, drugs};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tui_textarea::TextArea;

/// Captions cycled while an analysis request is in flight.
pub const LOADING_STEPS: [&str; 3] = [
    "Parsing variant file",
    "Matching pharmacogenomic profiles",
    "Generating clinical explanation",
];

/// Event-loop ticks per caption: 12 ticks at 100 ms is the 1.2 s cadence.
const TICKS_PER_STEP: u64 = 12;

/// Which form field owns keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    FilePath,
    Drugs,
}

/// Events from spawned background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// File inspection finished; the error is the raw validator message
    FileInspected(Result<SelectedFile, String>),
    /// Analysis request resolved with a report
    AnalysisComplete(Box<AnalysisReport>),
    /// Analysis request failed; the payload is the raw error message
    AnalysisFailed(String),
    /// Report export to disk finished
    ReportSaved(Result<String, String>),
}

/// Main application state
pub struct App {
    // Configuration
    pub config: Config,

    // UI state
    pub should_quit: bool,
    pub focus: Focus,
    pub show_raw_json: bool,
    pub show_help: bool,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    pub raw_scroll: u16,

    // Form state
    pub file_input: TextArea<'static>,
    pub drug_input: TextArea<'static>,
    pub multi_mode: bool,
    pub selected_file: Option<SelectedFile>,
    pub inspecting: bool,

    // Request state
    pub loading: bool,
    pub loading_step: usize,
    tick_count: u64,

    // Result state
    pub report: Option<AnalysisReport>,
    pub last_completed: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub file_error: Option<String>,
    pub feedback: Option<String>,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        let mut file_input = TextArea::default();
        file_input.set_cursor_line_style(ratatui::style::Style::default());
        file_input.set_placeholder_text("Path to a .vcf variant file (max 5 MiB)");

        let mut drug_input = TextArea::default();
        drug_input.set_cursor_line_style(ratatui::style::Style::default());
        drug_input.set_placeholder_text("Drug names, comma separated (e.g. CODEINE, WARFARIN)");

        let (tx, rx) = mpsc::channel(100);

        Self {
            config,
            should_quit: false,
            focus: Focus::FilePath,
            show_raw_json: false,
            show_help: false,
            scroll_offset: 0,
            max_scroll: 0,
            raw_scroll: 0,
            file_input,
            drug_input,
            multi_mode: false,
            selected_file: None,
            inspecting: false,
            loading: false,
            loading_step: 0,
            tick_count: 0,
            report: None,
            last_completed: None,
            error: None,
            file_error: None,
            feedback: None,
            event_rx: rx,
            event_tx: tx,
        }
    }

    /// Prefill the form from CLI arguments. A given file path is validated
    /// immediately, exactly as if the user had submitted it.
    pub fn prefill(&mut self, vcf: Option<PathBuf>, drug_list: Option<String>) {
        if let Some(drug_list) = drug_list {
            self.drug_input.insert_str(&drug_list);
            self.focus = Focus::Drugs;
        }
        if let Some(path) = vcf {
            self.file_input.insert_str(path.display().to_string());
            self.begin_file_inspection();
        }
    }

    /// Drain pending events from background tasks
    pub fn poll_events(&mut self) {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        for event in events {
            self.handle_event(event);
        }
    }

    /// Handle an event from a background task
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FileInspected(Ok(file)) => {
                info!(file = %file.name, "VCF accepted");
                self.inspecting = false;
                self.file_error = None;
                self.selected_file = Some(file);
            }
            AppEvent::FileInspected(Err(raw)) => {
                warn!(error = %raw, "VCF rejected");
                self.inspecting = false;
                self.selected_file = None;
                self.file_error = Some(normalize_error_message(&raw));
            }
            AppEvent::AnalysisComplete(report) => {
                info!("analysis complete");
                self.finish_request();
                self.error = None;
                self.report = Some(*report);
                self.last_completed = Some(Utc::now());
                self.scroll_offset = 0;
            }
            AppEvent::AnalysisFailed(raw) => {
                warn!(error = %raw, "analysis failed");
                self.finish_request();
                self.report = None;
                self.last_completed = None;
                self.error = Some(normalize_error_message(&raw));
            }
            AppEvent::ReportSaved(Ok(path)) => {
                self.feedback = Some(format!("Report saved to {path}"));
            }
            AppEvent::ReportSaved(Err(e)) => {
                self.feedback = Some(format!("Export failed: {e}"));
            }
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Submit => match self.focus {
                Focus::FilePath => self.begin_file_inspection(),
                Focus::Drugs => self.begin_analysis(),
            },
            AppAction::ToggleMultiMode => {
                self.multi_mode = !self.multi_mode;
            }
            AppAction::ToggleRawJson => {
                if self.report.is_some() {
                    self.show_raw_json = !self.show_raw_json;
                    self.raw_scroll = 0;
                }
            }
            AppAction::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            AppAction::Escape => {
                if self.show_raw_json || self.show_help {
                    self.show_raw_json = false;
                    self.show_help = false;
                } else {
                    self.error = None;
                    self.feedback = None;
                }
            }
            AppAction::CopyReport => self.copy_report(),
            AppAction::SaveReport => self.save_report(),
            AppAction::ScrollUp => {
                let offset = self.active_scroll_mut();
                *offset = offset.saturating_sub(1);
            }
            AppAction::ScrollDown => {
                let max = self.max_scroll;
                let offset = self.active_scroll_mut();
                *offset = (*offset + 1).min(max);
            }
            AppAction::ScrollPageUp => {
                let offset = self.active_scroll_mut();
                *offset = offset.saturating_sub(10);
            }
            AppAction::ScrollPageDown => {
                let max = self.max_scroll;
                let offset = self.active_scroll_mut();
                *offset = (*offset + 10).min(max);
            }
            AppAction::NextField | AppAction::PrevField => {
                self.focus = match self.focus {
                    Focus::FilePath => Focus::Drugs,
                    Focus::Drugs => Focus::FilePath,
                };
            }
            AppAction::Input(key) => {
                match self.focus {
                    Focus::FilePath => self.file_input.input(key),
                    Focus::Drugs => self.drug_input.input(key),
                };
            }
            AppAction::Tick => self.on_tick(),
        }
    }

    /// Advance the loading caption while a request is in flight. The
    /// rotation is scoped to the request: it only moves while the busy flag
    /// is set and is reset when the request resolves.
    fn on_tick(&mut self) {
        if self.loading {
            self.tick_count += 1;
            if self.tick_count % TICKS_PER_STEP == 0 {
                self.loading_step = (self.loading_step + 1) % LOADING_STEPS.len();
            }
        }
    }

    fn finish_request(&mut self) {
        self.loading = false;
        self.loading_step = 0;
        self.tick_count = 0;
    }

    fn active_scroll_mut(&mut self) -> &mut u16 {
        if self.show_raw_json {
            &mut self.raw_scroll
        } else {
            &mut self.scroll_offset
        }
    }

    /// Kick off async validation of the path currently in the file field.
    fn begin_file_inspection(&mut self) {
        if self.inspecting {
            return;
        }
        let raw_path = self.file_input.lines().join("").trim().to_string();
        if raw_path.is_empty() {
            self.file_error = Some("No file selected: enter a path to a .vcf file.".to_string());
            return;
        }

        self.inspecting = true;
        self.file_error = None;
        let path = PathBuf::from(raw_path);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = vcf::inspect_file(&path).await.map_err(|e| e.to_string());
            tx.send(AppEvent::FileInspected(outcome)).await.ok();
        });
    }

    /// Submit one analysis request. The busy flag keeps a second submission
    /// from overlapping the first; there is no request queue.
    fn begin_analysis(&mut self) {
        if self.loading {
            return;
        }
        self.error = None;
        self.feedback = None;

        let Some(file) = self.selected_file.clone() else {
            self.error = Some("No file selected. Load a .vcf file before analyzing.".to_string());
            return;
        };

        let tokens = match drugs::parse_drug_tokens(&self.drug_input.lines().join("")) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        // A new analysis discards the previous report before the request is
        // sent, so a failure never leaves a stale result on screen.
        self.report = None;
        self.show_raw_json = false;
        self.loading = true;
        self.loading_step = 0;
        self.tick_count = 0;

        info!(drugs = tokens.len(), file = %file.name, "starting analysis");
        let client = ApiClient::new(self.config.backend.base_url.clone());
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match client.analyze(&file, &tokens).await {
                Ok(report) => {
                    tx.send(AppEvent::AnalysisComplete(Box::new(report))).await.ok();
                }
                Err(e) => {
                    tx.send(AppEvent::AnalysisFailed(e.to_string())).await.ok();
                }
            }
        });
    }

    fn copy_report(&mut self) {
        let Some(report) = self.report.as_ref() else {
            self.feedback = Some("Nothing to copy yet. Run an analysis first.".to_string());
            return;
        };
        match export::pretty_json(report).and_then(|json| export::copy_to_clipboard(&json)) {
            Ok(()) => self.feedback = Some("Report JSON copied to clipboard.".to_string()),
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                self.feedback = Some(format!("Clipboard copy failed: {e}"));
            }
        }
    }

    fn save_report(&mut self) {
        let Some(report) = self.report.clone() else {
            self.feedback = Some("Nothing to save yet. Run an analysis first.".to_string());
            return;
        };
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = export::save_report(&report, &export::download_dir())
                .await
                .map(|p| p.display().to_string())
                .map_err(|e| e.to_string());
            tx.send(AppEvent::ReportSaved(outcome)).await.ok();
        });
    }

    // --- Display data, derived fresh from the current report ---

    pub fn cards(&self) -> Vec<RiskCard> {
        self.report
            .as_ref()
            .map(|r| report::derive_cards(r))
            .unwrap_or_default()
    }

    pub fn tone_counts(&self) -> ToneCounts {
        ToneCounts::tally(&self.cards())
    }

    pub fn caveat_list(&self) -> Vec<String> {
        self.report.as_ref().map(caveats::detect).unwrap_or_default()
    }

    pub fn detected_gene_list(&self) -> Vec<String> {
        self.report
            .as_ref()
            .map(report::detected_genes)
            .unwrap_or_default()
    }

    pub fn raw_json(&self) -> Option<String> {
        self.report
            .as_ref()
            .and_then(|r| export::pretty_json(r).ok())
    }

    pub fn loading_caption(&self) -> &'static str {
        LOADING_STEPS[self.loading_step % LOADING_STEPS.len()]
    }

    /// Update max scroll based on rendered content
    pub fn update_scroll_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.max_scroll = content_height.saturating_sub(viewport_height);
        if self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }
}
