//! Event Handling
//!
//! Maps keyboard and timer events onto application actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Force quit without confirmation
    ForceQuit,
    /// Submit the focused form field (Enter)
    Submit,
    /// Toggle single/multi-drug mode
    ToggleMultiMode,
    /// Toggle the raw-JSON overlay
    ToggleRawJson,
    /// Toggle the help overlay
    ToggleHelp,
    /// Escape - close overlays, clear inline errors
    Escape,
    /// Copy the current report to the clipboard
    CopyReport,
    /// Save the current report as a JSON file
    SaveReport,
    /// Scroll up one line
    ScrollUp,
    /// Scroll down one line
    ScrollDown,
    /// Scroll up one page
    ScrollPageUp,
    /// Scroll down one page
    ScrollPageDown,
    /// Move to next form field (Tab)
    NextField,
    /// Move to previous form field (Shift+Tab)
    PrevField,
    /// Regular input character for the focused field
    Input(KeyEvent),
    /// Timer tick for the loading-step animation
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = Self::map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Try to get the next action without blocking
    pub async fn try_next(&mut self) -> Option<AppAction> {
        self.rx.try_recv().ok()
    }

    /// Map a crossterm event to an app action
    fn map_event(event: Event) -> Option<AppAction> {
        match event {
            Event::Key(key) => Self::map_key_event(key),
            Event::Mouse(_) => None,
            Event::Resize(_, _) => None, // Terminal handles resize
            _ => None,
        }
    }

    /// Map a key event to an app action
    fn map_key_event(key: KeyEvent) -> Option<AppAction> {
        match (key.modifiers, key.code) {
            // Quit shortcuts
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),

            // Mode and panel toggles
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(AppAction::ToggleMultiMode),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(AppAction::ToggleRawJson),

            // Export
            (KeyModifiers::CONTROL, KeyCode::Char('y')) => Some(AppAction::CopyReport),
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(AppAction::SaveReport),

            // Navigation with modifiers
            (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(AppAction::PrevField),

            // No modifiers (shift falls through for typed characters)
            (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
                KeyCode::Esc => Some(AppAction::Escape),
                KeyCode::Enter => Some(AppAction::Submit),
                KeyCode::F(1) => Some(AppAction::ToggleHelp),

                // Scrolling
                KeyCode::Up => Some(AppAction::ScrollUp),
                KeyCode::Down => Some(AppAction::ScrollDown),
                KeyCode::PageUp => Some(AppAction::ScrollPageUp),
                KeyCode::PageDown => Some(AppAction::ScrollPageDown),

                // Field navigation
                KeyCode::Tab => Some(AppAction::NextField),
                KeyCode::BackTab => Some(AppAction::PrevField),

                // Everything else is input for the focused field
                _ => Some(AppAction::Input(key)),
            },

            // Pass through other key combinations as input
            _ => Some(AppAction::Input(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(modifiers: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_shortcuts_map_to_actions() {
        assert!(matches!(
            EventHandler::map_key_event(key(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(AppAction::ForceQuit)
        ));
        assert!(matches!(
            EventHandler::map_key_event(key(KeyModifiers::CONTROL, KeyCode::Char('b'))),
            Some(AppAction::ToggleMultiMode)
        ));
        assert!(matches!(
            EventHandler::map_key_event(key(KeyModifiers::CONTROL, KeyCode::Char('y'))),
            Some(AppAction::CopyReport)
        ));
    }

    #[test]
    fn plain_characters_pass_through_as_input() {
        let action = EventHandler::map_key_event(key(KeyModifiers::NONE, KeyCode::Char('w')));
        assert!(matches!(action, Some(AppAction::Input(_))));
    }

    #[test]
    fn enter_submits_and_tab_moves_focus() {
        assert!(matches!(
            EventHandler::map_key_event(key(KeyModifiers::NONE, KeyCode::Enter)),
            Some(AppAction::Submit)
        ));
        assert!(matches!(
            EventHandler::map_key_event(key(KeyModifiers::NONE, KeyCode::Tab)),
            Some(AppAction::NextField)
        ));
    }
}
