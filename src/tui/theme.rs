//! Theme and Styling
//!
//! Defines colors and styles for the TUI interface.

use crate::report::RiskTone;
use ratatui::style::{Color, Modifier, Style};

/// Application theme
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Primary accent color (cyan/teal)
    pub const ACCENT: Color = Color::Rgb(0, 212, 255);

    /// Safe tone (green)
    pub const SAFE: Color = Color::Rgb(34, 197, 94);

    /// Adjust tone (yellow/amber)
    pub const ADJUST: Color = Color::Rgb(251, 191, 36);

    /// Toxic tone (red)
    pub const TOXIC: Color = Color::Rgb(239, 68, 68);

    // === Text Colors ===

    /// Primary text color
    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 229, 229);

    /// Secondary text color (muted)
    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 161);

    /// Dimmed text
    pub const TEXT_DIM: Color = Color::Rgb(82, 82, 82);

    // === Border Colors ===

    /// Default border color
    pub const BORDER: Color = Color::Rgb(51, 51, 51);

    /// Focused border color
    pub const BORDER_FOCUSED: Color = Color::Rgb(59, 130, 246);

    // === Styles ===

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Secondary/muted text style
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Dimmed text style
    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    /// Title style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Heading style
    pub fn heading() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Error style
    pub fn error() -> Style {
        Style::default().fg(Self::TOXIC)
    }

    /// Warning/caveat style
    pub fn warning() -> Style {
        Style::default().fg(Self::ADJUST)
    }

    /// Success/confirmation style
    pub fn success() -> Style {
        Style::default().fg(Self::SAFE)
    }

    /// Default border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border style
    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Active/in-progress indicator
    pub fn active() -> Style {
        Style::default()
            .fg(Self::ADJUST)
            .add_modifier(Modifier::BOLD)
    }

    /// Pending indicator
    pub fn pending() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Shortcut description style
    pub fn shortcut_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Card color for a risk tone
    pub fn tone_color(tone: RiskTone) -> Color {
        match tone {
            RiskTone::Safe => Self::SAFE,
            RiskTone::Adjust => Self::ADJUST,
            RiskTone::Toxic => Self::TOXIC,
            RiskTone::Unknown => Self::TEXT_SECONDARY,
        }
    }

    /// Card title style for a risk tone
    pub fn tone_style(tone: RiskTone) -> Style {
        Style::default()
            .fg(Self::tone_color(tone))
            .add_modifier(Modifier::BOLD)
    }
}

/// Indicator icons
pub struct Icons;

impl Icons {
    pub const COMPLETE: &'static str = "✓";
    pub const ACTIVE: &'static str = "●";
    pub const PENDING: &'static str = "○";
    pub const ERROR: &'static str = "✗";
    pub const ARROW: &'static str = "→";
    pub const DOT: &'static str = "•";
}
