//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::scoring::StressLevel;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Gauge and bar colors
    pub bar_empty: Color,

    // Slider colors
    pub slider_filled: Color,
    pub slider_selected: Color,
    pub slider_label: Color,

    // Styles
    pub header_style: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            bar_empty: Color::DarkGray,
            slider_filled: Color::Cyan,
            slider_selected: Color::Yellow,
            slider_label: Color::Gray,
            header_style: Style::new().bold(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Color for a stress level, taken from the level's display color
    pub fn level_color(&self, level: StressLevel) -> Color {
        let (r, g, b) = level.rgb();
        Color::Rgb(r, g, b)
    }

    pub fn score_color(&self, score: u8) -> Color {
        self.level_color(StressLevel::from_score(score))
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}
