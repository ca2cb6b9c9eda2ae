//! Color themes for the terminal user interface.
//!
//! Two palettes, toggled at runtime with 't'. Column accents stay the same
//! across themes so a column keeps its identity in either mode.

use ratatui::style::Color;

use crate::fields::Status;

/// Accent for the To Do column.
pub const STEEL_BLUE: Color = Color::Rgb(70, 130, 180);
/// Accent for the In Progress column.
pub const AMBER: Color = Color::Rgb(255, 191, 0);
/// Accent for the Done column.
pub const SEA_GREEN: Color = Color::Rgb(46, 139, 87);

/// Highlight for a dropzone under an active drag.
pub const DROP_HIGHLIGHT: Color = Color::Rgb(120, 90, 170);

/// Per-column accent color.
pub fn column_accent(status: Status) -> Color {
    match status {
        Status::Todo => STEEL_BLUE,
        Status::InProgress => AMBER,
        Status::Done => SEA_GREEN,
    }
}

/// Runtime-switchable palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn text(self) -> Color {
        match self {
            Theme::Dark => Color::White,
            Theme::Light => Color::Black,
        }
    }

    pub fn dim_text(self) -> Color {
        match self {
            Theme::Dark => Color::Gray,
            Theme::Light => Color::DarkGray,
        }
    }

    pub fn card_bg(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(40, 40, 48),
            Theme::Light => Color::Rgb(230, 230, 235),
        }
    }

    pub fn selection_fg(self) -> Color {
        match self {
            Theme::Dark => Color::Black,
            Theme::Light => Color::White,
        }
    }
}
