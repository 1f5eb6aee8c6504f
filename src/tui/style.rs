//! Color constants for the TUI.

use ratatui::style::Color;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Notice text in the footer.
pub const NOTICE_FG: Color = Color::Yellow;
/// Border of the focused selector.
pub const FOCUS_BORDER: Color = Color::Cyan;
/// Highlighted list row.
pub const HIGHLIGHT_BG: Color = Color::Blue;
/// Progress gauge fill.
pub const PROGRESS_COLOR: Color = Color::Cyan;
/// Headline KPI values.
pub const METRIC_FG: Color = Color::Green;
/// An artifact present on disk.
pub const READY: Color = Color::Green;
/// An artifact absent from disk.
pub const MISSING: Color = Color::Red;

/// Status word and color for an artifact.
pub fn artifact_status(present: bool) -> (&'static str, Color) {
    if present {
        ("Ready", READY)
    } else {
        ("Missing", MISSING)
    }
}
