//! Error dialog component

use super::base::{key_hints, Modal};
use ratatui::{
    style::{Color, Style},
    Frame,
};

/// Render the oldest queued error on top of everything else
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    Modal::new("Error", Color::Red)
        .text(message, Style::default())
        .blank()
        .line(key_hints(&[("Enter/Esc", "dismiss")]))
        .render(frame);
}
