//! Confirmation dialog for alias deletion

use super::base::{key_hints, Modal};
use crate::state::PendingDeleteAction;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Dialog options in display order: (is delete, label, color when highlighted)
const OPTIONS: [(bool, &str, Color); 2] = [
    (false, "Cancel", Color::White),
    (true, "Yes, Delete", Color::Red),
];

/// Render the delete confirmation for the pending row
pub fn render_confirm_dialog(frame: &mut Frame, action: &PendingDeleteAction) {
    let row = &action.row;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let target = Line::from(vec![
        Span::raw("Deleting "),
        Span::styled(format!("{}#", row.ns), bold),
        Span::styled(row.alias.clone(), bold.fg(Color::Magenta)),
        Span::styled(format!("@{}", row.domain), bold),
    ]);

    let mut modal = Modal::new("Hmmmm, Bye Bye!", Color::Red)
        .width(56)
        .line(target)
        .text(
            "will remove it from your list of aliases. You can recreate it later \
             by adding an alias again.",
            Style::default(),
        )
        .blank()
        .text(
            "To block mail coming in through this alias, deactivate it instead.",
            Style::default().fg(Color::DarkGray),
        )
        .blank();

    for (is_delete, label, color) in OPTIONS {
        let line = if action.delete_selected == is_delete {
            Line::styled(format!("▸ {label}"), bold.fg(color))
        } else {
            Line::styled(format!("  {label}"), Style::default().fg(Color::DarkGray))
        };
        modal = modal.line(line);
    }

    modal
        .blank()
        .line(key_hints(&[
            ("↑↓", "select"),
            ("Enter", "choose"),
            ("y", "delete"),
            ("n/Esc", "cancel"),
        ]))
        .render(frame);
}
