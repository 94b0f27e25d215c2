//! Alias create/edit modal

use super::components::centered_rect;
use super::forms::{draw_field, draw_help_text};
use crate::platform::SAVE_SHORTCUT;
use crate::state::{AliasEditForm, Form};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear},
    Frame,
};

pub fn draw(frame: &mut Frame, form: &AliasEditForm) {
    let heights: Vec<u16> = form
        .fields()
        .iter()
        .map(|field| if field.is_multiline() { 5 } else { 3 })
        .collect();
    let height = heights.iter().sum::<u16>() + 1 + 2; // help + borders
    let area = centered_rect(frame.area(), 64, height);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", form.title()),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> =
        heights.iter().map(|h| Constraint::Length(*h)).collect();
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let state = form.state();
    for (idx, field) in form.fields().iter().enumerate() {
        let value = state.value(&field.name).cloned().unwrap_or_default();
        draw_field(
            frame,
            chunks[idx],
            field,
            &value,
            state.error(&field.name),
            idx == form.active_field(),
        );
    }

    let verb = if form.is_create() { "create" } else { "save" };
    draw_help_text(
        frame,
        chunks[form.field_count()],
        &format!("{SAVE_SHORTCUT}:{verb}  Esc:discard"),
    );
}
