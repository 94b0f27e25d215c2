//! Profile form view

use super::components::{Button, ButtonState, BUTTON_HEIGHT};
use super::forms::{draw_field, draw_field_with_value, draw_help_text};
use crate::app::App;
use crate::state::{Form, AVATAR, DISPLAY_NAME};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let profile = &app.profile_form;
    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),             // Display name
            Constraint::Length(3),             // Photo
            Constraint::Length(1),             // Spacer
            Constraint::Length(BUTTON_HEIGHT), // Cancel / Save
            Constraint::Length(1),             // Help
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &profile.form;
    if let Some(field) = profile.fields().iter().find(|f| f.name == DISPLAY_NAME) {
        let value = form.value(DISPLAY_NAME).cloned().unwrap_or_default();
        draw_field(
            frame,
            chunks[0],
            field,
            &value,
            form.error(DISPLAY_NAME),
            !profile.is_avatar_active(),
        );
    }

    let mut photo = match profile.avatar() {
        Some(data) => format!("image set ({} bytes encoded)", data.len()),
        None => "no photo".to_string(),
    };
    if form.is_manual(AVATAR) {
        photo.push_str(" (unsaved)");
    }
    draw_field_with_value(
        frame,
        chunks[1],
        "Photo",
        &photo,
        form.error(AVATAR),
        false,
        profile.is_avatar_active(),
    );

    // Cancel and Save only do something once the form changed
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(chunks[3]);
    let enabled = profile.can_save();
    frame.render_widget(
        Button::new("Cancel", ButtonState::new(false, enabled)),
        buttons[0],
    );
    frame.render_widget(
        Button::new("Save", ButtonState::new(true, enabled)),
        buttons[1],
    );

    let help = if !profile.is_avatar_active() {
        "Letters, numbers, spaces and . - / only."
    } else if profile.has_avatar() {
        "Upload a new photo with u or remove it with x."
    } else {
        "Upload a photo with u."
    };
    draw_help_text(frame, chunks[4], help);
}
