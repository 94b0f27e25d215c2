//! UI module for rendering the TUI

mod alias_modal;
mod aliases;
mod components;
mod forms;
mod layout;
mod profile;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (sidebar_area, main_area) = layout::create_layout(frame.area());

    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Aliases => aliases::draw(frame, main_area, app),
        View::Profile => profile::draw(frame, main_area, app),
    }

    // Overlays; only one of the modal list actions can be open
    if let Some(form) = &app.alias_form {
        alias_modal::draw(frame, form);
    }
    if let Some(pending) = app.list_actions.pending_delete() {
        render_confirm_dialog(frame, pending);
    }

    layout::draw_status_bar(frame, app);

    // Errors go on top of everything
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    }
}
