//! Layout components (sidebar, status bar)

use super::components::{Button, ButtonState, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SAVE_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar with boxed buttons, one per view
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(View::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, view) in View::ALL.iter().enumerate() {
        let key = match view {
            View::Aliases => "Esc",
            View::Profile => "p",
        };
        let label = format!("{key} {}", view.label());
        let state = ButtonState::new(app.state.current_view == *view, true);
        frame.render_widget(Button::new(&label, state), chunks[idx + 1]);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.mailbox_address()),
        Style::default().fg(Color::Blue),
    )];

    // Namespace indicator on the alias table
    if app.state.current_view == View::Aliases {
        if let Some(namespace) = app.current_namespace() {
            spans.push(Span::styled(
                format!("[{namespace}] "),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

/// Get keyboard hints for whatever currently has focus
fn get_view_hints(app: &App) -> String {
    if app.list_actions.pending_delete().is_some() {
        return "↑↓:select  Enter:choose  y:delete  n/Esc:cancel".to_string();
    }
    if app.list_actions.is_editing() {
        return format!("Tab:next  Space:toggle  {SAVE_SHORTCUT}:save  Esc:close");
    }
    match app.state.current_view {
        View::Aliases => {
            "j/k:nav  Space:toggle  n:new  e:edit  d:delete  [/]:namespace  p:profile  q:quit"
                .to_string()
        }
        View::Profile if app.profile_form.is_avatar_active() => {
            format!("u:upload  x:remove  Tab:next  {SAVE_SHORTCUT}:save  Esc:back")
        }
        View::Profile => {
            format!("Tab:next  {SAVE_SHORTCUT}:save  {RESET_SHORTCUT}:reset  Esc:back")
        }
    }
}
