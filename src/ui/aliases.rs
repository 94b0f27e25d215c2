//! Alias table view

use crate::app::App;
use crate::state::AliasViewRow;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const CREATED_FORMAT: &str = "%b %d, %Y";

/// Draw the alias table of the current namespace
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let namespaces = app.namespaces();
    let title = match app.current_namespace() {
        Some(ns) => format!(
            " Aliases - {ns} ({}/{}) ",
            app.state.namespace_index + 1,
            namespaces.len()
        ),
        None => " Aliases ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let rows = app.rows();
    if rows.is_empty() {
        let message = if namespaces.is_empty() {
            "No namespaces in this mailbox."
        } else {
            "No aliases yet.\nPress 'n' to create one."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let header = Row::new(["Created", "Alias", "Forward Addresses", "Active"])
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let table = Table::new(
        rows.iter().map(table_row),
        [
            Constraint::Length(14),
            Constraint::Percentage(40),
            Constraint::Min(20),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.state.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn table_row(row: &AliasViewRow) -> Row<'static> {
    let active = if row.is_active() {
        Span::styled("[x]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ ]", Style::default().fg(Color::DarkGray))
    };
    let address = Line::from(vec![
        Span::raw(format!("{}#", row.ns)),
        Span::styled(row.alias.clone(), Style::default().fg(Color::Magenta)),
        Span::raw(format!("@{}", row.domain)),
    ]);

    Row::new(vec![
        Cell::from(row.created_date.format(CREATED_FORMAT).to_string()),
        Cell::from(address),
        Cell::from(row.fwd_addresses.join(", ")),
        Cell::from(active),
    ])
}
