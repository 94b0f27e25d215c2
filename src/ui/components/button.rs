//! Boxed button widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Focused,
    Idle,
    Disabled,
}

impl ButtonState {
    pub fn new(focused: bool, enabled: bool) -> Self {
        match (enabled, focused) {
            (false, _) => ButtonState::Disabled,
            (true, true) => ButtonState::Focused,
            (true, false) => ButtonState::Idle,
        }
    }

    fn border(self) -> Style {
        match self {
            ButtonState::Focused => Style::default().fg(Color::Cyan),
            ButtonState::Idle | ButtonState::Disabled => Style::default().fg(Color::DarkGray),
        }
    }

    fn text(self) -> Style {
        match self {
            ButtonState::Focused => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            ButtonState::Idle => Style::default(),
            ButtonState::Disabled => Style::default().fg(Color::DarkGray),
        }
    }
}

pub struct Button<'a> {
    label: &'a str,
    state: ButtonState,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, state: ButtonState) -> Self {
        Self { label, state }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(format!(" {} ", self.label))
            .style(self.state.text())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.state.border()),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_disabled_wins_over_focus() {
        assert_eq!(ButtonState::new(true, false), ButtonState::Disabled);
        assert_eq!(ButtonState::new(true, true), ButtonState::Focused);
        assert_eq!(ButtonState::new(false, true), ButtonState::Idle);
    }

    #[test]
    fn test_label_is_centered_in_box() {
        let area = Rect::new(0, 0, 12, BUTTON_HEIGHT);
        let mut buf = Buffer::empty(area);
        Button::new("Save", ButtonState::Idle).render(area, &mut buf);
        let middle: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert_eq!(middle.trim_matches('│').trim(), "Save");
    }
}
