//! Centered modal box shared by the dialogs

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Columns of padding on each side of the body
const PADDING: u16 = 2;

/// A `width` x `height` rect centered in `area`, clipped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Cyan key names separated by gray descriptions
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::DarkGray);
    let spans = hints
        .iter()
        .enumerate()
        .flat_map(|(idx, (k, desc))| {
            let sep = if idx == 0 { "" } else { "  " };
            [
                Span::styled(format!("{sep}{k}"), key),
                Span::styled(format!(" {desc}"), text),
            ]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// Modal box sized to its content.
///
/// Lines are stacked under a bold title; the box grows to fit them, up to
/// `width` columns.
pub struct Modal<'a> {
    title: &'a str,
    accent: Color,
    width: u16,
    lines: Vec<Line<'a>>,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str, accent: Color) -> Self {
        Self {
            title,
            accent,
            width: 60,
            lines: Vec::new(),
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Add text, word-wrapped to the modal's inner width
    pub fn text(mut self, text: &str, style: Style) -> Self {
        let inner = self.inner_width() as usize;
        self.lines.extend(
            wrap_text(text, inner)
                .into_iter()
                .map(|line| Line::styled(line, style)),
        );
        self
    }

    /// Add a prebuilt line as is
    pub fn line(mut self, line: Line<'a>) -> Self {
        self.lines.push(line);
        self
    }

    pub fn blank(self) -> Self {
        self.line(Line::default())
    }

    fn inner_width(&self) -> u16 {
        self.width.saturating_sub(2 + 2 * PADDING)
    }

    pub fn render(self, frame: &mut Frame) {
        let widest = self
            .lines
            .iter()
            .map(Line::width)
            .chain([self.title.chars().count()])
            .max()
            .unwrap_or(0) as u16;
        let width = (widest + 2 + 2 * PADDING).min(self.width);
        let height = (self.lines.len() as u16 + 2 + 2).max(5);
        let area = centered_rect(frame.area(), width, height);

        let mut content = vec![
            Line::styled(
                self.title,
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        content.extend(self.lines);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .padding(ratatui::widgets::Padding::horizontal(PADDING));
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(content)
                .block(block)
                .style(Style::default().bg(Color::Black).fg(Color::White)),
            area,
        );
    }
}

/// Greedy word wrap on character counts; explicit newlines are kept
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.split('\n')
        .flat_map(|paragraph| {
            let mut lines = vec![String::new()];
            for word in paragraph.split_whitespace() {
                let current = lines.last_mut().map_or(0, |l| l.chars().count());
                if current > 0 && current + 1 + word.chars().count() > width {
                    lines.push(String::new());
                }
                if let Some(line) = lines.last_mut() {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(word);
                }
            }
            lines
        })
        .collect()
}
