use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Widget};

use crate::theme::Theme;

/// A centered popup overlay with left-aligned styled lines
pub struct PopupWidget<'a> {
    pub title: String,
    pub lines: Vec<Line<'a>>,
    pub width_percent: u16,
    pub height_percent: u16,
}

impl<'a> PopupWidget<'a> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            width_percent: 60,
            height_percent: 40,
        }
    }

    pub fn line(mut self, line: impl Into<Line<'a>>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = Line<'a>>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn size(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.width_percent = width_percent;
        self.height_percent = height_percent;
        self
    }
}

impl<'a> Widget for PopupWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(self.width_percent, self.height_percent, area);

        Clear.render(popup_area, buf);

        let title_line = Line::from(Span::styled(
            format!(" {} ", self.title),
            Style::default()
                .fg(Theme::GOLD)
                .add_modifier(Modifier::BOLD),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Theme::CURSOR))
            .style(Style::default().bg(Theme::PANEL_BG))
            .title(title_line)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        for (i, line) in self.lines.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }
            buf.set_line(inner.x, y, line, inner.width);
        }
    }
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x.min(100) / 100;
    let height = area.height * percent_y.min(100) / 100;
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        assert_eq!(centered_rect(60, 40, area), Rect::new(20, 15, 60, 20));
        assert_eq!(centered_rect(150, 100, area), area);
    }

    #[test]
    fn test_lines_inside_border() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        PopupWidget::new("Detail")
            .line("hello")
            .size(100, 100)
            .render(area, &mut buf);
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some("\u{2554}"));
        assert_eq!(buf.cell((2, 1)).map(|c| c.symbol()), Some("h"));
    }
}
