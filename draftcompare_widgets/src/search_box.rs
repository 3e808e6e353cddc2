use draftcompare_core::MAX_QUERY_LENGTH;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Horizontal padding inside the box
const PADDING: u16 = 1;

/// Single-line query box sized for the longest allowed query plus a cursor
pub struct SearchBoxWidget<'a> {
    pub query: &'a str,
    pub cursor_visible: bool,
    pub active: bool,
}

impl<'a> SearchBoxWidget<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            cursor_visible: true,
            active: true,
        }
    }

    pub fn cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Width of the box in cells
    pub fn width() -> u16 {
        MAX_QUERY_LENGTH as u16 + 1 + PADDING * 2
    }
}

impl<'a> Widget for SearchBoxWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        let box_area = Rect::new(area.x, area.y, Self::width().min(area.width), 1);
        buf.set_style(box_area, Style::default().bg(Theme::INPUT_BG));

        let text_style = if self.active {
            Style::default().fg(Theme::BRIGHT_TEXT)
        } else {
            Style::default().fg(Theme::DIM_TEXT)
        };
        let mut spans = vec![Span::styled(self.query, text_style)];
        if self.active && self.cursor_visible {
            spans.push(Span::styled(
                "|",
                Style::default()
                    .fg(Theme::CURSOR)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let inner_width = box_area.width.saturating_sub(PADDING * 2);
        buf.set_line(box_area.x + PADDING, box_area.y, &Line::from(spans), inner_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn test_renders_query_and_cursor() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        SearchBoxWidget::new("opt").render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with(" opt|"));
    }

    #[test]
    fn test_cursor_hidden() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        SearchBoxWidget::new("opt")
            .cursor_visible(false)
            .render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with(" opt "));
    }

    #[test]
    fn test_inactive_box_dims_text_and_drops_cursor() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        SearchBoxWidget::new("opt").active(false).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with(" opt "));
        assert_eq!(buf.cell((1, 0)).unwrap().fg, Theme::DIM_TEXT);
    }
}
