use draftcompare_core::SelectionSet;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Ranked search matches, one per row. Selected names carry a check mark.
pub struct ResultListWidget<'a> {
    pub results: &'a [&'a str],
    pub selection: &'a SelectionSet,
    pub cursor: Option<usize>,
    pub hovered: Option<usize>,
}

impl<'a> ResultListWidget<'a> {
    pub fn new(results: &'a [&'a str], selection: &'a SelectionSet) -> Self {
        Self {
            results,
            selection,
            cursor: None,
            hovered: None,
        }
    }

    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn hovered(mut self, hovered: Option<usize>) -> Self {
        self.hovered = hovered;
        self
    }

    /// First result shown so that the cursor stays on screen
    fn scroll_offset(&self, height: u16) -> usize {
        let height = height as usize;
        match self.cursor {
            Some(c) if height > 0 && c >= height => c + 1 - height,
            _ => 0,
        }
    }

    /// Rect of a result row, `None` when scrolled out of view
    pub fn row_rect(&self, area: Rect, index: usize) -> Option<Rect> {
        if index >= self.results.len() {
            return None;
        }
        let offset = self.scroll_offset(area.height);
        let row = index.checked_sub(offset)?;
        if row >= area.height as usize {
            return None;
        }
        Some(Rect::new(area.x, area.y + row as u16, area.width, 1))
    }

    /// Result index under a terminal position
    pub fn hit(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        (0..self.results.len()).find(|&i| {
            self.row_rect(area, i)
                .is_some_and(|r| r.contains((column, row).into()))
        })
    }
}

impl<'a> Widget for ResultListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, name) in self.results.iter().enumerate() {
            let Some(rect) = self.row_rect(area, i) else {
                continue;
            };

            let is_cursor = self.cursor == Some(i);
            let is_selected = self.selection.contains(name);

            if is_cursor || self.hovered == Some(i) {
                buf.set_style(rect, Style::default().bg(Theme::ROW_HOVER_BG));
            }

            let marker = if is_selected {
                Span::styled("\u{2713} ", Style::default().fg(Theme::SELECTED))
            } else {
                Span::raw("  ")
            };
            let name_style = match (is_cursor, is_selected) {
                (true, _) => Style::default()
                    .fg(Theme::CURSOR)
                    .add_modifier(Modifier::BOLD),
                (false, true) => Style::default().fg(Theme::SELECTED),
                (false, false) => Style::default().fg(Theme::MUTED_TEXT),
            };
            let line = Line::from(vec![marker, Span::styled(*name, name_style)]);
            buf.set_line(rect.x, rect.y, &line, rect.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_rects_scroll_with_cursor() {
        let results = ["A", "B", "C", "D", "E"];
        let selection = SelectionSet::new();
        let area = Rect::new(2, 3, 20, 3);

        let list = ResultListWidget::new(&results, &selection).cursor(Some(0));
        assert_eq!(list.row_rect(area, 0), Some(Rect::new(2, 3, 20, 1)));
        assert_eq!(list.row_rect(area, 3), None);

        let list = ResultListWidget::new(&results, &selection).cursor(Some(4));
        assert_eq!(list.row_rect(area, 1), None);
        assert_eq!(list.row_rect(area, 2), Some(Rect::new(2, 3, 20, 1)));
        assert_eq!(list.row_rect(area, 4), Some(Rect::new(2, 5, 20, 1)));
    }

    #[test]
    fn test_hit() {
        let results = ["Opt", "Shock"];
        let selection = SelectionSet::new();
        let area = Rect::new(0, 1, 10, 5);
        let list = ResultListWidget::new(&results, &selection);
        assert_eq!(list.hit(area, 3, 2), Some(1));
        assert_eq!(list.hit(area, 3, 4), None);
        assert_eq!(list.hit(area, 11, 1), None);
    }

    #[test]
    fn test_selected_marker() {
        let results = ["Opt", "Shock"];
        let mut selection = SelectionSet::new();
        selection.toggle("Shock");
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        ResultListWidget::new(&results, &selection).render(area, &mut buf);
        assert_eq!(buf.cell((0, 1)).map(|c| c.symbol()), Some("\u{2713}"));
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some(" "));
        assert_eq!(buf.cell((2, 0)).map(|c| c.symbol()), Some("O"));
    }
}
