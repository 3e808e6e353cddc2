use draftcompare_core::DebugCorner;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::theme::Theme;

const LEFT_MARGIN: u16 = 1;

/// Debug lines anchored to the bottom of the area, slot 0 lowest
pub struct DebugCornerWidget<'a> {
    pub corner: &'a DebugCorner,
}

impl<'a> DebugCornerWidget<'a> {
    pub fn new(corner: &'a DebugCorner) -> Self {
        Self { corner }
    }

    /// Rows needed to draw every line
    pub fn height(&self) -> u16 {
        self.corner.size() as u16
    }
}

impl<'a> Widget for DebugCornerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.corner.visible || area.height == 0 {
            return;
        }

        let height = self.height().min(area.height);
        let block = Rect::new(area.x, area.bottom() - height, area.width, height);
        buf.set_style(block, Style::default().bg(Theme::PANEL_BG));

        let text_style = Style::default().fg(Theme::BRIGHT_TEXT);
        for (i, msg) in self.corner.lines().iter().enumerate().take(height as usize) {
            let y = area.bottom() - 1 - i as u16;
            buf.set_stringn(
                area.x + LEFT_MARGIN,
                y,
                msg,
                area.width.saturating_sub(LEFT_MARGIN) as usize,
                text_style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_zero_at_bottom() {
        let mut corner = DebugCorner::new(3);
        corner.set_text(0, "fps: 30");
        corner.set_text(2, "tick: 9");
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        DebugCornerWidget::new(&corner).render(area, &mut buf);

        assert_eq!(buf.cell((1, 5)).map(|c| c.symbol()), Some("f"));
        assert_eq!(buf.cell((1, 3)).map(|c| c.symbol()), Some("t"));
        assert_eq!(buf.cell((0, 2)).unwrap().bg, ratatui::style::Color::Reset);
    }

    #[test]
    fn test_hidden_draws_nothing() {
        let mut corner = DebugCorner::new(2);
        corner.set_text(0, "x");
        corner.toggle_visible();
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        DebugCornerWidget::new(&corner).render(area, &mut buf);
        assert_eq!(buf.cell((1, 1)).map(|c| c.symbol()), Some(" "));
    }
}
