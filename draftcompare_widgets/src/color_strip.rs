use draftcompare_core::{ColorFilter, ColorIdentity};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Width of one toggle, e.g. "( W )"
pub const TOGGLE_WIDTH: u16 = 5;
const GAP: u16 = 1;

/// Five round toggles in WUBRG order
pub struct ColorStripWidget {
    pub filter: ColorFilter,
    pub hovered: Option<ColorIdentity>,
}

impl ColorStripWidget {
    pub fn new(filter: ColorFilter) -> Self {
        Self {
            filter,
            hovered: None,
        }
    }

    pub fn hovered(mut self, hovered: Option<ColorIdentity>) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn total_width() -> u16 {
        let n = ColorIdentity::ALL.len() as u16;
        n * TOGGLE_WIDTH + (n - 1) * GAP
    }

    pub fn toggle_rect(area: Rect, identity: ColorIdentity) -> Rect {
        let x = area.x + identity.index() as u16 * (TOGGLE_WIDTH + GAP);
        Rect::new(x, area.y, TOGGLE_WIDTH, 1).intersection(area)
    }

    /// Identity under a terminal position
    pub fn hit(area: Rect, column: u16, row: u16) -> Option<ColorIdentity> {
        ColorIdentity::ALL
            .iter()
            .copied()
            .find(|c| Self::toggle_rect(area, *c).contains((column, row).into()))
    }
}

impl Widget for ColorStripWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        for identity in ColorIdentity::ALL {
            let rect = Self::toggle_rect(area, identity);
            if rect.width < TOGGLE_WIDTH {
                continue;
            }

            let active = self.filter.is_active(identity);
            let style = if active {
                Style::default()
                    .bg(Theme::identity_color(identity))
                    .fg(Theme::BG)
                    .add_modifier(Modifier::BOLD)
            } else if self.hovered == Some(identity) {
                Style::default().bg(Theme::ROW_HOVER_BG).fg(Theme::BRIGHT_TEXT)
            } else {
                Style::default().bg(Theme::PANEL_BG).fg(Theme::DIM_TEXT)
            };

            let label = format!("( {} )", identity.letter());
            buf.set_string(rect.x, rect.y, &label, style);
        }
    }
}
