use draftcompare_core::{Caliber, FilterKey, Metric, Mode};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Status line: mode, caliber, metric, color filter, selection size
pub struct HudWidget {
    pub mode: Mode,
    pub caliber: Caliber,
    pub metric: Metric,
    pub filter: FilterKey,
    pub selected: usize,
    pub frozen: bool,
}

impl HudWidget {
    pub fn new(mode: Mode, caliber: Caliber, metric: Metric, filter: FilterKey) -> Self {
        Self {
            mode,
            caliber,
            metric,
            filter,
            selected: 0,
            frozen: false,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }
}

fn field<'a>(label: &'a str, value: String, value_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Theme::MUTED_TEXT)),
        Span::styled(value, value_style),
    ])
}

impl Widget for HudWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let chunks = Layout::horizontal([
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(area);

        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let mode = match (self.frozen, self.mode) {
            (true, _) => "FROZEN".to_string(),
            (false, Mode::Query) => "Search".to_string(),
            (false, Mode::Compare) => "Compare".to_string(),
        };
        let mode_color = if self.frozen { Theme::WARNING } else { Theme::GOLD };
        buf.set_line(chunks[0].x, chunks[0].y, &field("Mode: ", mode, bold(mode_color)), chunks[0].width);

        buf.set_line(
            chunks[1].x,
            chunks[1].y,
            &field("Pool: ", self.caliber.to_string(), bold(Theme::BRIGHT_TEXT)),
            chunks[1].width,
        );

        buf.set_line(
            chunks[2].x,
            chunks[2].y,
            &field("Metric: ", self.metric.to_string(), bold(Theme::Z_MARKER)),
            chunks[2].width,
        );

        let filter_style = if self.filter.is_resolved() {
            bold(Theme::BRIGHT_TEXT)
        } else {
            bold(Theme::WARNING)
        };
        buf.set_line(
            chunks[3].x,
            chunks[3].y,
            &field("Colors: ", self.filter.to_string(), filter_style),
            chunks[3].width,
        );

        buf.set_line(
            chunks[4].x,
            chunks[4].y,
            &field("Picked: ", self.selected.to_string(), bold(Theme::SELECTED)),
            chunks[4].width,
        );
    }
}
