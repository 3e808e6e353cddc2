use std::rc::Rc;

use draftcompare_core::{z_score_position, Metric, StatRow};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Comparison table: one line per row plus a header.
///
/// Columns: name, win rate, grade, z-score bar, z-score, ALSA, games in hand.
pub struct StatsTableWidget<'a> {
    pub rows: &'a [StatRow],
    pub metric: Metric,
    pub cursor: Option<usize>,
    pub hovered: Option<usize>,
}

impl<'a> StatsTableWidget<'a> {
    pub fn new(rows: &'a [StatRow], metric: Metric) -> Self {
        Self {
            rows,
            metric,
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

    fn columns(line: Rect) -> Rc<[Rect]> {
        Layout::horizontal([
            Constraint::Min(14),
            Constraint::Length(7),
            Constraint::Length(4),
            Constraint::Min(13),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(7),
        ])
        .spacing(1)
        .split(line)
    }

    fn scroll_offset(&self, body_height: u16) -> usize {
        let height = body_height as usize;
        match self.cursor {
            Some(c) if height > 0 && c >= height => c + 1 - height,
            _ => 0,
        }
    }

    /// Rect of a data row (below the header), `None` when not visible
    pub fn row_rect(&self, area: Rect, index: usize) -> Option<Rect> {
        if index >= self.rows.len() || area.height < 2 {
            return None;
        }
        let body_height = area.height - 1;
        let row = index.checked_sub(self.scroll_offset(body_height))?;
        if row >= body_height as usize {
            return None;
        }
        Some(Rect::new(area.x, area.y + 1 + row as u16, area.width, 1))
    }

    /// Row index under a terminal position
    pub fn hit(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        (0..self.rows.len()).find(|&i| {
            self.row_rect(area, i)
                .is_some_and(|r| r.contains((column, row).into()))
        })
    }

    fn render_header(&self, line: Rect, buf: &mut Buffer) {
        let cols = Self::columns(line);
        let style = Style::default()
            .fg(Theme::MUTED_TEXT)
            .add_modifier(Modifier::BOLD);
        let headers = [
            "Card".to_string(),
            format!("{} WR", self.metric),
            "Gr".to_string(),
            "-3  z-score  +3".to_string(),
            "z".to_string(),
            "ALSA".to_string(),
            "# GIH".to_string(),
        ];
        for (col, text) in cols.iter().zip(headers.iter()) {
            buf.set_stringn(col.x, col.y, text, col.width as usize, style);
        }
    }
}

impl<'a> Widget for StatsTableWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }
        self.render_header(Rect::new(area.x, area.y, area.width, 1), buf);

        for (i, row) in self.rows.iter().enumerate() {
            let Some(line) = self.row_rect(area, i) else {
                continue;
            };

            let is_cursor = self.cursor == Some(i);
            if is_cursor || self.hovered == Some(i) {
                buf.set_style(line, Style::default().bg(Theme::ROW_HOVER_BG));
            }

            let grade_color = Theme::grade_color(row.grade);
            let cols = Self::columns(line);

            let mut label_style = Style::default().fg(if row.is_pair_breakdown() {
                Theme::MUTED_TEXT
            } else {
                Theme::BRIGHT_TEXT
            });
            if is_cursor {
                label_style = label_style.fg(Theme::CURSOR).add_modifier(Modifier::BOLD);
            }
            buf.set_stringn(cols[0].x, cols[0].y, &row.label, cols[0].width as usize, label_style);

            let wr = Line::from(Span::styled(
                row.win_rate_text(),
                Style::default().fg(grade_color),
            ))
            .right_aligned();
            wr.render(cols[1], buf);

            buf.set_stringn(
                cols[2].x,
                cols[2].y,
                row.grade.label(),
                cols[2].width as usize,
                Style::default().fg(grade_color).add_modifier(Modifier::BOLD),
            );

            render_z_bar(row.z_score, cols[3], buf);

            Line::from(Span::styled(
                format!("{:+.2}", row.z_score),
                Style::default().fg(Theme::MUTED_TEXT),
            ))
            .right_aligned()
            .render(cols[4], buf);

            Line::from(Span::styled(row.alsa_text(), Style::default().fg(Theme::MUTED_TEXT)))
                .right_aligned()
                .render(cols[5], buf);

            Line::from(Span::styled(
                row.number_seen_in_hand.to_string(),
                Style::default().fg(Theme::DIM_TEXT),
            ))
            .right_aligned()
            .render(cols[6], buf);
        }
    }
}

/// Column of the z-score marker inside a bar of `width` cells
pub fn z_marker_offset(z_score: f64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    z_score_position(z_score, 0.0, (width - 1) as f64).round() as u16
}

/// Horizontal axis from -3 to +3 with a marker at the clamped z-score
fn render_z_bar(z_score: f64, area: Rect, buf: &mut Buffer) {
    if area.width < 3 {
        return;
    }
    let axis = Style::default().fg(Theme::Z_AXIS);
    for dx in 0..area.width {
        buf.set_string(area.x + dx, area.y, "\u{2500}", axis);
    }
    buf.set_string(area.x + (area.width - 1) / 2, area.y, "\u{253c}", axis);

    let marker = z_marker_offset(z_score, area.width);
    buf.set_string(
        area.x + marker,
        area.y,
        "\u{25cf}",
        Style::default().fg(Theme::Z_MARKER).add_modifier(Modifier::BOLD),
    );
}
