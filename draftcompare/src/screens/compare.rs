use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftcompare_core::{ColorIdentity, CompareTable, FilterKey, Intent, Session};
use draftcompare_widgets::color_strip::ColorStripWidget;
use draftcompare_widgets::stats_table::StatsTableWidget;
use draftcompare_widgets::theme::Theme;

use crate::screens::Screen;

/// Color strip above the statistics table for the snapshot
pub struct CompareScreen {
    strip_area: Rect,
    table_area: Rect,
}

impl CompareScreen {
    pub fn new() -> Self {
        Self {
            strip_area: Rect::default(),
            table_area: Rect::default(),
        }
    }

    /// Where the table was last drawn, for effects
    pub fn table_area(&self) -> Rect {
        self.table_area
    }

    fn table<'a>(session: &'a Session) -> StatsTableWidget<'a> {
        StatsTableWidget::new(session.table().rows(), session.view.metric)
            .cursor(Some(session.row_cursor()))
    }
}

impl Screen for CompareScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session, hover: Option<(u16, u16)>) {
        let chunks = Layout::vertical([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Color strip
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Help
        ])
        .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Comparison",
                Style::default()
                    .fg(Theme::GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} cards", session.snapshot().len()),
                Style::default().fg(Theme::DIM_TEXT),
            ),
        ]));
        frame.render_widget(title, chunks[0]);

        self.strip_area = chunks[1];
        let strip_hover = hover.and_then(|(col, row)| ColorStripWidget::hit(self.strip_area, col, row));
        frame.render_widget(
            ColorStripWidget::new(session.view.filter).hovered(strip_hover),
            self.strip_area,
        );

        self.table_area = chunks[2];
        match session.table() {
            CompareTable::Unresolved => {
                let prompt = Paragraph::new(Span::styled(
                    FilterKey::Unresolved.to_string(),
                    Style::default().fg(Theme::WARNING),
                ))
                .alignment(Alignment::Center);
                frame.render_widget(prompt, self.table_area);
            }
            CompareTable::Rows(rows) if rows.is_empty() => {
                let empty = Paragraph::new(Span::styled(
                    "No data for these cards",
                    Style::default().fg(Theme::DIM_TEXT),
                ))
                .alignment(Alignment::Center);
                frame.render_widget(empty, self.table_area);
            }
            CompareTable::Rows(_) => {
                let table = Self::table(session);
                let hovered = hover.and_then(|(col, row)| table.hit(self.table_area, col, row));
                frame.render_widget(table.hovered(hovered), self.table_area);
            }
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("W U B R G", Style::default().fg(Theme::GOLD)),
            Span::styled("] Colors  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("C", Style::default().fg(Theme::GOLD)),
            Span::styled("] Pool  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("M", Style::default().fg(Theme::GOLD)),
            Span::styled("] Metric  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("I", Style::default().fg(Theme::GOLD)),
            Span::styled("] Detail  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("Enter", Style::default().fg(Theme::GOLD)),
            Span::styled("] Back", Style::default().fg(Theme::DIM_TEXT)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match key.code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'c' => Some(Intent::ToggleCaliber),
                'm' => Some(Intent::ToggleMetric),
                'k' => Some(Intent::MoveUp),
                'j' => Some(Intent::MoveDown),
                'i' => Some(Intent::ShowHighlightedDetail),
                other => ColorIdentity::from_letter(other).map(Intent::ToggleColor),
            },
            KeyCode::Up => Some(Intent::MoveUp),
            KeyCode::Down => Some(Intent::MoveDown),
            KeyCode::Tab => Some(Intent::ShowHighlightedDetail),
            _ => None,
        }
    }

    fn handle_release(&mut self, column: u16, row: u16, session: &Session) -> Option<Intent> {
        if let Some(identity) = ColorStripWidget::hit(self.strip_area, column, row) {
            return Some(Intent::ToggleColor(identity));
        }
        let idx = Self::table(session).hit(self.table_area, column, row)?;
        session
            .table()
            .rows()
            .get(idx)
            .map(|r| Intent::ShowDetail(r.card.clone()))
    }
}
