use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftcompare_core::{Intent, Session};
use draftcompare_widgets::result_list::ResultListWidget;
use draftcompare_widgets::search_box::SearchBoxWidget;
use draftcompare_widgets::theme::Theme;

use crate::screens::Screen;

/// Ticks between cursor blinks
const CURSOR_BLINK_TICKS: u64 = 50;

/// Search box, ranked matches and the current pick list
pub struct QueryScreen {
    pub tick: u64,
    results_area: Rect,
}

impl QueryScreen {
    pub fn new() -> Self {
        Self {
            tick: 0,
            results_area: Rect::default(),
        }
    }

    fn cursor_visible(&self) -> bool {
        (self.tick / CURSOR_BLINK_TICKS) % 2 == 0
    }

    fn result_list<'a>(session: &'a Session) -> ResultListWidget<'a> {
        ResultListWidget::new(session.results(), session.selection())
            .cursor(Some(session.result_cursor()))
    }
}

impl Screen for QueryScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session, hover: Option<(u16, u16)>) {
        let chunks = Layout::vertical([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Search box
            Constraint::Min(0),    // Results
            Constraint::Length(2), // Picks
            Constraint::Length(1), // Help
        ])
        .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Draft Compare",
                Style::default()
                    .fg(Theme::GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} cards loaded", session.catalog().len()),
                Style::default().fg(Theme::DIM_TEXT),
            ),
        ]));
        frame.render_widget(title, chunks[0]);

        let search = SearchBoxWidget::new(session.query().as_str())
            .cursor_visible(self.cursor_visible())
            .active(!session.is_frozen());
        frame.render_widget(search, chunks[1]);

        self.results_area = chunks[2];
        let list = Self::result_list(session);
        let hovered = hover.and_then(|(col, row)| list.hit(self.results_area, col, row));
        if session.query().is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Type part of a card name",
                    Style::default().fg(Theme::DIM_TEXT),
                )),
                chunks[2],
            );
        } else if session.results().is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No matches", Style::default().fg(Theme::DIM_TEXT))),
                chunks[2],
            );
        } else {
            frame.render_widget(list.hovered(hovered), chunks[2]);
        }

        let picks = session.selection().names().join(", ");
        let picks_line = Line::from(vec![
            Span::styled("Picks: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                if picks.is_empty() { "none".to_string() } else { picks },
                Style::default().fg(Theme::SELECTED),
            ),
        ]);
        frame.render_widget(Paragraph::new(picks_line), chunks[3]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("\u{2191}\u{2193}", Style::default().fg(Theme::GOLD)),
            Span::styled("] Move  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("Tab", Style::default().fg(Theme::GOLD)),
            Span::styled("] Pick  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("Enter", Style::default().fg(Theme::GOLD)),
            Span::styled("] Compare  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("Esc", Style::default().fg(Theme::GOLD)),
            Span::styled("] Clear  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("F2", Style::default().fg(Theme::GOLD)),
            Span::styled("] Freeze", Style::default().fg(Theme::DIM_TEXT)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[4]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        let chorded = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Backspace if chorded => Some(Intent::DeleteAll),
            KeyCode::Char('u') | KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Intent::DeleteAll)
            }
            KeyCode::Backspace => Some(Intent::DeleteLast),
            KeyCode::Up => Some(Intent::MoveUp),
            KeyCode::Down => Some(Intent::MoveDown),
            KeyCode::Tab => Some(Intent::SelectHighlighted),
            KeyCode::Char(c) if !chorded => Some(Intent::AppendChar(c)),
            _ => None,
        }
    }

    fn handle_release(&mut self, column: u16, row: u16, session: &Session) -> Option<Intent> {
        let list = Self::result_list(session);
        let idx = list.hit(self.results_area, column, row)?;
        session
            .results()
            .get(idx)
            .map(|name| Intent::Select(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftcompare_core::{CardCatalog, StatRecord};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_mapping() {
        let mut screen = QueryScreen::new();
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('O'), KeyModifiers::SHIFT)),
            Some(Intent::AppendChar('O'))
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Intent::DeleteLast)
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Backspace, KeyModifiers::ALT)),
            Some(Intent::DeleteAll)
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Intent::DeleteAll)
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Intent::SelectHighlighted)
        );
        assert_eq!(screen.handle_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_release_selects_result_row() {
        let catalog = CardCatalog::from_records(vec![
            ("Opt".to_string(), StatRecord::default()),
            ("Shock".to_string(), StatRecord::default()),
        ]);
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::AppendChar('o')]);

        let mut screen = QueryScreen::new();
        screen.results_area = Rect::new(0, 4, 30, 10);
        assert_eq!(
            screen.handle_release(2, 5, &session),
            Some(Intent::Select("Shock".to_string()))
        );
        assert_eq!(screen.handle_release(2, 9, &session), None);
    }

    #[test]
    fn test_frozen_session_draws_inactive_search_box() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let catalog = CardCatalog::from_records(vec![("Opt".to_string(), StatRecord::default())]);
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::AppendChar('o'), Intent::Freeze]);

        let mut screen = QueryScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                screen.render(frame, area, &session, None);
            })
            .unwrap();

        let buf = terminal.backend().buffer();
        let search_row: String = (0..60)
            .map(|x| buf.cell((x, 2)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        assert!(search_row.starts_with(" o "));
        assert_eq!(buf.cell((1, 2)).unwrap().fg, Theme::DIM_TEXT);
    }

    #[test]
    fn test_cursor_blinks() {
        let mut screen = QueryScreen::new();
        assert!(screen.cursor_visible());
        screen.tick = CURSOR_BLINK_TICKS;
        assert!(!screen.cursor_visible());
        screen.tick = CURSOR_BLINK_TICKS * 2;
        assert!(screen.cursor_visible());
    }
}
