pub mod compare;
pub mod query;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use draftcompare_core::{Intent, Session};

/// Trait for the two session views
pub trait Screen {
    /// Draw into `area`. `hover` is the pointer position, `None` while hovering is suppressed.
    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session, hover: Option<(u16, u16)>);

    /// Mode-specific keys
    fn handle_key(&mut self, key: KeyEvent) -> Option<Intent>;

    /// Resolve a pointer release against the rects of the last render
    fn handle_release(&mut self, column: u16, row: u16, session: &Session) -> Option<Intent>;
}
