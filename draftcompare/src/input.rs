use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// One input event as the frame loop consumes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Left button went down at (column, row)
    Press(u16, u16),
    /// Left button came up at (column, row)
    Release(u16, u16),
    /// Pointer moved to (column, row)
    Hover(u16, u16),
}

impl InputEvent {
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(InputEvent::Press(mouse.column, mouse.row))
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    Some(InputEvent::Release(mouse.column, mouse.row))
                }
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    Some(InputEvent::Hover(mouse.column, mouse.row))
                }
                _ => None,
            },
            _ => None,
        }
    }
}

/// Events gathered since the last tick, in arrival order.
///
/// Holds any number of key presses but at most one pointer release; later
/// releases in the same tick are dropped.
#[derive(Debug, Default)]
pub struct InputBatch {
    events: Vec<InputEvent>,
    has_release: bool,
}

impl InputBatch {
    pub fn push(&mut self, event: Event) {
        let Some(event) = InputEvent::from_terminal(event) else {
            return;
        };
        if let InputEvent::Release(..) = event {
            if self.has_release {
                return;
            }
            self.has_release = true;
        }
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl IntoIterator for InputBatch {
    type Item = InputEvent;
    type IntoIter = std::vec::IntoIter<InputEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
