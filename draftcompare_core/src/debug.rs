/// Lines shown in the debug corner
pub const DEBUG_CORNER_LINES: usize = 5;

/// Fixed-size block of diagnostic text lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugCorner {
    pub visible: bool,
    lines: Vec<String>,
}

impl DebugCorner {
    pub fn new(size: usize) -> Self {
        Self {
            visible: true,
            lines: vec![String::new(); size.max(1)],
        }
    }

    pub fn size(&self) -> usize {
        self.lines.len()
    }

    /// Set one line. An out-of-range index reports itself in slot 0 instead.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) {
        let size = self.lines.len();
        match self.lines.get_mut(index) {
            Some(line) => *line = text.into(),
            None => self.lines[0] = format!("{} \u{2190} index>{} not supported", index, size),
        }
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    /// Lines in slot order; slot 0 is drawn at the bottom
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Default for DebugCorner {
    fn default() -> Self {
        Self::new(DEBUG_CORNER_LINES)
    }
}
