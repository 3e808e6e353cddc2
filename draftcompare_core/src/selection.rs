use std::collections::HashSet;

/// Ordered set of chosen card names with toggle semantics.
///
/// Re-toggling the name removed by the immediately preceding toggle puts it
/// back where it was, so two toggles in a row always restore the set. "In a
/// row" means no other toggle and no `settle` in between.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    names: Vec<String>,
    members: HashSet<String>,
    last_removed: Option<(String, usize)>,
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for SelectionSet {}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `name` if present, otherwise append it. Returns true if now selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        let restore_at = match self.last_removed.take() {
            Some((removed, pos)) if removed == name => Some(pos),
            _ => None,
        };

        if self.members.remove(name) {
            if let Some(pos) = self.names.iter().position(|n| n == name) {
                self.names.remove(pos);
                self.last_removed = Some((name.to_string(), pos));
            }
            false
        } else {
            self.members.insert(name.to_string());
            match restore_at {
                Some(pos) if pos <= self.names.len() => self.names.insert(pos, name.to_string()),
                _ => self.names.push(name.to_string()),
            }
            true
        }
    }

    /// Forget the last removal; the next toggle of that name appends it.
    pub fn settle(&mut self) {
        self.last_removed = None;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.members.clear();
        self.last_removed = None;
    }

    /// Names in the order they were selected
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
