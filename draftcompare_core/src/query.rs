use crate::catalog::CardCatalog;

/// Maximum characters allowed in the query
pub const MAX_QUERY_LENGTH: usize = 32;

/// Reserved for the debug-corner toggle, never typed into the query
pub const DEBUG_TOGGLE_CHAR: char = '`';

/// The search string the user edits by typing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= MAX_QUERY_LENGTH
    }

    /// Append a character. Returns false when ignored (full query or control char).
    pub fn push(&mut self, ch: char) -> bool {
        if self.is_full() || ch.is_control() || ch == DEBUG_TOGGLE_CHAR {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Names containing `query` case-insensitively, ranked by the character index
/// where the match starts.
///
/// Equal positions keep catalog order. An empty query matches every name at
/// index 0; callers that want nothing for an empty query check that themselves.
pub fn search<'c>(catalog: &'c CardCatalog, query: &str) -> Vec<&'c str> {
    let needle = query.to_lowercase();
    let mut matches: Vec<(usize, &str)> = catalog
        .names()
        .filter_map(|name| {
            let lower = name.to_lowercase();
            let byte_idx = lower.find(&needle)?;
            Some((lower[..byte_idx].chars().count(), name))
        })
        .collect();

    // sort_by_key is stable
    matches.sort_by_key(|(idx, _)| *idx);
    matches.into_iter().map(|(_, name)| name).collect()
}
