use std::fmt;

/// One of the five color identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorIdentity {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl ColorIdentity {
    /// Canonical WUBRG order
    pub const ALL: [ColorIdentity; 5] = [
        ColorIdentity::White,
        ColorIdentity::Blue,
        ColorIdentity::Black,
        ColorIdentity::Red,
        ColorIdentity::Green,
    ];

    pub fn letter(&self) -> char {
        match self {
            ColorIdentity::White => 'W',
            ColorIdentity::Blue => 'U',
            ColorIdentity::Black => 'B',
            ColorIdentity::Red => 'R',
            ColorIdentity::Green => 'G',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'W' => Some(ColorIdentity::White),
            'U' => Some(ColorIdentity::Blue),
            'B' => Some(ColorIdentity::Black),
            'R' => Some(ColorIdentity::Red),
            'G' => Some(ColorIdentity::Green),
            _ => None,
        }
    }

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        match self {
            ColorIdentity::White => 0,
            ColorIdentity::Blue => 1,
            ColorIdentity::Black => 2,
            ColorIdentity::Red => 3,
            ColorIdentity::Green => 4,
        }
    }
}

impl fmt::Display for ColorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Two distinct identities, always stored in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair(ColorIdentity, ColorIdentity);

impl ColorPair {
    pub fn new(a: ColorIdentity, b: ColorIdentity) -> Option<Self> {
        if a == b {
            return None;
        }
        if a.index() < b.index() {
            Some(Self(a, b))
        } else {
            Some(Self(b, a))
        }
    }

    /// Lowercase dataset key, e.g. "wu"
    pub fn key(&self) -> String {
        format!("{}{}", self.0.letter(), self.1.letter()).to_lowercase()
    }
}

/// Result of resolving the five toggles into a stats lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// No identity active
    All,
    /// Exactly two identities active
    Pair(ColorPair),
    /// 1, 3, 4 or 5 identities active; no lookup may be made
    Unresolved,
}

impl FilterKey {
    /// Dataset key for this filter, `None` when unresolved
    pub fn key(&self) -> Option<String> {
        match self {
            FilterKey::All => Some("all".to_string()),
            FilterKey::Pair(pair) => Some(pair.key()),
            FilterKey::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, FilterKey::Unresolved)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKey::All => write!(f, "all"),
            FilterKey::Pair(pair) => write!(f, "{}", pair.key()),
            FilterKey::Unresolved => write!(f, "select 0 or 2 colors"),
        }
    }
}

/// Five independent on/off toggles, one per color identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorFilter {
    flags: [bool; 5],
}

impl ColorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, identity: ColorIdentity) {
        let flag = &mut self.flags[identity.index()];
        *flag = !*flag;
    }

    pub fn is_active(&self, identity: ColorIdentity) -> bool {
        self.flags[identity.index()]
    }

    /// Active identities in canonical order
    pub fn active(&self) -> Vec<ColorIdentity> {
        ColorIdentity::ALL
            .iter()
            .copied()
            .filter(|c| self.is_active(*c))
            .collect()
    }

    /// Concatenated letters of the active identities, canonical order
    pub fn currently_selected(&self) -> String {
        self.active().iter().map(|c| c.letter()).collect()
    }

    pub fn resolved_key(&self) -> FilterKey {
        match self.active().as_slice() {
            [] => FilterKey::All,
            [a, b] => ColorPair::new(*a, *b)
                .map(FilterKey::Pair)
                .unwrap_or(FilterKey::Unresolved),
            _ => FilterKey::Unresolved,
        }
    }

    pub fn clear(&mut self) {
        self.flags = [false; 5];
    }
}
