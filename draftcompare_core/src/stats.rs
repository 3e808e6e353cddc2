use std::fmt;
use std::str::FromStr;

/// Player population the statistics were sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Caliber {
    #[default]
    All,
    Top,
}

impl Caliber {
    pub const ALL: [Caliber; 2] = [Caliber::All, Caliber::Top];

    /// Key used in the dataset
    pub fn key(&self) -> &'static str {
        match self {
            Caliber::All => "all",
            Caliber::Top => "top",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Caliber::All => Caliber::Top,
            Caliber::Top => Caliber::All,
        }
    }
}

impl fmt::Display for Caliber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caliber::All => write!(f, "All players"),
            Caliber::Top => write!(f, "Top players"),
        }
    }
}

impl FromStr for Caliber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Caliber::All),
            "top" => Ok(Caliber::Top),
            other => Err(format!("unknown caliber '{}', expected all or top", other)),
        }
    }
}

/// Which win-rate statistic is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Opening hand
    OH,
    /// Games in hand
    #[default]
    GIH,
    /// Games drawn
    GD,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::OH, Metric::GIH, Metric::GD];

    /// Field prefix in the dataset, e.g. "GIH" in "GIH WR"
    pub fn prefix(&self) -> &'static str {
        match self {
            Metric::OH => "OH",
            Metric::GIH => "GIH",
            Metric::GD => "GD",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Metric::OH => 0,
            Metric::GIH => 1,
            Metric::GD => 2,
        }
    }

    /// Cycles OH -> GIH -> GD -> OH
    pub fn next(&self) -> Self {
        match self {
            Metric::OH => Metric::GIH,
            Metric::GIH => Metric::GD,
            Metric::GD => Metric::OH,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OH" => Ok(Metric::OH),
            "GIH" => Ok(Metric::GIH),
            "GD" => Ok(Metric::GD),
            other => Err(format!("unknown metric '{}', expected oh, gih or gd", other)),
        }
    }
}

/// 14-step letter grade, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    S,
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
}

impl Grade {
    pub const ALL: [Grade; 14] = [
        Grade::S,
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::DMinus,
        Grade::F,
    ];

    /// Position on the scale, 0 for S through 13 for F
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Grade::ALL
            .iter()
            .copied()
            .find(|g| g.label() == s)
            .ok_or_else(|| format!("unknown grade '{}'", s))
    }
}

/// Win rate, grade and z-score for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub win_rate: f64,
    pub grade: Grade,
    pub z_score: f64,
}

/// Everything known about a card for one (caliber, color pair) slice
#[derive(Debug, Clone, PartialEq)]
pub struct StatBundle {
    /// Indexed by `Metric::index`; `None` when the slice lacks that metric
    pub metrics: [Option<MetricStats>; 3],
    pub average_last_seen_at: Option<f64>,
    pub number_seen_in_hand: u64,
}

impl StatBundle {
    pub fn metric(&self, metric: Metric) -> Option<&MetricStats> {
        self.metrics[metric.index()].as_ref()
    }
}

/// A bundle under its color-pair key, in dataset order
#[derive(Debug, Clone, PartialEq)]
pub struct PairStats {
    pub key: String,
    pub bundle: StatBundle,
}

/// Per-card record: image reference plus stats for both calibers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatRecord {
    pub png: Option<String>,
    pub all: Vec<PairStats>,
    pub top: Vec<PairStats>,
}

impl StatRecord {
    /// All pair slices for a caliber, in dataset order
    pub fn pairs(&self, caliber: Caliber) -> &[PairStats] {
        match caliber {
            Caliber::All => &self.all,
            Caliber::Top => &self.top,
        }
    }

    pub fn pairs_mut(&mut self, caliber: Caliber) -> &mut Vec<PairStats> {
        match caliber {
            Caliber::All => &mut self.all,
            Caliber::Top => &mut self.top,
        }
    }

    pub fn bundle(&self, caliber: Caliber, pair_key: &str) -> Option<&StatBundle> {
        self.pairs(caliber)
            .iter()
            .find(|p| p.key == pair_key)
            .map(|p| &p.bundle)
    }

    /// True when the record carries a usable image reference
    pub fn has_image(&self) -> bool {
        self.png.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}
