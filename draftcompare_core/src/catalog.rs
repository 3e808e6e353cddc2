use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::stats::{Caliber, Grade, Metric, MetricStats, PairStats, StatBundle, StatRecord};

/// Field holding the average pick position
const ALSA_FIELD: &str = "ALSA";
/// Field holding the number of games the card was seen in hand
const SEEN_IN_HAND_FIELD: &str = "# GIH";

/// Immutable name -> record mapping, iterated in dataset order
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    entries: Vec<(String, StatRecord)>,
    index: HashMap<String, usize>,
}

impl CardCatalog {
    /// Read and parse a dataset file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        info!(path = %path.display(), cards = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a dataset held in memory
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let object = match value {
            Value::Object(object) => object,
            other => return Err(CatalogError::NotAnObject(json_kind(&other))),
        };

        let mut catalog = Self::default();
        for (name, raw) in object {
            let record = parse_record(&name, raw);
            catalog.insert(name, record);
        }
        Ok(catalog)
    }

    /// Build from records already in memory, keeping the given order
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, StatRecord)>,
    {
        let mut catalog = Self::default();
        for (name, record) in records {
            catalog.insert(name, record);
        }
        catalog
    }

    /// Later duplicates replace the record but keep the first position
    fn insert(&mut self, name: String, record: StatRecord) {
        if let Some(&idx) = self.index.get(&name) {
            warn!(card = %name, "Duplicate card name in dataset, keeping last record");
            self.entries[idx].1 = record;
            return;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, record));
    }

    pub fn get(&self, name: &str) -> Option<&StatRecord> {
        self.index.get(name).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Card names in dataset order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Outer shape of one card entry; the stat leaves are read leniently
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    png: Option<String>,
    #[serde(default)]
    stats: Option<Map<String, Value>>,
}

fn parse_record(name: &str, raw: Value) -> StatRecord {
    let raw: RawRecord = match serde_json::from_value(raw) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(card = %name, error = %e, "Malformed card record, card has no stats");
            return StatRecord::default();
        }
    };

    let mut record = StatRecord {
        png: raw.png,
        ..StatRecord::default()
    };

    let Some(stats) = raw.stats else {
        debug!(card = %name, "Card has no stats");
        return record;
    };

    for caliber in Caliber::ALL {
        let Some(pairs) = stats.get(caliber.key()).and_then(Value::as_object) else {
            continue;
        };
        for (key, leaf) in pairs {
            // null leaves mean no data for that slice
            let Some(leaf) = leaf.as_object() else {
                continue;
            };
            let bundle = parse_bundle(name, key, leaf);
            record.pairs_mut(caliber).push(PairStats {
                key: key.to_lowercase(),
                bundle,
            });
        }
    }

    record
}

fn parse_bundle(name: &str, pair: &str, leaf: &Map<String, Value>) -> StatBundle {
    let mut metrics = [None; 3];
    for metric in Metric::ALL {
        metrics[metric.index()] = parse_metric(name, pair, metric, leaf);
    }

    let number_seen_in_hand = leaf
        .get(SEEN_IN_HAND_FIELD)
        .and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
        })
        .unwrap_or(0);

    StatBundle {
        metrics,
        average_last_seen_at: number(leaf.get(ALSA_FIELD)),
        number_seen_in_hand,
    }
}

fn parse_metric(
    name: &str,
    pair: &str,
    metric: Metric,
    leaf: &Map<String, Value>,
) -> Option<MetricStats> {
    let prefix = metric.prefix();
    let win_rate = number(leaf.get(&format!("{} WR", prefix)))?;
    let z_score = number(leaf.get(&format!("{} zscore", prefix)))?;
    let grade_text = leaf.get(&format!("{} grade", prefix)).and_then(Value::as_str)?;

    match grade_text.parse::<Grade>() {
        Ok(grade) => Some(MetricStats {
            win_rate,
            grade,
            z_score,
        }),
        Err(e) => {
            warn!(card = %name, pair = %pair, metric = %metric, error = %e, "Skipping metric");
            None
        }
    }
}

/// Finite number from a JSON number or numeric string; "NaN" and null are absent
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
