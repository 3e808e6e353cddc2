use crate::catalog::CardCatalog;
use crate::stats::{Caliber, Grade, Metric, StatBundle};

/// Pair key of the aggregate slice
pub const AGGREGATE_PAIR: &str = "all";

/// Z-scores are clamped to this magnitude before being placed on a scale
pub const Z_SCORE_LIMIT: f64 = 3.0;

/// One render-ready line of the comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    /// Card name, or the uppercase pair code in a drill-down
    pub label: String,
    /// Card the row was built from
    pub card: String,
    /// Pair key of the slice the numbers come from
    pub pair: String,
    pub win_rate: f64,
    pub grade: Grade,
    /// Raw, unclamped
    pub z_score: f64,
    pub average_last_seen_at: Option<f64>,
    pub number_seen_in_hand: u64,
}

impl StatRow {
    fn from_bundle(
        label: String,
        card: &str,
        pair: &str,
        bundle: &StatBundle,
        metric: Metric,
    ) -> Option<Self> {
        let stats = bundle.metric(metric)?;
        Some(Self {
            label,
            card: card.to_string(),
            pair: pair.to_string(),
            win_rate: stats.win_rate,
            grade: stats.grade,
            z_score: stats.z_score,
            average_last_seen_at: bundle.average_last_seen_at,
            number_seen_in_hand: bundle.number_seen_in_hand,
        })
    }

    /// Position of the grade on the 14-step scale, 0 = S
    pub fn grade_index(&self) -> usize {
        self.grade.ordinal()
    }

    pub fn win_rate_text(&self) -> String {
        format_win_rate(self.win_rate)
    }

    pub fn alsa_text(&self) -> String {
        format_alsa(self.average_last_seen_at)
    }

    /// True for the per-pair rows of a drill-down
    pub fn is_pair_breakdown(&self) -> bool {
        self.label != self.card
    }
}

/// Build the comparison table for the chosen cards.
///
/// Cards without a bundle (or without the metric) at `(caliber, pair_key)` are
/// skipped. Rows are sorted by descending z-score. When only one card yields a
/// row, the table instead lists that card's every pair slice, in dataset order
/// with the last one moved to the front.
pub fn project(
    catalog: &CardCatalog,
    selected: &[String],
    caliber: Caliber,
    pair_key: &str,
    metric: Metric,
) -> Vec<StatRow> {
    let mut rows: Vec<StatRow> = selected
        .iter()
        .filter_map(|name| {
            let bundle = catalog.get(name)?.bundle(caliber, pair_key)?;
            StatRow::from_bundle(name.clone(), name, pair_key, bundle, metric)
        })
        .collect();

    if rows.len() == 1 {
        return drill_down(catalog, &rows[0].card, caliber, metric);
    }

    rows.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));
    rows
}

/// One row per pair slice of a single card
fn drill_down(catalog: &CardCatalog, card: &str, caliber: Caliber, metric: Metric) -> Vec<StatRow> {
    let Some(record) = catalog.get(card) else {
        return Vec::new();
    };

    let mut rows: Vec<StatRow> = record
        .pairs(caliber)
        .iter()
        .filter_map(|pair| {
            let aggregate = pair.key == AGGREGATE_PAIR;
            let label = if aggregate {
                card.to_string()
            } else {
                pair.key.to_uppercase()
            };
            let mut row = StatRow::from_bundle(label, card, &pair.key, &pair.bundle, metric)?;
            if !aggregate {
                row.average_last_seen_at = None;
            }
            Some(row)
        })
        .collect();

    if !rows.is_empty() {
        rows.rotate_right(1);
    }
    rows
}

/// Win rate as a percentage with one decimal: scale by 1000, round, put the
/// point after the first two digits. 0.642 -> "64.2%". Values that round to
/// 1000 or to fewer than three digits come out misplaced ("10.00%", "64.%").
pub fn format_win_rate(win_rate: f64) -> String {
    let digits = ((win_rate * 1000.0).round() as i64).to_string();
    let split = digits
        .char_indices()
        .nth(2)
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    format!("{}.{}%", &digits[..split], &digits[split..])
}

/// Average pick position with one decimal, empty when absent
pub fn format_alsa(alsa: Option<f64>) -> String {
    match alsa {
        Some(value) => {
            let tenths = (value * 10.0).round() as i64;
            format!("{}.{}", tenths / 10, (tenths % 10).abs())
        }
        None => String::new(),
    }
}

/// Clamp `z_score` to ±3 and map it linearly onto `[start, end]`
pub fn z_score_position(z_score: f64, start: f64, end: f64) -> f64 {
    let clamped = z_score.clamp(-Z_SCORE_LIMIT, Z_SCORE_LIMIT);
    let t = (clamped + Z_SCORE_LIMIT) / (2.0 * Z_SCORE_LIMIT);
    start + (end - start) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{MetricStats, PairStats, StatRecord};

    fn bundle(z: f64, alsa: Option<f64>) -> StatBundle {
        let stats = MetricStats {
            win_rate: 0.55 + z / 100.0,
            grade: Grade::B,
            z_score: z,
        };
        StatBundle {
            metrics: [None, Some(stats), None],
            average_last_seen_at: alsa,
            number_seen_in_hand: 100,
        }
    }

    fn record(pairs: &[(&str, f64)]) -> StatRecord {
        StatRecord {
            png: None,
            all: pairs
                .iter()
                .map(|(key, z)| PairStats {
                    key: key.to_string(),
                    bundle: bundle(*z, Some(3.0)),
                })
                .collect(),
            top: Vec::new(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn labels(rows: &[StatRow]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    fn sample_catalog() -> CardCatalog {
        CardCatalog::from_records(vec![
            ("Opt".to_string(), record(&[("ur", 0.5), ("wb", -0.3), ("all", 1.2)])),
            ("Shock".to_string(), record(&[("all", 2.0)])),
            ("Negate".to_string(), record(&[("ur", 0.1), ("all", -0.4)])),
            ("Island".to_string(), record(&[])),
        ])
    }

    #[test]
    fn test_sorted_by_descending_z() {
        let catalog = sample_catalog();
        let rows = project(
            &catalog,
            &names(&["Negate", "Opt", "Shock"]),
            Caliber::All,
            "all",
            Metric::GIH,
        );
        assert_eq!(labels(&rows), vec!["Shock", "Opt", "Negate"]);
    }

    #[test]
    fn test_missing_bundles_are_skipped() {
        let catalog = sample_catalog();
        let rows = project(
            &catalog,
            &names(&["Opt", "Negate", "Shock", "Island", "Unknown"]),
            Caliber::All,
            "ur",
            Metric::GIH,
        );
        assert_eq!(labels(&rows), vec!["Opt", "Negate"]);
        assert!(rows.iter().all(|r| r.pair == "ur"));
    }

    #[test]
    fn test_missing_caliber_or_metric_is_skipped() {
        let catalog = sample_catalog();
        let selected = names(&["Opt", "Shock"]);
        assert!(project(&catalog, &selected, Caliber::Top, "all", Metric::GIH).is_empty());
        assert!(project(&catalog, &selected, Caliber::All, "all", Metric::OH).is_empty());
    }

    #[test]
    fn test_single_card_drill_down() {
        let catalog = sample_catalog();
        let rows = project(&catalog, &names(&["Opt"]), Caliber::All, "all", Metric::GIH);

        assert_eq!(labels(&rows), vec!["Opt", "UR", "WB"]);
        assert_eq!(rows[0].z_score, 1.2);
        assert_eq!(rows[0].average_last_seen_at, Some(3.0));
        assert!(rows[1..].iter().all(|r| r.average_last_seen_at.is_none()));
        assert!(!rows[0].is_pair_breakdown());
        assert!(rows[1].is_pair_breakdown());
    }

    #[test]
    fn test_drill_down_moves_last_row_first_without_sorting() {
        let catalog = CardCatalog::from_records(vec![(
            "Opt".to_string(),
            record(&[("wu", -1.0), ("all", 0.0), ("ub", 2.0)]),
        )]);
        let rows = project(&catalog, &names(&["Opt"]), Caliber::All, "all", Metric::GIH);
        assert_eq!(labels(&rows), vec!["UB", "WU", "Opt"]);
    }

    #[test]
    fn test_drill_down_when_only_one_of_many_has_data() {
        let catalog = sample_catalog();
        let rows = project(
            &catalog,
            &names(&["Shock", "Island"]),
            Caliber::All,
            "all",
            Metric::GIH,
        );
        assert_eq!(labels(&rows), vec!["Shock"]);

        let rows = project(
            &catalog,
            &names(&["Island", "Negate"]),
            Caliber::All,
            "ur",
            Metric::GIH,
        );
        assert_eq!(labels(&rows), vec!["Negate", "UR"]);
    }

    #[test]
    fn test_nothing_selected() {
        let catalog = sample_catalog();
        assert!(project(&catalog, &[], Caliber::All, "all", Metric::GIH).is_empty());
    }

    #[test]
    fn test_format_win_rate() {
        assert_eq!(format_win_rate(0.642), "64.2%");
        assert_eq!(format_win_rate(0.5), "50.0%");
        assert_eq!(format_win_rate(0.5714), "57.1%");
        assert_eq!(format_win_rate(0.994), "99.4%");
    }

    #[test]
    fn test_format_win_rate_known_breakage() {
        // rounds to 1000
        assert_eq!(format_win_rate(0.9996), "10.00%");
        // only two digits survive scaling
        assert_eq!(format_win_rate(0.0642), "64.%");
    }

    #[test]
    fn test_format_alsa() {
        assert_eq!(format_alsa(Some(4.21)), "4.2");
        assert_eq!(format_alsa(Some(2.0)), "2.0");
        assert_eq!(format_alsa(Some(11.96)), "12.0");
        assert_eq!(format_alsa(None), "");
    }

    #[test]
    fn test_z_score_position_clamps() {
        assert_eq!(z_score_position(0.0, 0.0, 60.0), 30.0);
        assert_eq!(z_score_position(3.0, 0.0, 60.0), 60.0);
        assert_eq!(z_score_position(-7.5, 0.0, 60.0), 0.0);
        assert_eq!(z_score_position(12.0, 10.0, 20.0), 20.0);
        assert_eq!(z_score_position(1.5, 0.0, 40.0), 30.0);
    }

    #[test]
    fn test_grade_index_exposed() {
        let catalog = sample_catalog();
        let rows = project(&catalog, &names(&["Shock", "Opt"]), Caliber::All, "all", Metric::GIH);
        assert!(rows.iter().all(|r| r.grade_index() == Grade::B.ordinal()));
        assert_eq!(rows[0].win_rate_text(), "57.0%");
    }
}
