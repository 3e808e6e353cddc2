use tracing::{debug, info};

use crate::catalog::CardCatalog;
use crate::color::{ColorFilter, ColorIdentity, FilterKey};
use crate::debug::DebugCorner;
use crate::projector::{self, StatRow};
use crate::query::{self, Query};
use crate::selection::SelectionSet;
use crate::stats::{Caliber, Metric};

/// Which half of the tool is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Search box active, selection being built
    #[default]
    Query,
    /// Read-only statistics table for the snapshot
    Compare,
}

/// Mode plus the parameters of the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub mode: Mode,
    pub caliber: Caliber,
    pub metric: Metric,
    pub filter: ColorFilter,
}

impl ViewState {
    pub fn filter_key(&self) -> FilterKey {
        self.filter.resolved_key()
    }
}

/// Everything input resolution can ask the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AppendChar(char),
    DeleteLast,
    DeleteAll,
    MoveUp,
    MoveDown,
    /// Toggle the highlighted search result
    SelectHighlighted,
    Select(String),
    ToggleColor(ColorIdentity),
    /// Flip between Query and Compare, snapshotting the selection on the way in
    RunComparison,
    /// Back to an empty Query mode
    Clear,
    ToggleCaliber,
    ToggleMetric,
    ShowDetail(String),
    /// Detail for the highlighted table row
    ShowHighlightedDetail,
    DismissDetail,
    ToggleDebug,
    Freeze,
}

/// Comparison table as the renderer should show it
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CompareTable {
    Rows(Vec<StatRow>),
    /// Filter has 1, 3, 4 or 5 colors: prompt instead of a table
    #[default]
    Unresolved,
}

impl CompareTable {
    pub fn rows(&self) -> &[StatRow] {
        match self {
            CompareTable::Rows(rows) => rows,
            CompareTable::Unresolved => &[],
        }
    }
}

/// One interactive session over a loaded catalog
pub struct Session<'c> {
    catalog: &'c CardCatalog,
    pub view: ViewState,
    pub debug: DebugCorner,

    query: Query,
    results: Vec<&'c str>,
    result_cursor: usize,

    selection: SelectionSet,
    /// Cards shown in Compare mode, fixed at the last RunComparison
    snapshot: Vec<String>,
    table: CompareTable,
    row_cursor: usize,

    detail: Option<String>,
    frozen: bool,

    results_dirty: bool,
    table_dirty: bool,
}

impl<'c> Session<'c> {
    pub fn new(catalog: &'c CardCatalog) -> Self {
        Self::with_view(catalog, ViewState::default())
    }

    pub fn with_view(catalog: &'c CardCatalog, view: ViewState) -> Self {
        let mut session = Self {
            catalog,
            view,
            debug: DebugCorner::default(),
            query: Query::new(),
            results: Vec::new(),
            result_cursor: 0,
            selection: SelectionSet::new(),
            snapshot: Vec::new(),
            table: CompareTable::default(),
            row_cursor: 0,
            detail: None,
            frozen: false,
            results_dirty: true,
            table_dirty: true,
        };
        session.refresh();
        session
    }

    /// Apply a batch of intents in order, then recompute derived state
    pub fn dispatch(&mut self, intents: impl IntoIterator<Item = Intent>) {
        for intent in intents {
            self.apply(intent);
        }
        self.refresh();
    }

    /// Mutate state for one intent. Derived state waits for `refresh`.
    pub fn apply(&mut self, intent: Intent) {
        if self.frozen {
            return;
        }
        debug!(?intent, mode = ?self.view.mode, "Applying intent");

        // cursors index into derived state, which must be current
        if matches!(
            intent,
            Intent::MoveUp | Intent::MoveDown | Intent::SelectHighlighted | Intent::ShowHighlightedDetail
        ) {
            self.refresh();
        }

        // a removed pick only returns to its old slot if re-picked straight away
        if !matches!(
            intent,
            Intent::Select(_) | Intent::SelectHighlighted | Intent::MoveUp | Intent::MoveDown
        ) {
            self.selection.settle();
        }

        match intent {
            Intent::AppendChar(ch) => {
                if self.view.mode == Mode::Query && self.query.push(ch) {
                    self.results_dirty = true;
                }
            }
            Intent::DeleteLast => {
                if self.view.mode == Mode::Query && self.query.pop().is_some() {
                    self.results_dirty = true;
                }
            }
            Intent::DeleteAll => {
                if self.view.mode == Mode::Query {
                    self.query.clear();
                    self.results_dirty = true;
                }
            }
            Intent::MoveUp => match self.view.mode {
                Mode::Query => self.result_cursor = self.result_cursor.saturating_sub(1),
                Mode::Compare => self.row_cursor = self.row_cursor.saturating_sub(1),
            },
            Intent::MoveDown => match self.view.mode {
                Mode::Query => {
                    if self.result_cursor + 1 < self.results.len() {
                        self.result_cursor += 1;
                    }
                }
                Mode::Compare => {
                    if self.row_cursor + 1 < self.table.rows().len() {
                        self.row_cursor += 1;
                    }
                }
            },
            Intent::SelectHighlighted => {
                if self.view.mode == Mode::Query {
                    if let Some(name) = self.results.get(self.result_cursor).copied() {
                        self.selection.toggle(name);
                    }
                }
            }
            Intent::Select(name) => {
                if self.view.mode == Mode::Query && self.catalog.contains(&name) {
                    self.selection.toggle(&name);
                }
            }
            Intent::ToggleColor(identity) => {
                self.view.filter.toggle(identity);
                self.table_dirty = true;
            }
            Intent::RunComparison => match self.view.mode {
                Mode::Query => {
                    self.snapshot = self.selection.names().to_vec();
                    self.view.mode = Mode::Compare;
                    self.row_cursor = 0;
                    self.table_dirty = true;
                    info!(cards = self.snapshot.len(), "Comparison started");
                }
                Mode::Compare => {
                    self.view.mode = Mode::Query;
                    self.detail = None;
                    info!("Back to query mode");
                }
            },
            Intent::Clear => {
                self.query.clear();
                self.selection.clear();
                self.snapshot.clear();
                self.view.mode = Mode::Query;
                self.detail = None;
                self.row_cursor = 0;
                self.results_dirty = true;
                self.table_dirty = true;
                info!("Session cleared");
            }
            Intent::ToggleCaliber => {
                if self.view.mode == Mode::Compare {
                    self.view.caliber = self.view.caliber.toggled();
                    self.table_dirty = true;
                }
            }
            Intent::ToggleMetric => {
                if self.view.mode == Mode::Compare {
                    self.view.metric = self.view.metric.next();
                    self.table_dirty = true;
                }
            }
            Intent::ShowDetail(name) => self.show_detail(&name),
            Intent::ShowHighlightedDetail => {
                if self.view.mode == Mode::Compare {
                    if let Some(row) = self.table.rows().get(self.row_cursor) {
                        let card = row.card.clone();
                        self.show_detail(&card);
                    }
                }
            }
            Intent::DismissDetail => self.detail = None,
            Intent::ToggleDebug => self.debug.toggle_visible(),
            Intent::Freeze => {
                self.frozen = true;
                info!("Session frozen");
            }
        }
    }

    fn show_detail(&mut self, name: &str) {
        match self.catalog.get(name) {
            Some(record) if record.has_image() => self.detail = Some(name.to_string()),
            _ => {
                debug!(card = %name, "No image for card, detail suppressed");
                self.detail = None;
            }
        }
    }

    /// A new pointer press. Returns true when it only dismissed the detail overlay.
    pub fn pointer_pressed(&mut self) -> bool {
        if self.frozen {
            return true;
        }
        self.detail.take().is_some()
    }

    /// Recompute search results and the comparison table if their inputs changed
    pub fn refresh(&mut self) {
        if self.results_dirty {
            self.results = if self.query.is_empty() {
                Vec::new()
            } else {
                query::search(self.catalog, self.query.as_str())
            };
            self.result_cursor = 0;
            self.results_dirty = false;
        }

        if self.table_dirty {
            self.table = match self.view.filter_key().key() {
                Some(pair_key) => CompareTable::Rows(projector::project(
                    self.catalog,
                    &self.snapshot,
                    self.view.caliber,
                    &pair_key,
                    self.view.metric,
                )),
                None => CompareTable::Unresolved,
            };
            let rows = self.table.rows().len();
            self.row_cursor = self.row_cursor.min(rows.saturating_sub(1));
            self.table_dirty = false;
        }
    }

    pub fn catalog(&self) -> &'c CardCatalog {
        self.catalog
    }

    pub fn mode(&self) -> Mode {
        self.view.mode
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Ranked matches for the current query; empty for an empty query
    pub fn results(&self) -> &[&'c str] {
        &self.results
    }

    pub fn result_cursor(&self) -> usize {
        self.result_cursor
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn snapshot(&self) -> &[String] {
        &self.snapshot
    }

    pub fn table(&self) -> &CompareTable {
        &self.table
    }

    pub fn row_cursor(&self) -> usize {
        self.row_cursor
    }

    /// Card whose detail overlay is showing
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Grade, MetricStats, PairStats, StatBundle, StatRecord};

    fn record(png: Option<&str>, pairs: &[(&str, f64)]) -> StatRecord {
        let slices: Vec<PairStats> = pairs
            .iter()
            .map(|(key, z)| PairStats {
                key: key.to_string(),
                bundle: StatBundle {
                    metrics: [
                        Some(MetricStats {
                            win_rate: 0.5,
                            grade: Grade::C,
                            z_score: -z,
                        }),
                        Some(MetricStats {
                            win_rate: 0.6,
                            grade: Grade::A,
                            z_score: *z,
                        }),
                        None,
                    ],
                    average_last_seen_at: Some(5.0),
                    number_seen_in_hand: 10,
                },
            })
            .collect();
        StatRecord {
            png: png.map(str::to_string),
            all: slices.clone(),
            top: slices.into_iter().filter(|p| p.key == "all").collect(),
        }
    }

    fn catalog() -> CardCatalog {
        CardCatalog::from_records(vec![
            ("Opt".to_string(), record(Some("opt.png"), &[("ur", 0.5), ("all", 1.2)])),
            ("Brainstorm".to_string(), record(None, &[("all", 0.3), ("ub", 0.9)])),
            ("Shock".to_string(), record(Some("shock.png"), &[("all", 2.0)])),
        ])
    }

    fn typed(text: &str) -> Vec<Intent> {
        text.chars().map(Intent::AppendChar).collect()
    }

    fn labels(session: &Session) -> Vec<String> {
        session.table().rows().iter().map(|r| r.label.clone()).collect()
    }

    #[test]
    fn test_defaults() {
        let catalog = catalog();
        let session = Session::new(&catalog);
        assert_eq!(session.mode(), Mode::Query);
        assert_eq!(session.view.caliber, Caliber::All);
        assert_eq!(session.view.metric, Metric::GIH);
        assert_eq!(session.view.filter_key(), FilterKey::All);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_typing_updates_results_same_tick() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch(typed("o"));
        assert_eq!(session.results(), &["Opt", "Shock", "Brainstorm"]);

        session.dispatch([Intent::DeleteLast]);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_delete_all() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch(typed("sho"));
        session.dispatch([Intent::DeleteAll]);
        assert!(session.query().is_empty());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_cursor_moves_within_results() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch(typed("o"));
        session.dispatch([Intent::MoveDown, Intent::MoveDown, Intent::MoveDown]);
        assert_eq!(session.result_cursor(), 2);
        session.dispatch([Intent::MoveUp, Intent::SelectHighlighted]);
        assert_eq!(session.selection().names(), &["Shock"]);

        // new results reset the cursor
        session.dispatch(typed("p"));
        assert_eq!(session.result_cursor(), 0);
    }

    #[test]
    fn test_run_comparison_snapshots_selection() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([
            Intent::Select("Opt".to_string()),
            Intent::Select("Shock".to_string()),
            Intent::RunComparison,
        ]);
        assert_eq!(session.mode(), Mode::Compare);
        assert_eq!(labels(&session), vec!["Shock", "Opt"]);

        // flip back, change selection; snapshot stays until next run
        session.dispatch([Intent::RunComparison, Intent::Select("Brainstorm".to_string())]);
        assert_eq!(session.mode(), Mode::Query);
        assert_eq!(session.snapshot(), &["Opt", "Shock"]);

        session.dispatch([Intent::RunComparison]);
        assert_eq!(labels(&session), vec!["Shock", "Opt", "Brainstorm"]);
    }

    #[test]
    fn test_reselect_after_other_intents_appends() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([
            Intent::Select("Opt".to_string()),
            Intent::Select("Shock".to_string()),
            Intent::Select("Opt".to_string()),
            Intent::RunComparison,
            Intent::RunComparison,
        ]);
        session.dispatch(typed("o"));
        session.dispatch([Intent::Select("Opt".to_string())]);
        assert_eq!(session.selection().names(), &["Shock", "Opt"]);

        // straight re-pick still restores the old slot
        session.dispatch([
            Intent::Select("Brainstorm".to_string()),
            Intent::Select("Shock".to_string()),
            Intent::Select("Shock".to_string()),
        ]);
        assert_eq!(session.selection().names(), &["Shock", "Opt", "Brainstorm"]);
    }

    #[test]
    fn test_single_card_comparison_drills_down() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::Select("Opt".to_string()), Intent::RunComparison]);
        assert_eq!(labels(&session), vec!["Opt", "UR"]);
    }

    #[test]
    fn test_caliber_and_metric_only_in_compare() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::ToggleCaliber, Intent::ToggleMetric]);
        assert_eq!(session.view.caliber, Caliber::All);
        assert_eq!(session.view.metric, Metric::GIH);

        session.dispatch([
            Intent::Select("Opt".to_string()),
            Intent::Select("Brainstorm".to_string()),
            Intent::RunComparison,
            Intent::ToggleMetric,
        ]);
        assert_eq!(session.view.metric, Metric::GD);
        // nobody has GD
        assert!(session.table().rows().is_empty());

        session.dispatch([Intent::ToggleMetric, Intent::ToggleMetric, Intent::ToggleCaliber]);
        assert_eq!(session.view.metric, Metric::GIH);
        assert_eq!(session.view.caliber, Caliber::Top);
        assert_eq!(session.mode(), Mode::Compare);
        assert_eq!(labels(&session), vec!["Opt", "Brainstorm"]);
    }

    #[test]
    fn test_unresolved_filter_skips_projection() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([
            Intent::Select("Opt".to_string()),
            Intent::Select("Brainstorm".to_string()),
            Intent::RunComparison,
            Intent::ToggleColor(ColorIdentity::Blue),
        ]);
        assert_eq!(session.table(), &CompareTable::Unresolved);

        session.dispatch([Intent::ToggleColor(ColorIdentity::Red)]);
        assert_eq!(session.view.filter.currently_selected(), "UR");
        // only Opt has a "ur" slice, so it drills down
        assert_eq!(labels(&session), vec!["Opt", "UR"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch(typed("opt"));
        session.dispatch([Intent::SelectHighlighted, Intent::RunComparison, Intent::Clear]);
        assert_eq!(session.mode(), Mode::Query);
        assert!(session.query().is_empty());
        assert!(session.selection().is_empty());
        assert!(session.snapshot().is_empty());
        assert!(session.results().is_empty());
        assert!(session.table().rows().is_empty());
    }

    #[test]
    fn test_typing_ignored_in_compare_mode() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::RunComparison]);
        session.dispatch(typed("opt"));
        assert!(session.query().is_empty());
    }

    #[test]
    fn test_detail_requires_image() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::ShowDetail("Opt".to_string())]);
        assert_eq!(session.detail(), Some("Opt"));

        session.dispatch([Intent::ShowDetail("Brainstorm".to_string())]);
        assert_eq!(session.detail(), None);
    }

    #[test]
    fn test_pointer_press_dismisses_detail_first() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        assert!(!session.pointer_pressed());

        session.dispatch([Intent::ShowDetail("Shock".to_string())]);
        assert!(session.pointer_pressed());
        assert_eq!(session.detail(), None);
        assert!(!session.pointer_pressed());
    }

    #[test]
    fn test_highlighted_row_detail() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([
            Intent::Select("Opt".to_string()),
            Intent::Select("Shock".to_string()),
            Intent::RunComparison,
            Intent::MoveDown,
            Intent::ShowHighlightedDetail,
        ]);
        assert_eq!(session.row_cursor(), 1);
        assert_eq!(session.detail(), Some("Opt"));
    }

    #[test]
    fn test_freeze_stops_input() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::Freeze]);
        session.dispatch(typed("opt"));
        assert!(session.is_frozen());
        assert!(session.query().is_empty());
    }

    #[test]
    fn test_toggle_debug() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session.dispatch([Intent::ToggleDebug]);
        assert!(!session.debug.visible);
    }
}
