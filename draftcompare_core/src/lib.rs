pub mod catalog;
pub mod color;
pub mod debug;
pub mod error;
pub mod projector;
pub mod query;
pub mod selection;
pub mod session;
pub mod stats;

pub use catalog::CardCatalog;
pub use color::{ColorFilter, ColorIdentity, ColorPair, FilterKey};
pub use debug::DebugCorner;
pub use error::CatalogError;
pub use projector::{format_alsa, format_win_rate, project, z_score_position, StatRow};
pub use query::{search, Query, MAX_QUERY_LENGTH};
pub use selection::SelectionSet;
pub use session::{CompareTable, Intent, Mode, Session, ViewState};
pub use stats::{Caliber, Grade, Metric, MetricStats, PairStats, StatBundle, StatRecord};
