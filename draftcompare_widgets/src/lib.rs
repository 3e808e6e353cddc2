pub mod color_strip;
pub mod debug_corner;
pub mod detail;
pub mod hud;
pub mod popup;
pub mod result_list;
pub mod search_box;
pub mod stats_table;
pub mod theme;

pub use theme::Theme;
