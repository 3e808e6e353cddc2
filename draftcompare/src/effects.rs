use ratatui::layout::Rect;
use ratatui::style::Color;
use tachyonfx::fx;
use tachyonfx::{Effect, EffectManager, Interpolation, Motion};

/// Our keyed effect manager using tachyonfx's built-in EffectManager
pub type FxManager = EffectManager<&'static str>;

const DARK: Color = Color::Rgb(13, 17, 23);
const DIM: Color = Color::Rgb(100, 100, 120);

/// Mode switch: content sweeps in from the left
pub fn screen_transition() -> Effect {
    fx::sweep_in(
        Motion::LeftToRight,
        8,
        2,
        DARK,
        (300, Interpolation::CubicOut),
    )
}

/// Detail overlay materializes inside its own rect
pub fn detail_reveal(area: Rect) -> Effect {
    fx::coalesce((350, Interpolation::CubicOut)).with_area(area)
}

/// Table refresh after a caliber, metric or color change
pub fn table_refresh(area: Rect) -> Effect {
    fx::sweep_in(Motion::UpToDown, 4, 1, DARK, (200, Interpolation::QuadOut)).with_area(area)
}

/// Whole screen fades to grey when input is frozen
pub fn freeze_fade() -> Effect {
    fx::fade_to_fg(DIM, (600, Interpolation::QuadIn))
}
