use draftcompare_core::{ColorIdentity, Grade};
use ratatui::style::Color;

/// Dark draft-table color theme for the TUI
pub struct Theme;

impl Theme {
    // Backgrounds
    pub const BG: Color = Color::Rgb(13, 17, 23);
    pub const PANEL_BG: Color = Color::Rgb(30, 30, 38);
    pub const INPUT_BG: Color = Color::Rgb(51, 51, 51);
    pub const ROW_HOVER_BG: Color = Color::Rgb(40, 44, 58);

    // Borders and highlights
    pub const BORDER: Color = Color::Rgb(108, 117, 125);
    pub const CURSOR: Color = Color::Rgb(255, 214, 10);
    pub const SELECTED: Color = Color::Rgb(6, 214, 160);

    // Text
    pub const GOLD: Color = Color::Rgb(255, 183, 3);
    pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
    pub const BRIGHT_TEXT: Color = Color::Rgb(255, 255, 255);
    pub const MUTED_TEXT: Color = Color::Rgb(160, 160, 180);
    pub const WARNING: Color = Color::Rgb(230, 57, 70);

    // Z-score bar
    pub const Z_AXIS: Color = Color::Rgb(70, 70, 90);
    pub const Z_MARKER: Color = Color::Rgb(76, 201, 240);

    /// Grade gradient stops from S to F
    pub const GRADE_GRADIENT: [Color; 4] = [
        Color::Rgb(80, 220, 120),
        Color::Rgb(200, 220, 90),
        Color::Rgb(240, 160, 60),
        Color::Rgb(230, 57, 70),
    ];

    /// Toggle color for a color identity
    pub fn identity_color(identity: ColorIdentity) -> Color {
        match identity {
            ColorIdentity::White => Color::Rgb(238, 240, 192),
            ColorIdentity::Blue => Color::Rgb(182, 209, 227),
            ColorIdentity::Black => Color::Rgb(171, 161, 154),
            ColorIdentity::Red => Color::Rgb(217, 133, 100),
            ColorIdentity::Green => Color::Rgb(139, 179, 131),
        }
    }

    /// Color for a grade, interpolated along the gradient by ordinal
    pub fn grade_color(grade: Grade) -> Color {
        grade_color_at(grade.ordinal())
    }
}

/// Gradient color for a grade ordinal (0 = S, 13 = F); larger values clamp to F
pub fn grade_color_at(ordinal: usize) -> Color {
    let last = Grade::ALL.len() - 1;
    let t = ordinal.min(last) as f32 / last as f32;
    gradient(&Theme::GRADE_GRADIENT, t)
}

/// Piecewise-linear color over evenly spaced stops
pub fn gradient(stops: &[Color], t: f32) -> Color {
    match stops {
        [] => Color::Reset,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let segments = (stops.len() - 1) as f32;
            let scaled = t * segments;
            let idx = (scaled.floor() as usize).min(stops.len() - 2);
            interpolate_color(stops[idx], stops[idx + 1], scaled - idx as f32)
        }
    }
}

pub fn interpolate_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let r = (r1 as f32 + (r2 as f32 - r1 as f32) * t).round() as u8;
            let g = (g1 as f32 + (g2 as f32 - g1 as f32) * t).round() as u8;
            let b = (b1 as f32 + (b2 as f32 - b1 as f32) * t).round() as u8;
            Color::Rgb(r, g, b)
        }
        _ => to,
    }
}
