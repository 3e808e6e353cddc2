use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use tachyonfx::Duration;
use tracing::{debug, info};

use draftcompare_core::query::DEBUG_TOGGLE_CHAR;
use draftcompare_core::{CardCatalog, Intent, Mode, Session, ViewState};
use draftcompare_widgets::debug_corner::DebugCornerWidget;
use draftcompare_widgets::detail::{detail_popup, DETAIL_SIZE};
use draftcompare_widgets::hud::HudWidget;
use draftcompare_widgets::popup::centered_rect;
use draftcompare_widgets::theme::Theme;

use crate::effects::{self, FxManager};
use crate::input::{InputBatch, InputEvent};
use crate::screens::compare::CompareScreen;
use crate::screens::query::QueryScreen;
use crate::screens::Screen;

/// Widest the debug corner gets
const DEBUG_CORNER_WIDTH: u16 = 48;

/// Main application state
pub struct App<'c> {
    pub session: Session<'c>,
    pub tick: u64,
    pub fx: FxManager,
    tick_ms: u32,

    prev_mode: Option<Mode>,
    prev_view: ViewState,
    prev_detail: bool,
    prev_frozen: bool,
    /// Detail opened since the last frame; its rect is only known at render time
    reveal_detail: bool,

    hover: Option<(u16, u16)>,
    /// The last press only dismissed the overlay, so its release is ignored
    press_consumed: bool,

    // Screens
    query_screen: QueryScreen,
    compare_screen: CompareScreen,

    fps: f64,
    fps_frames: u32,
    fps_window: Instant,
}

impl<'c> App<'c> {
    pub fn new(catalog: &'c CardCatalog, view: ViewState, tick_ms: u32) -> Self {
        let session = Session::with_view(catalog, view);
        Self {
            prev_view: session.view,
            session,
            tick: 0,
            fx: FxManager::default(),
            tick_ms,
            prev_mode: None,
            prev_detail: false,
            prev_frozen: false,
            reveal_detail: false,
            hover: None,
            press_consumed: false,
            query_screen: QueryScreen::new(),
            compare_screen: CompareScreen::new(),
            fps: 0.0,
            fps_frames: 0,
            fps_window: Instant::now(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
            .split(area.inner(Margin::new(1, 0)));
        let body = chunks[0].inner(Margin::new(0, 1));

        // No hover feedback under the overlay
        let hover = match self.session.detail() {
            Some(_) => None,
            None => self.hover,
        };
        match self.session.mode() {
            Mode::Query => self.query_screen.render(frame, body, &self.session, hover),
            Mode::Compare => self.compare_screen.render(frame, body, &self.session, hover),
        }

        let view = self.session.view;
        let hud = HudWidget::new(view.mode, view.caliber, view.metric, view.filter_key())
            .selected(self.session.selection().len())
            .frozen(self.session.is_frozen());
        frame.render_widget(hud, chunks[1]);

        let corner = DebugCornerWidget::new(&self.session.debug);
        let corner_height = corner.height().min(body.height);
        let corner_area = Rect::new(
            body.x,
            body.bottom() - corner_height,
            body.width.min(DEBUG_CORNER_WIDTH),
            corner_height,
        );
        frame.render_widget(corner, corner_area);

        if let Some(name) = self.session.detail() {
            if let Some(record) = self.session.catalog().get(name) {
                frame.render_widget(detail_popup(name, record), area);
            }
        }

        if self.reveal_detail {
            self.reveal_detail = false;
            let popup = centered_rect(DETAIL_SIZE.0, DETAIL_SIZE.1, area);
            self.fx
                .add_unique_effect("detail_reveal", effects::detail_reveal(popup));
        }

        // Apply all tachyonfx effects on top of rendered content
        let buf = frame.buffer_mut();
        self.fx
            .process_effects(Duration::from_millis(self.tick_ms), buf, area);

        self.fps_frames += 1;
    }

    /// Handle key event. Returns true if should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let intent = match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                info!("Quit requested");
                return true;
            }
            KeyCode::F(2) => Some(Intent::Freeze),
            KeyCode::Char(DEBUG_TOGGLE_CHAR) => Some(Intent::ToggleDebug),
            KeyCode::Enter => Some(Intent::RunComparison),
            KeyCode::Esc if self.session.detail().is_some() => Some(Intent::DismissDetail),
            KeyCode::Esc => Some(Intent::Clear),
            _ => match self.session.mode() {
                Mode::Query => self.query_screen.handle_key(key),
                Mode::Compare => self.compare_screen.handle_key(key),
            },
        };

        if let Some(intent) = intent {
            debug!(?intent, "Key intent");
            self.session.apply(intent);
        }
        false
    }

    /// Apply one tick's worth of input in arrival order. Returns true if should quit.
    pub fn handle_batch(&mut self, batch: InputBatch) -> bool {
        for event in batch {
            match event {
                InputEvent::Key(key) => {
                    if self.handle_key(key) {
                        return true;
                    }
                }
                InputEvent::Press(..) => {
                    self.press_consumed = self.session.pointer_pressed();
                }
                InputEvent::Release(column, row) => {
                    let consumed = std::mem::take(&mut self.press_consumed);
                    if consumed || self.session.detail().is_some() {
                        continue;
                    }
                    // Hit-test against what the user is looking at
                    self.session.refresh();
                    let intent = match self.session.mode() {
                        Mode::Query => self.query_screen.handle_release(column, row, &self.session),
                        Mode::Compare => {
                            self.compare_screen
                                .handle_release(column, row, &self.session)
                        }
                    };
                    if let Some(intent) = intent {
                        debug!(?intent, column, row, "Pointer intent");
                        self.session.apply(intent);
                    }
                }
                InputEvent::Hover(column, row) => self.hover = Some((column, row)),
            }
        }

        self.session.refresh();
        false
    }

    pub fn tick(&mut self) {
        let frozen = self.session.is_frozen();
        if frozen && !self.prev_frozen {
            self.fx.add_unique_effect("freeze", effects::freeze_fade());
        }
        self.prev_frozen = frozen;
        if frozen {
            return;
        }

        self.tick += 1;
        self.query_screen.tick = self.tick;

        // Detect mode changes and trigger transition effects
        let mode = self.session.mode();
        if self.prev_mode != Some(mode) {
            self.fx
                .add_unique_effect("screen_transition", effects::screen_transition());
            self.prev_mode = Some(mode);
        } else if mode == Mode::Compare && self.session.view != self.prev_view {
            self.fx.add_unique_effect(
                "table_refresh",
                effects::table_refresh(self.compare_screen.table_area()),
            );
        }
        self.prev_view = self.session.view;

        let detail = self.session.detail().is_some();
        if detail && !self.prev_detail {
            self.reveal_detail = true;
        }
        self.prev_detail = detail;

        self.update_fps();
        self.update_debug_corner();
    }

    fn update_fps(&mut self) {
        let elapsed = self.fps_window.elapsed().as_secs_f64();
        if elapsed >= 1.0 {
            self.fps = self.fps_frames as f64 / elapsed;
            self.fps_frames = 0;
            self.fps_window = Instant::now();
        }
    }

    fn update_debug_corner(&mut self) {
        let lines = [
            format!("frameCount: {}", self.tick),
            format!("fps: {:.1}", self.fps),
            format!(
                "results: {}  picked: {}",
                self.session.results().len(),
                self.session.selection().len()
            ),
            format!(
                "rows: {}  row: {}",
                self.session.table().rows().len(),
                self.session.row_cursor()
            ),
            format!("colors: {}", self.session.view.filter_key()),
        ];
        for (i, text) in lines.into_iter().enumerate() {
            self.session.debug.set_text(i, text);
        }
    }
}
