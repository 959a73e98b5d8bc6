//! TUI rendering and event loop.

pub mod bookmark_modal;
pub mod constants;
mod help;
pub mod layout;
pub mod page;
mod styles;
pub mod surah_modal;

pub use help::render_help_overlay;
pub use layout::{render_layout, RenderContext, Rendered};
pub use styles::{ColorConfig, Palette};

use crate::config::KeyBindings;
use crate::model::{AppError, KeyAction, PageStep, Side, WakeLockError};
use crate::state::mouse_handler::slider_page;
use crate::state::{
    hit_test, AppState, Gesture, HitRegions, HitTarget, SwipeTracker, TapZones, ZoneAction,
};
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(err) => AppError::Terminal(err),
            TuiError::App(err) => err,
        }
    }
}

/// Presentation settings resolved from the configuration.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub key_bindings: KeyBindings,
    pub tap_zones: TapZones,
    pub swipe_threshold: u16,
    pub colors: ColorConfig,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            tap_zones: TapZones::default(),
            swipe_threshold: crate::state::mouse_handler::DEFAULT_SWIPE_THRESHOLD,
            colors: ColorConfig::default(),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    tap_zones: TapZones,
    colors: ColorConfig,
    swipe: SwipeTracker,
    /// Left button went down on the slider and has not been released
    dragging_slider: bool,
    help_scroll: u16,
    help_max_scroll: u16,
    /// Where interactive elements were drawn in the last frame
    regions: HitRegions,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen, mouse capture and
    /// focus reporting.
    pub fn new(app_state: AppState, options: ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, app_state, options))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Fetch results are applied on
    /// every tick; the screen is redrawn only when something changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const TICK_INTERVAL: Duration = Duration::from_millis(100);

        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        self.app_state.mark_dirty();
                    }
                    Event::FocusGained => self.handle_focus_gained(),
                    Event::FocusLost => debug!("Terminal lost focus"),
                    _ => {}
                }
            }

            self.app_state.drain_fetch_outcomes();
            if self.app_state.take_dirty() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(terminal: Terminal<B>, app_state: AppState, options: ViewOptions) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: options.key_bindings,
            tap_zones: options.tap_zones,
            colors: options.colors,
            swipe: SwipeTracker::new(options.swipe_threshold),
            dragging_slider: false,
            help_scroll: 0,
            help_max_scroll: 0,
            regions: HitRegions::default(),
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if rebound or typed into a prompt
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible {
            return self.handle_help_key(key);
        }
        if self.app_state.surah_picker.is_visible() {
            self.handle_surah_picker_key(key);
            return false;
        }
        if self.app_state.bookmark_modal.is_visible() {
            return self.handle_bookmark_modal_key(key);
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        self.app_state.clear_status();
        self.dispatch(action)
    }

    /// Apply a key action. Returns true on quit.
    fn dispatch(&mut self, action: KeyAction) -> bool {
        let state = &mut self.app_state;
        match action {
            KeyAction::PageLeft => {
                state.turn_toward(Side::Left);
            }
            KeyAction::PageRight => {
                state.turn_toward(Side::Right);
            }
            KeyAction::NextPage => {
                state.step(PageStep::Next);
            }
            KeyAction::PrevPage => {
                state.step(PageStep::Previous);
            }
            KeyAction::JumpForward => {
                state.jump_forward();
            }
            KeyAction::JumpBack => {
                state.jump_back();
            }
            KeyAction::FirstPage => {
                state.first_page();
            }
            KeyAction::LastPage => {
                state.last_page();
            }
            KeyAction::OpenSurahPicker => state.open_surah_picker(),
            KeyAction::OpenBookmarks => {
                state.bookmark_modal.open();
                state.mark_dirty();
            }
            KeyAction::QuickBookmark => {
                state.bookmark_current(None);
            }
            KeyAction::ToggleTheme => {
                state.toggle_theme();
            }
            KeyAction::ToggleImmersive => {
                state.toggle_immersive();
            }
            KeyAction::ToggleWakeLock => match state.toggle_wake_lock() {
                Ok(true) => state.set_status("Keeping the screen awake"),
                Ok(false) => state.set_status("Screen may sleep again"),
                Err(WakeLockError::Unsupported) => {
                    state.set_status("Keep-awake is not supported on this system");
                }
                Err(_) => state.set_status("Could not keep the screen awake"),
            },
            KeyAction::RetryPage => {
                state.retry_current();
            }
            KeyAction::Help => {
                state.help_visible = true;
                state.mark_dirty();
                self.help_scroll = 0;
            }
            KeyAction::Quit => return true,
        }
        false
    }

    /// Keys while the help overlay is open: scroll, close, or quit.
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.close_help(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_help(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_help(1),
            _ => match self.key_bindings.get(key) {
                Some(KeyAction::Help) => self.close_help(),
                Some(KeyAction::Quit) => return true,
                _ => {}
            },
        }
        false
    }

    fn close_help(&mut self) {
        self.app_state.help_visible = false;
        self.help_scroll = 0;
        self.app_state.mark_dirty();
    }

    fn scroll_help(&mut self, delta: i32) {
        self.help_scroll = if delta < 0 {
            self.help_scroll.saturating_sub(1)
        } else {
            self.help_scroll.saturating_add(1).min(self.help_max_scroll)
        };
        self.app_state.mark_dirty();
    }

    /// Keys while the surah picker is open. Printable keys go to the query.
    fn handle_surah_picker_key(&mut self, key: KeyEvent) {
        let state = &mut self.app_state;
        let len = state.surah_picker.matches().len();
        match key.code {
            KeyCode::Esc => state.surah_picker.close(),
            KeyCode::Enter => {
                if let Some(surah) = state.surah_picker.selected_surah() {
                    info!(surah = surah.number, page = surah.start_page, "Surah chosen");
                    state.choose_surah(surah);
                }
            }
            KeyCode::Up => state.surah_picker.selection_mut().select_prev(),
            KeyCode::Down => state.surah_picker.selection_mut().select_next(len),
            KeyCode::PageUp => {
                for _ in 0..10 {
                    state.surah_picker.selection_mut().select_prev();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..10 {
                    state.surah_picker.selection_mut().select_next(len);
                }
            }
            KeyCode::Home => state.surah_picker.selection_mut().select_first(),
            KeyCode::End => state.surah_picker.selection_mut().select_last(len),
            KeyCode::Backspace => state.surah_picker.pop_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.surah_picker.push_char(c);
            }
            _ => return,
        }
        state.mark_dirty();
    }

    /// Keys while the bookmark manager is open. Returns true on quit.
    fn handle_bookmark_modal_key(&mut self, key: KeyEvent) -> bool {
        let state = &mut self.app_state;

        if state.bookmark_modal.is_editing() {
            match key.code {
                KeyCode::Enter => {
                    let note = state.bookmark_modal.finish_note();
                    state.bookmark_current(note);
                    let bookmarks = state.bookmarks();
                    let page = state.current_page().get();
                    if let Some(index) = bookmarks.iter().position(|b| b.page == page) {
                        state
                            .bookmark_modal
                            .selection_mut()
                            .select(index, bookmarks.len());
                    }
                }
                KeyCode::Esc => state.bookmark_modal.cancel_note(),
                KeyCode::Backspace => state.bookmark_modal.pop_char(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    state.bookmark_modal.push_char(c);
                }
                _ => return false,
            }
            state.mark_dirty();
            return false;
        }

        let len = state.bookmarks().len();
        match key.code {
            KeyCode::Esc => state.bookmark_modal.close(),
            KeyCode::Char('a') => {
                let existing = state.current_bookmark().and_then(|b| b.note);
                state.bookmark_modal.begin_note(existing.as_deref());
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(index) = state.bookmark_modal.selection().selected_in(len) {
                    state.delete_bookmark(index);
                    let remaining = state.bookmarks().len();
                    state.bookmark_modal.selection_mut().clamp(remaining);
                }
            }
            KeyCode::Enter => {
                if let Some(index) = state.bookmark_modal.selection().selected_in(len) {
                    state.bookmark_modal.close();
                    state.go_to_bookmark(index);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => state.bookmark_modal.selection_mut().select_prev(),
            KeyCode::Down | KeyCode::Char('j') => {
                state.bookmark_modal.selection_mut().select_next(len)
            }
            _ => match self.key_bindings.get(key) {
                Some(KeyAction::Quit) => return true,
                Some(KeyAction::OpenBookmarks) => state.bookmark_modal.close(),
                _ => return false,
            },
        }
        state.mark_dirty();
        false
    }

    /// Handle a single mouse event
    ///
    /// Left press/release pairs become swipes or taps; dragging on the slider
    /// scrubs through pages; the wheel turns pages or moves a modal selection.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.handle_wheel(false),
            MouseEventKind::ScrollDown => self.handle_wheel(true),
            MouseEventKind::Down(MouseButton::Left) => {
                let target = hit_test(&self.regions, &self.tap_zones, mouse.column, mouse.row);
                if target == HitTarget::Slider && !self.app_state.help_visible {
                    self.dragging_slider = true;
                    self.seek_slider(mouse.column);
                } else {
                    self.swipe.press(mouse.column, mouse.row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.dragging_slider {
                    self.seek_slider(mouse.column);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.dragging_slider {
                    self.dragging_slider = false;
                    return;
                }
                match self.swipe.release(mouse.column, mouse.row) {
                    Some(Gesture::Swipe(side)) => {
                        if !self.modal_open() {
                            debug!(?side, "Swipe");
                            self.app_state.turn_toward(side);
                        }
                    }
                    Some(Gesture::Tap { column, row }) => self.handle_tap(column, row),
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn modal_open(&self) -> bool {
        self.app_state.help_visible
            || self.app_state.surah_picker.is_visible()
            || self.app_state.bookmark_modal.is_visible()
    }

    fn handle_wheel(&mut self, down: bool) {
        let state = &mut self.app_state;
        if state.help_visible {
            self.scroll_help(if down { 1 } else { -1 });
        } else if state.surah_picker.is_visible() {
            let len = state.surah_picker.matches().len();
            let selection = state.surah_picker.selection_mut();
            if down {
                selection.select_next(len);
            } else {
                selection.select_prev();
            }
            state.mark_dirty();
        } else if state.bookmark_modal.is_visible() {
            let len = state.bookmarks().len();
            let selection = state.bookmark_modal.selection_mut();
            if down {
                selection.select_next(len);
            } else {
                selection.select_prev();
            }
            state.mark_dirty();
        } else if down {
            state.step(PageStep::Next);
        } else {
            state.step(PageStep::Previous);
        }
    }

    fn seek_slider(&mut self, column: u16) {
        if let Some(track) = self.regions.slider {
            let page = slider_page(track, column, self.app_state.bounds());
            if page != self.app_state.current_page() {
                self.app_state.go_to(i64::from(page.get()));
            }
        }
    }

    /// Resolve a tap against the regions of the last frame.
    fn handle_tap(&mut self, column: u16, row: u16) {
        if self.app_state.help_visible {
            self.close_help();
            return;
        }

        let state = &mut self.app_state;
        match hit_test(&self.regions, &self.tap_zones, column, row) {
            HitTarget::PrevButton => {
                state.step(PageStep::Previous);
            }
            HitTarget::NextButton => {
                state.step(PageStep::Next);
            }
            HitTarget::RetryButton => {
                state.retry_current();
            }
            HitTarget::Page(zone) => match self.tap_zones.action(zone) {
                ZoneAction::TurnLeft => {
                    state.turn_toward(Side::Left);
                }
                ZoneAction::TurnRight => {
                    state.turn_toward(Side::Right);
                }
                ZoneAction::Previous => {
                    state.step(PageStep::Previous);
                }
                ZoneAction::Next => {
                    state.step(PageStep::Next);
                }
                ZoneAction::ToggleImmersive => {
                    state.toggle_immersive();
                }
                ZoneAction::Nothing => {}
            },
            HitTarget::ModalItem(index) => {
                if state.surah_picker.is_visible() {
                    let matches = state.surah_picker.matches();
                    if let Some(surah) = matches.get(index).copied() {
                        state.choose_surah(surah);
                    }
                } else if state.bookmark_modal.is_visible() && !state.bookmark_modal.is_editing() {
                    state.bookmark_modal.close();
                    state.go_to_bookmark(index);
                }
            }
            HitTarget::ModalBackdrop => {
                state.surah_picker.close();
                state.bookmark_modal.close();
                state.mark_dirty();
            }
            HitTarget::Slider | HitTarget::ModalChrome | HitTarget::Nothing => {}
        }
    }

    /// The terminal regained focus: the system may have dropped the wake lock.
    fn handle_focus_gained(&mut self) {
        if self.app_state.on_focus_gained() {
            self.app_state.mark_dirty();
        }
    }

    /// Render the current frame and remember where everything was drawn.
    fn draw(&mut self) -> Result<(), TuiError> {
        let ctx = RenderContext {
            colors: self.colors,
            tap_zones: &self.tap_zones,
            key_bindings: &self.key_bindings,
            help_scroll: self.help_scroll,
        };
        let app_state = &mut self.app_state;
        let mut rendered = Rendered::default();

        self.terminal.draw(|frame| {
            rendered = layout::render_layout(frame, app_state, &ctx);
        })?;

        self.regions = rendered.regions;
        self.help_max_scroll = rendered.help_max_scroll;
        self.help_scroll = self.help_scroll.min(self.help_max_scroll);
        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        options: ViewOptions,
    ) -> Self {
        Self::with_terminal(terminal, app_state, options)
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Get mutable reference to app state (test-only accessor)
    pub(crate) fn app_state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Regions recorded by the last draw (test-only accessor)
    pub(crate) fn regions(&self) -> HitRegions {
        self.regions
    }

    /// Handle a single keyboard event (test-only accessor)
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Simulate the terminal regaining focus (test-only accessor)
    pub(crate) fn focus_gained_test(&mut self) {
        self.handle_focus_gained()
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the reader
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_reader(app_state: AppState, options: ViewOptions) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, options)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, focus reporting and mouse capture, and leaves
/// alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableFocusChange)?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
