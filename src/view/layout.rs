//! Screen layout rendering.
//!
//! Header bar, page card and footer controls, with the modals drawn on top.
//! Every interactive element is recorded in [`HitRegions`] so that mouse
//! input can be resolved against what was actually drawn.

use super::constants::{FOOTER_HEIGHT, HEADER_HEIGHT, MODAL_MAX_HEIGHT_PERCENT, NAV_BUTTON_WIDTH};
use super::styles::{ColorConfig, Palette};
use super::{bookmark_modal, help, page, surah_modal};
use crate::config::KeyBindings;
use crate::model::{surah, KeyAction, PageStep, ReadingDirection, Side};
use crate::state::mouse_handler::slider_offset;
use crate::state::{AppState, HitRegions, TapZones};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Everything the renderer needs besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub colors: ColorConfig,
    pub tap_zones: &'a TapZones,
    pub key_bindings: &'a KeyBindings,
    pub help_scroll: u16,
}

/// Result of rendering one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rendered {
    pub regions: HitRegions,
    /// Largest useful help scroll offset for the current screen size.
    pub help_max_scroll: u16,
}

/// Where a list modal was drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalRegions {
    pub modal: Option<Rect>,
    pub list: Option<Rect>,
    /// Index of the first visible list row.
    pub offset: usize,
}

impl ModalRegions {
    /// Record the modal in the frame's hit regions.
    pub fn apply(self, regions: &mut HitRegions) {
        regions.modal = self.modal;
        regions.modal_list = self.list;
        regions.modal_list_offset = self.offset;
    }
}

/// Top-level screen areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Option<Rect>,
    pub page: Rect,
    pub controls: Option<Rect>,
    pub status: Option<Rect>,
}

/// Split the screen. Immersive mode gives the whole screen to the page.
pub fn calculate_areas(area: Rect, immersive: bool) -> ScreenAreas {
    if immersive || area.height < HEADER_HEIGHT + FOOTER_HEIGHT + 3 {
        return ScreenAreas {
            header: None,
            page: area,
            controls: None,
            status: None,
        };
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1), // Controls row
            Constraint::Length(1), // Status row
        ])
        .split(area);

    ScreenAreas {
        header: Some(chunks[0]),
        page: chunks[1],
        controls: Some(chunks[2]),
        status: Some(chunks[3]),
    }
}

/// Footer control positions: (previous button, slider track, next button).
///
/// The previous button sits on the side that means "previous" for the
/// reading direction.
pub fn split_controls(controls: Rect, direction: ReadingDirection) -> (Rect, Rect, Rect) {
    let button = NAV_BUTTON_WIDTH.min(controls.width / 3);
    let left = Rect::new(controls.x, controls.y, button, 1);
    let right = Rect::new(controls.x + controls.width - button, controls.y, button, 1);
    let track_x = left.x + button + 1;
    let track_width = controls.width.saturating_sub(2 * button + 2);
    let track = Rect::new(track_x, controls.y, track_width, 1);

    match direction.side_for(PageStep::Previous) {
        Side::Left => (left, track, right),
        Side::Right => (right, track, left),
    }
}

/// Centre a `width` x `height` box in `area`, shrinking it to fit.
pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Modal box for a list of `items` rows plus `chrome` rows of borders,
/// prompt and hints.
pub fn list_modal_area(area: Rect, width: u16, items: usize, chrome: u16) -> Rect {
    let max_height = (area.height * MODAL_MAX_HEIGHT_PERCENT / 100).max(chrome + 1);
    let wanted = u16::try_from(items.max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(chrome);
    centered_box(area, width, wanted.min(max_height))
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &mut AppState, ctx: &RenderContext) -> Rendered {
    let palette = Palette::new(state.theme(), ctx.colors);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base), area);

    let areas = calculate_areas(area, state.immersive());
    let mut regions = HitRegions::default();

    if let Some(header) = areas.header {
        render_header(frame, header, state, &palette);
    }

    let drawn = page::render_page(frame, areas.page, state, &palette, ctx.tap_zones);
    regions.page = Some(drawn.page);
    regions.retry_button = drawn.retry_button;

    if let Some(controls) = areas.controls {
        let (prev, track, next) = render_controls(frame, controls, state, &palette);
        regions.prev_button = Some(prev);
        regions.next_button = Some(next);
        regions.slider = (track.width > 0).then_some(track);
    }

    if let Some(status) = areas.status {
        render_status_bar(frame, status, state, &palette, ctx.key_bindings);
    }

    let mut help_max_scroll = 0;
    if state.help_visible {
        help_max_scroll =
            help::render_help_overlay(frame, &palette, ctx.key_bindings, ctx.help_scroll);
    } else if state.surah_picker.is_visible() {
        surah_modal::render_surah_modal(frame, state, &palette).apply(&mut regions);
    } else if state.bookmark_modal.is_visible() {
        bookmark_modal::render_bookmark_modal(frame, state, &palette).apply(&mut regions);
    }

    Rendered {
        regions,
        help_max_scroll,
    }
}

/// Header: surah in progress on the left, page counter and indicators on the right.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let page = state.current_page();
    let current = surah::surah_at_page(page.get());

    let left = Line::from(vec![
        Span::styled(format!(" {}. {}", current.number, current.name), palette.heading),
        Span::styled(format!("  {}", current.arabic), palette.accent),
    ]);

    let mut right = Vec::new();
    if state.current_bookmark().is_some() {
        right.push(Span::styled("★ ", palette.accent));
    }
    if state.wake_lock_desired() {
        right.push(Span::styled("awake ", palette.muted));
    }
    right.push(Span::styled(
        format!("{} / {} ", page.get(), state.bounds().total()),
        palette.heading,
    ));

    frame.render_widget(Paragraph::new(left).style(palette.base), area);
    frame.render_widget(
        Paragraph::new(Line::from(right))
            .style(palette.base)
            .alignment(ratatui::layout::Alignment::Right),
        area,
    );
}

/// Footer controls row. Returns the drawn (previous, slider, next) areas.
fn render_controls(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
) -> (Rect, Rect, Rect) {
    let (prev, track, next) = split_controls(area, state.direction());

    let (prev_label, next_label) = match state.direction().side_for(PageStep::Previous) {
        Side::Left => ("◀ Prev", "Next ▶"),
        Side::Right => ("Prev ▶", "◀ Next"),
    };
    let button_style = |enabled: bool| {
        if enabled {
            palette.button
        } else {
            palette.button_disabled
        }
    };
    frame.render_widget(
        Paragraph::new(prev_label)
            .style(button_style(state.has_previous()))
            .alignment(ratatui::layout::Alignment::Center),
        prev,
    );
    frame.render_widget(
        Paragraph::new(next_label)
            .style(button_style(state.has_next()))
            .alignment(ratatui::layout::Alignment::Center),
        next,
    );

    if track.width > 0 {
        let thumb = slider_offset(track.width, state.current_page(), state.bounds());
        let spans: Vec<Span> = (0..track.width)
            .map(|col| {
                if col == thumb {
                    Span::styled("●", palette.slider_thumb)
                } else {
                    Span::styled("─", palette.slider_track)
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), track);
    }

    (prev, track, next)
}

/// Status row: the latest message, or key hints.
fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    bindings: &KeyBindings,
) {
    let line = match state.status() {
        Some(message) => Line::from(Span::styled(format!(" {message}"), palette.accent)),
        None => {
            let mut spans = vec![Span::raw(" ")];
            for (action, label) in [
                (KeyAction::OpenSurahPicker, "surahs"),
                (KeyAction::OpenBookmarks, "bookmarks"),
                (KeyAction::Help, "help"),
                (KeyAction::Quit, "quit"),
            ] {
                if let Some(key) = bindings.keys_for(action).into_iter().min_by_key(String::len) {
                    spans.push(Span::styled(key, palette.key));
                    spans.push(Span::styled(format!(" {label}  "), palette.muted));
                }
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line).style(palette.base), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
