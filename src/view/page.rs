//! Page card rendering.
//!
//! The terminal cannot show the scanned page itself, so the card shows what
//! the reader knows about it: the surahs on the page, the load state of its
//! image, the asset locator, and the tap zones laid over it.

use super::constants::RETRY_LABEL;
use super::styles::Palette;
use crate::model::{surah, PageStep, ReadingDirection, Side};
use crate::state::{AppState, PageStatus, TapZones, ZoneAction};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Interactive areas of the drawn card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRegions {
    /// Whole card, where tap zones apply.
    pub page: Rect,
    /// Retry control, present only when the page failed to load.
    pub retry_button: Option<Rect>,
}

/// Render the card for the current page.
pub fn render_page(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    palette: &Palette,
    zones: &TapZones,
) -> PageRegions {
    let page = state.current_page();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.muted)
        .style(palette.base)
        .title(Line::from(format!(" Page {} ", page.get())).centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut regions = PageRegions {
        page: area,
        retry_button: None,
    };
    if inner.height == 0 || inner.width == 0 {
        return regions;
    }

    // Bottom row shows what each zone does
    let (content_area, guide_row) = if inner.height >= 3 {
        (
            Rect {
                height: inner.height - 1,
                ..inner
            },
            Some(Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            }),
        )
    } else {
        (inner, None)
    };

    let lines = page_lines(state, palette);
    let failed = matches!(state.current_status(), PageStatus::Failed(_));
    let needed = lines.len() as u16 + if failed { 2 } else { 0 };
    let top = content_area.y + content_area.height.saturating_sub(needed) / 2;
    let text_height = (lines.len() as u16).min(content_area.y + content_area.height - top);

    frame.render_widget(
        Paragraph::new(lines)
            .style(palette.base)
            .alignment(Alignment::Center),
        Rect {
            y: top,
            height: text_height,
            ..content_area
        },
    );

    if failed {
        let row = top + text_height + 1;
        let width = (RETRY_LABEL.width() as u16).min(content_area.width);
        if row < content_area.y + content_area.height {
            let button = Rect {
                x: content_area.x + (content_area.width - width) / 2,
                y: row,
                width,
                height: 1,
            };
            frame.render_widget(Paragraph::new(RETRY_LABEL).style(palette.button), button);
            regions.retry_button = Some(button);
        }
    }

    if let Some(row) = guide_row {
        render_zone_guide(frame, row, area, zones, state.direction(), palette);
    }

    regions
}

/// Text lines of the card, top to bottom.
fn page_lines(state: &AppState, palette: &Palette) -> Vec<Line<'static>> {
    let page = state.current_page();
    let current = surah::surah_at_page(page.get());
    let mut lines = vec![
        Line::from(Span::styled(current.arabic.to_string(), palette.heading)),
        Line::from(Span::styled(
            format!("{}. {}", current.number, current.name),
            palette.heading,
        )),
    ];

    let starting: Vec<String> = surah::surahs_starting_on(page.get())
        .map(|s| format!("{}. {}", s.number, s.name))
        .collect();
    if !starting.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Begins here: {}", starting.join(", ")),
            palette.accent,
        )));
    }

    if let Some(bookmark) = state.current_bookmark() {
        let text = match &bookmark.note {
            Some(note) => format!("★ {} · {}", bookmark.date, note),
            None => format!("★ {}", bookmark.date),
        };
        lines.push(Line::from(Span::styled(text, palette.accent)));
    }

    lines.push(Line::default());
    match state.current_status() {
        PageStatus::Unrequested | PageStatus::Loading => {
            lines.push(Line::from(Span::styled("Loading…", palette.muted)));
        }
        PageStatus::Ready(image) => {
            let mut text = format!("Image ready · {}", format_size(image.len()));
            if let Some(content_type) = &image.content_type {
                text.push_str(" · ");
                text.push_str(content_type);
            }
            lines.push(Line::from(Span::styled(text, palette.base)));
        }
        PageStatus::Failed(err) => {
            lines.push(Line::from(Span::styled(
                format!("Page {} could not be loaded", page.get()),
                palette.error,
            )));
            lines.push(Line::from(Span::styled(err.to_string(), palette.muted)));
        }
    }
    lines.push(Line::from(Span::styled(state.page_url(page), palette.muted)));
    lines
}

/// One label per tap zone, centred in the zone's columns.
fn render_zone_guide(
    frame: &mut Frame,
    row: Rect,
    page: Rect,
    zones: &TapZones,
    direction: ReadingDirection,
    palette: &Palette,
) {
    let (left_end, right_start) = zones.boundaries(page.width);
    let segments = [
        (page.x, page.x + left_end, zones.left),
        (page.x + left_end, page.x + right_start, zones.center),
        (page.x + right_start, page.x + page.width, zones.right),
    ];

    for (start, end, action) in segments {
        let start = start.max(row.x);
        let end = end.min(row.x + row.width);
        if end <= start {
            continue;
        }
        frame.render_widget(
            Paragraph::new(zone_label(action, direction))
                .style(palette.muted)
                .alignment(Alignment::Center),
            Rect {
                x: start,
                width: end - start,
                ..row
            },
        );
    }
}

/// Short description of a tap zone action.
pub fn zone_label(action: ZoneAction, direction: ReadingDirection) -> &'static str {
    let step_label = |step: PageStep| match (step, direction.side_for(step)) {
        (PageStep::Next, Side::Left) => "◀ next",
        (PageStep::Next, Side::Right) => "next ▶",
        (PageStep::Previous, Side::Left) => "◀ prev",
        (PageStep::Previous, Side::Right) => "prev ▶",
    };
    match action {
        ZoneAction::TurnLeft => step_label(direction.step_for(Side::Left)),
        ZoneAction::TurnRight => step_label(direction.step_for(Side::Right)),
        ZoneAction::Previous => step_label(PageStep::Previous),
        ZoneAction::Next => step_label(PageStep::Next),
        ZoneAction::ToggleImmersive => "immersive",
        ZoneAction::Nothing => "",
    }
}

/// Human-readable byte count.
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}
