//! Bookmark manager modal rendering.

use super::constants::MODAL_WIDTH;
use super::layout::{list_modal_area, ModalRegions};
use super::styles::Palette;
use crate::state::AppState;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Borders (2) + prompt row + hint row.
const CHROME_ROWS: u16 = 4;

/// Render the bookmark manager overlay.
///
/// Lists bookmarks in insertion order with page, date and note. The top row
/// is the note prompt while one is open; otherwise it names the current page.
pub fn render_bookmark_modal(
    frame: &mut Frame,
    state: &mut AppState,
    palette: &Palette,
) -> ModalRegions {
    let bookmarks = state.bookmarks();
    let page = state.current_page().get();
    let modal_area = list_modal_area(frame.area(), MODAL_WIDTH, bookmarks.len(), CHROME_ROWS);

    frame.render_widget(Clear, modal_area);
    let block = Block::default()
        .title(" Bookmarks ")
        .borders(Borders::ALL)
        .border_style(palette.accent)
        .style(palette.base);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    if inner.height < 3 {
        return ModalRegions {
            modal: Some(modal_area),
            ..ModalRegions::default()
        };
    }

    let prompt_row = Rect { height: 1, ..inner };
    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height - 2,
        ..inner
    };
    let hint_row = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };

    let editing = state.bookmark_modal.note_input().map(str::to_string);
    let prompt = match &editing {
        Some(input) => Line::from(vec![
            Span::styled(format!(" Note for page {page}: "), palette.accent),
            Span::styled(format!("{input}_"), palette.base),
        ]),
        None => Line::from(Span::styled(format!(" Current page: {page}"), palette.muted)),
    };
    frame.render_widget(Paragraph::new(prompt), prompt_row);

    let selection = state.bookmark_modal.selection_mut();
    selection.clamp(bookmarks.len());
    selection.adjust_scroll(usize::from(list_area.height));
    let offset = selection.scroll_offset();
    let selected = selection.selected_in(bookmarks.len());

    if bookmarks.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" No bookmarks yet. Press a to bookmark page {page}."),
                palette.muted,
            )),
            list_area,
        );
    } else {
        let lines: Vec<Line> = bookmarks
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(list_area.height))
            .map(|(index, bookmark)| {
                let style = if Some(index) == selected {
                    palette.highlight
                } else {
                    palette.base
                };
                let note = bookmark.note.as_deref().unwrap_or("");
                Line::from(Span::styled(
                    format!(" p.{:<4} {:<11} {note}", bookmark.page, bookmark.date),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);
    }

    let hint = if editing.is_some() {
        " Enter save · Esc cancel"
    } else {
        " a add · d delete · Enter go · Esc close"
    };
    frame.render_widget(Paragraph::new(Span::styled(hint, palette.muted)), hint_row);

    ModalRegions {
        modal: Some(modal_area),
        list: (!bookmarks.is_empty()).then_some(Rect {
            height: list_area
                .height
                .min(u16::try_from(bookmarks.len() - offset).unwrap_or(u16::MAX)),
            ..list_area
        }),
        offset,
    }
}
