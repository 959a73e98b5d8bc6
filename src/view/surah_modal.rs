//! Surah picker modal rendering.

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

/// Borders (2) + search row + hint row.
const CHROME_ROWS: u16 = 4;

/// Render the surah picker overlay.
///
/// Displays a centered modal with:
/// - Search row showing the typed query
/// - Filtered surah list, selected row highlighted
/// - Footer with keybinding hints
///
/// Adjusts the list scroll so the selection stays visible.
pub fn render_surah_modal(frame: &mut Frame, state: &mut AppState, palette: &Palette) -> ModalRegions {
    let matches = state.surah_picker.matches();
    let modal_area = list_modal_area(frame.area(), MODAL_WIDTH, matches.len(), CHROME_ROWS);

    frame.render_widget(Clear, modal_area);
    let block = Block::default()
        .title(" Surahs ")
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

    let search_row = Rect { height: 1, ..inner };
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

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Search: ", palette.muted),
            Span::styled(format!("{}_", state.surah_picker.query()), palette.base),
        ])),
        search_row,
    );

    let selection = state.surah_picker.selection_mut();
    selection.clamp(matches.len());
    selection.adjust_scroll(usize::from(list_area.height));
    let offset = selection.scroll_offset();
    let selected = selection.selected_in(matches.len());

    if matches.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(" No surah matches", palette.muted)),
            list_area,
        );
    } else {
        let current = crate::model::surah::surah_at_page(state.current_page().get()).number;
        let lines: Vec<Line> = matches
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(list_area.height))
            .map(|(index, surah)| {
                let style = if Some(index) == selected {
                    palette.highlight
                } else {
                    palette.base
                };
                let marker = if surah.number == current { "•" } else { " " };
                Line::from(Span::styled(
                    format!(
                        "{marker}{:>3}. {:<22} {:<12} p.{}",
                        surah.number, surah.name, surah.arabic, surah.start_page
                    ),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(
            " Type to filter · ↑/↓ select · Enter go · Esc close",
            palette.muted,
        )),
        hint_row,
    );

    ModalRegions {
        modal: Some(modal_area),
        list: (!matches.is_empty()).then_some(Rect {
            height: list_area
                .height
                .min(u16::try_from(matches.len() - offset).unwrap_or(u16::MAX)),
            ..list_area
        }),
        offset,
    }
}
