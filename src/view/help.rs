//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Keys are read from the active [`KeyBindings`], so overrides from the config
//! file show up here. Triggered by '?', dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::Palette;
use crate::config::KeyBindings;
use crate::model::KeyAction;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the key column in help rows.
const KEY_COLUMN_WIDTH: usize = 18;

/// Shortcut groups shown in the overlay.
const SECTIONS: &[(&str, &[(KeyAction, &str)])] = &[
    (
        "Pages",
        &[
            (KeyAction::PageLeft, "Turn towards the left"),
            (KeyAction::PageRight, "Turn towards the right"),
            (KeyAction::NextPage, "Next page"),
            (KeyAction::PrevPage, "Previous page"),
            (KeyAction::JumpForward, "Skip forward"),
            (KeyAction::JumpBack, "Skip back"),
            (KeyAction::FirstPage, "First page"),
            (KeyAction::LastPage, "Last page"),
            (KeyAction::RetryPage, "Retry a failed page"),
        ],
    ),
    (
        "Surahs & Bookmarks",
        &[
            (KeyAction::OpenSurahPicker, "Choose a surah"),
            (KeyAction::OpenBookmarks, "Manage bookmarks"),
            (KeyAction::QuickBookmark, "Bookmark this page"),
        ],
    ),
    (
        "Display",
        &[
            (KeyAction::ToggleTheme, "Dark / light theme"),
            (KeyAction::ToggleImmersive, "Immersive mode"),
            (KeyAction::ToggleWakeLock, "Keep screen awake"),
        ],
    ),
    (
        "Application",
        &[
            (KeyAction::Help, "Show this help"),
            (KeyAction::Quit, "Quit"),
        ],
    ),
];

/// Mouse gestures, which are not configurable.
const MOUSE_ROWS: &[(&str, &str)] = &[
    ("Click page sides", "Turn the page"),
    ("Click page centre", "Immersive mode"),
    ("Swipe", "Turn the page"),
    ("Slider", "Go to any page"),
    ("Wheel", "Previous / next page"),
];

/// Render the help overlay centered on the screen.
///
/// Returns the largest scroll offset that still shows content, so the caller
/// can clamp its scroll position.
pub fn render_help_overlay(
    frame: &mut Frame,
    palette: &Palette,
    bindings: &KeyBindings,
    scroll_offset: u16,
) -> u16 {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    // Clear the background for the overlay
    frame.render_widget(Clear, popup_area);

    let content = build_help_content(palette, bindings);
    let visible = popup_area.height.saturating_sub(2);
    let max_scroll = u16::try_from(content.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(visible);

    let help_paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.accent)
                .style(palette.base),
        )
        .alignment(Alignment::Left)
        .scroll((scroll_offset.min(max_scroll), 0));

    frame.render_widget(help_paragraph, popup_area);

    // Render dismissal hint at the bottom
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        palette.muted.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);

    max_scroll
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Build the help content lines grouped by category.
fn build_help_content(palette: &Palette, bindings: &KeyBindings) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (title, rows) in SECTIONS {
        lines.push(Line::from(Span::styled(title.to_string(), palette.heading)));
        for (action, description) in rows.iter() {
            let keys = bindings.keys_for(*action);
            let keys = if keys.is_empty() {
                "(unbound)".to_string()
            } else {
                keys.join("/")
            };
            lines.push(help_row(&keys, description, palette));
        }
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled("Mouse", palette.heading)));
    for (gesture, description) in MOUSE_ROWS {
        lines.push(help_row(gesture, description, palette));
    }

    lines
}

fn help_row(keys: &str, description: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<KEY_COLUMN_WIDTH$}"), palette.key),
        Span::styled(description.to_string(), palette.base),
    ])
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
