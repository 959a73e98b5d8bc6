//! Tests for the help overlay.

use super::*;
use crate::state::Theme;
use crate::view::styles::ColorConfig;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::HashMap;

fn palette() -> Palette {
    Palette::new(Theme::Light, ColorConfig::default())
}

fn content_text(bindings: &KeyBindings) -> Vec<String> {
    build_help_content(&palette(), bindings)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect()
}

fn render(width: u16, height: u16, scroll: u16) -> (Terminal<TestBackend>, u16) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let mut max_scroll = 0;
    terminal
        .draw(|frame| {
            max_scroll =
                render_help_overlay(frame, &palette(), &KeyBindings::default(), scroll);
        })
        .unwrap();
    (terminal, max_scroll)
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn help_lists_every_section() {
    let text = content_text(&KeyBindings::default()).join("\n");

    for heading in ["Pages", "Surahs & Bookmarks", "Display", "Application", "Mouse"] {
        assert!(text.contains(heading), "missing section {heading}");
    }
}

#[test]
fn help_rows_show_default_keys() {
    let lines = content_text(&KeyBindings::default());

    let quit = lines
        .iter()
        .find(|line| line.ends_with("Quit"))
        .expect("quit row");
    assert!(quit.contains("Ctrl+c/q"), "got {quit:?}");

    let surahs = lines
        .iter()
        .find(|line| line.ends_with("Choose a surah"))
        .expect("surah row");
    assert!(surahs.trim_start().starts_with('s'));
}

#[test]
fn help_reflects_key_overrides() {
    let overrides = HashMap::from([(KeyAction::ToggleTheme, vec!["ctrl+t".to_string()])]);
    let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();
    assert_eq!(
        bindings.get(crossterm::event::KeyEvent::new(
            KeyCode::Char('t'),
            KeyModifiers::CONTROL
        )),
        Some(KeyAction::ToggleTheme)
    );

    let lines = content_text(&bindings);
    let theme = lines
        .iter()
        .find(|line| line.ends_with("Dark / light theme"))
        .expect("theme row");
    assert!(theme.contains("Ctrl+t"), "got {theme:?}");
}

#[test]
fn overlay_renders_title_and_dismiss_hint() {
    let (terminal, _) = render(80, 40, 0);
    let text = buffer_text(&terminal);

    assert!(text.contains("Keyboard Shortcuts"));
    assert!(text.contains("Press Esc or ? to close"));
}

#[test]
fn small_screen_allows_scrolling() {
    let (_, max_scroll) = render(80, 12, 0);
    assert!(max_scroll > 0);

    let (_, roomy) = render(80, 60, 0);
    assert_eq!(roomy, 0);
}

#[test]
fn scrolling_reveals_later_sections() {
    let (top, max_scroll) = render(80, 12, 0);
    assert!(!buffer_text(&top).contains("Wheel"));

    let (bottom, _) = render(80, 12, max_scroll);
    assert!(buffer_text(&bottom).contains("Wheel"));
}
