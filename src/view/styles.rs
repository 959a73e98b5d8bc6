//! Colour palettes for the light and dark themes.

use crate::state::Theme;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colours are disabled by the `--no-color` flag or the `NO_COLOR`
/// environment variable; both are folded into `ResolvedConfig::no_color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colours enabled unless `no_color` is set.
    pub fn from_no_color(no_color: bool) -> Self {
        Self { enabled: !no_color }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::from_no_color(false)
    }
}

// ===== Palette =====

/// Every style the reader draws with.
///
/// Without colours, only modifiers remain so that selection and disabled
/// controls stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Style,
    pub muted: Style,
    pub accent: Style,
    pub heading: Style,
    pub error: Style,
    pub button: Style,
    pub button_disabled: Style,
    pub highlight: Style,
    pub slider_track: Style,
    pub slider_thumb: Style,
    pub key: Style,
}

impl Palette {
    /// Palette for `theme`.
    pub fn new(theme: Theme, colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            return Self::monochrome();
        }
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                muted: Style::default().fg(Color::DarkGray).bg(Color::White),
                accent: Style::default().fg(Color::Blue).bg(Color::White),
                heading: Style::default()
                    .fg(Color::Blue)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
                error: Style::default().fg(Color::Red).bg(Color::White),
                button: Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                button_disabled: Style::default().fg(Color::Gray).bg(Color::White),
                highlight: Style::default().fg(Color::White).bg(Color::Blue),
                slider_track: Style::default().fg(Color::Gray).bg(Color::White),
                slider_thumb: Style::default()
                    .fg(Color::Blue)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
                key: Style::default()
                    .fg(Color::Magenta)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::Gray).bg(Color::Black),
                muted: Style::default().fg(Color::DarkGray).bg(Color::Black),
                accent: Style::default().fg(Color::Cyan).bg(Color::Black),
                heading: Style::default()
                    .fg(Color::Cyan)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                error: Style::default().fg(Color::LightRed).bg(Color::Black),
                button: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                button_disabled: Style::default().fg(Color::DarkGray).bg(Color::Black),
                highlight: Style::default().fg(Color::Black).bg(Color::Cyan),
                slider_track: Style::default().fg(Color::DarkGray).bg(Color::Black),
                slider_thumb: Style::default()
                    .fg(Color::Cyan)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                key: Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            },
        }
    }

    fn monochrome() -> Self {
        let plain = Style::default();
        Self {
            base: plain,
            muted: plain.add_modifier(Modifier::DIM),
            accent: plain,
            heading: plain.add_modifier(Modifier::BOLD),
            error: plain.add_modifier(Modifier::BOLD),
            button: plain.add_modifier(Modifier::REVERSED),
            button_disabled: plain.add_modifier(Modifier::DIM),
            highlight: plain.add_modifier(Modifier::REVERSED),
            slider_track: plain.add_modifier(Modifier::DIM),
            slider_thumb: plain.add_modifier(Modifier::BOLD),
            key: plain.add_modifier(Modifier::BOLD),
        }
    }
}
