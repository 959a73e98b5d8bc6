//! Domain-level keyboard actions independent of key bindings.

use serde::de::IntoDeserializer;
use serde::Deserialize;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
///
/// Names are kebab-case in the `[keybindings]` config table
/// (`page-left`, `open-surah-picker`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyAction {
    // Physical sides, resolved through the reading direction
    /// Turn towards the left side of the book. Default: ←/h
    PageLeft,
    /// Turn towards the right side of the book. Default: →/l
    PageRight,

    // Logical steps, independent of reading direction
    /// Next page. Default: n/Space/Page Down
    NextPage,
    /// Previous page. Default: p/Backspace/Page Up
    PrevPage,
    /// Jump forward by the configured amount. Default: ]
    JumpForward,
    /// Jump back by the configured amount. Default: [
    JumpBack,
    /// First page. Default: Home/g
    FirstPage,
    /// Last page. Default: End/G
    LastPage,

    // Modals
    /// Open the surah picker. Default: s
    OpenSurahPicker,
    /// Open the bookmark manager. Default: b
    OpenBookmarks,
    /// Bookmark the current page without opening the manager. Default: m
    QuickBookmark,

    // Preferences
    /// Toggle dark/light theme. Default: t
    ToggleTheme,
    /// Toggle immersive mode. Default: i/f
    ToggleImmersive,
    /// Toggle keep-awake. Default: w
    ToggleWakeLock,

    // Page loading
    /// Retry loading the current page. Default: r
    RetryPage,

    // Application
    /// Show or hide the help overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Parse a kebab-case action name.
    pub fn from_name(name: &str) -> Option<Self> {
        let deserializer: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
            name.trim().into_deserializer();
        Self::deserialize(deserializer).ok()
    }
}
