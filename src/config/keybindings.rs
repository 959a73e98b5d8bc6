//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Key identity used for lookup: code plus modifiers.
///
/// Shift is dropped for character keys because the character already
/// carries the case (`G` arrives as `Char('G')` with or without SHIFT
/// depending on the terminal).
type KeyId = (KeyCode, KeyModifiers);

fn key_id(code: KeyCode, modifiers: KeyModifiers) -> KeyId {
    let mut modifiers = modifiers;
    if matches!(code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    (code, modifiers)
}

/// Maps keyboard events to domain actions.
///
/// Provides default bindings with option to override via the
/// `[keybindings]` config table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyId, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key_id(key.code, key.modifiers)).copied()
    }

    /// Bind `code` with `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(key_id(code, modifiers), action);
    }

    /// Apply overrides from configuration.
    ///
    /// Each listed action loses its default keys and gets exactly the keys
    /// given. Key specs look like `x`, `ctrl+n`, `PageDown` or `shift+tab`.
    ///
    /// # Errors
    ///
    /// Returns the offending spec if a key cannot be parsed.
    pub fn with_overrides(
        mut self,
        overrides: &HashMap<KeyAction, Vec<String>>,
    ) -> Result<Self, String> {
        for (action, specs) in overrides {
            let parsed = specs
                .iter()
                .map(|spec| parse_key_spec(spec).ok_or_else(|| spec.clone()))
                .collect::<Result<Vec<_>, _>>()?;

            self.bindings.retain(|_, bound| bound != action);
            for (code, modifiers) in parsed {
                self.bind(code, modifiers, *action);
            }
        }
        Ok(self)
    }

    /// Keys bound to `action`, for the help overlay.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|((code, modifiers), _)| describe_key(*code, *modifiers))
            .collect();
        keys.sort();
        keys
    }
}

/// Parse a key spec such as `ctrl+n` or `PageDown`.
pub fn parse_key_spec(spec: &str) -> Option<(KeyCode, KeyModifiers)> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }
    // A lone "+" is the plus key, not a separator.
    if spec == "+" {
        return Some((KeyCode::Char('+'), KeyModifiers::NONE));
    }

    let mut parts: Vec<&str> = spec.split('+').collect();
    let key = parts.pop()?;
    let mut modifiers = KeyModifiers::NONE;
    for part in parts {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let mut chars = key.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => match key.to_ascii_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            _ => return None,
        },
    };
    Some((code, modifiers))
}

fn describe_key(code: KeyCode, modifiers: KeyModifiers) -> String {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        other => format!("{other:?}"),
    };
    let mut prefix = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        prefix.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        prefix.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        prefix.push_str("Shift+");
    }
    format!("{prefix}{name}")
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Physical sides
        bindings.bind(KeyCode::Left, none, KeyAction::PageLeft);
        bindings.bind(KeyCode::Char('h'), none, KeyAction::PageLeft);
        bindings.bind(KeyCode::Right, none, KeyAction::PageRight);
        bindings.bind(KeyCode::Char('l'), none, KeyAction::PageRight);

        // Logical steps
        bindings.bind(KeyCode::Char('n'), none, KeyAction::NextPage);
        bindings.bind(KeyCode::Char(' '), none, KeyAction::NextPage);
        bindings.bind(KeyCode::PageDown, none, KeyAction::NextPage);
        bindings.bind(KeyCode::Char('p'), none, KeyAction::PrevPage);
        bindings.bind(KeyCode::Backspace, none, KeyAction::PrevPage);
        bindings.bind(KeyCode::PageUp, none, KeyAction::PrevPage);
        bindings.bind(KeyCode::Char(']'), none, KeyAction::JumpForward);
        bindings.bind(KeyCode::Char('['), none, KeyAction::JumpBack);
        bindings.bind(KeyCode::Home, none, KeyAction::FirstPage);
        bindings.bind(KeyCode::Char('g'), none, KeyAction::FirstPage);
        bindings.bind(KeyCode::End, none, KeyAction::LastPage);
        bindings.bind(KeyCode::Char('G'), none, KeyAction::LastPage);

        // Modals
        bindings.bind(KeyCode::Char('s'), none, KeyAction::OpenSurahPicker);
        bindings.bind(KeyCode::Char('b'), none, KeyAction::OpenBookmarks);
        bindings.bind(KeyCode::Char('m'), none, KeyAction::QuickBookmark);

        // Preferences
        bindings.bind(KeyCode::Char('t'), none, KeyAction::ToggleTheme);
        bindings.bind(KeyCode::Char('i'), none, KeyAction::ToggleImmersive);
        bindings.bind(KeyCode::Char('f'), none, KeyAction::ToggleImmersive);
        bindings.bind(KeyCode::Char('w'), none, KeyAction::ToggleWakeLock);

        bindings.bind(KeyCode::Char('r'), none, KeyAction::RetryPage);

        // Application controls
        bindings.bind(KeyCode::Char('?'), none, KeyAction::Help);
        bindings.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        bindings.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        bindings
    }
}
