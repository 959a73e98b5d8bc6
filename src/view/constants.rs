//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header bar in lines.
///
/// Surah in progress on the left, page counter on the right.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the footer in lines.
///
/// Row 1: previous button, slider, next button. Row 2: status and hints.
pub const FOOTER_HEIGHT: u16 = 2;

/// Width of each footer navigation button, including brackets.
pub const NAV_BUTTON_WIDTH: u16 = 8;

/// Label of the retry control shown on a failed page.
pub const RETRY_LABEL: &str = "[ Retry ]";

/// Width of the surah picker and bookmark manager modals in columns.
pub const MODAL_WIDTH: u16 = 60;

/// Maximum height of a list modal as a percentage of the screen.
pub const MODAL_MAX_HEIGHT_PERCENT: u16 = 80;

/// Width percentage for help overlay popup.
///
/// Percentage of screen width (0-100) for the help overlay modal.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
///
/// Percentage of screen height (0-100) for the help overlay modal.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
