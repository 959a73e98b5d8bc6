//! Mouse gesture recognition and hit testing.
//!
//! Pure functions over terminal cell coordinates. The view records where it
//! drew each interactive element in [`HitRegions`]; a press/release pair is
//! classified by [`SwipeTracker`] and taps are resolved by [`hit_test`].

use crate::model::{PageBounds, PageNumber, Side};
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Default horizontal travel, in columns, that a swipe must exceed.
pub const DEFAULT_SWIPE_THRESHOLD: u16 = 4;

/// Default fraction of the page width covered by each side zone.
pub const DEFAULT_SIDE_ZONE_FRACTION: f64 = 0.3;

// ===== Tap zones =====

/// Horizontal region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Left,
    Center,
    Right,
}

/// What tapping a zone does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneAction {
    /// Turn towards the left side, resolved through the reading direction.
    TurnLeft,
    /// Turn towards the right side, resolved through the reading direction.
    TurnRight,
    /// Previous page regardless of direction.
    Previous,
    /// Next page regardless of direction.
    Next,
    /// Show or hide the header and footer.
    ToggleImmersive,
    /// Ignore taps.
    Nothing,
}

/// Tap-zone geometry and meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapZones {
    /// Fraction of the page width covered by the left zone.
    pub left_fraction: f64,
    /// Fraction of the page width covered by the right zone.
    pub right_fraction: f64,
    pub left: ZoneAction,
    pub center: ZoneAction,
    pub right: ZoneAction,
}

impl Default for TapZones {
    fn default() -> Self {
        Self {
            left_fraction: DEFAULT_SIDE_ZONE_FRACTION,
            right_fraction: DEFAULT_SIDE_ZONE_FRACTION,
            left: ZoneAction::TurnLeft,
            center: ZoneAction::ToggleImmersive,
            right: ZoneAction::TurnRight,
        }
    }
}

impl TapZones {
    /// Check that both fractions lie in `[0, 1]` and do not overlap.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("left_fraction", self.left_fraction),
            ("right_fraction", self.right_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be between 0 and 1, got {value}"));
            }
        }
        if self.left_fraction + self.right_fraction > 1.0 {
            return Err(format!(
                "left_fraction + right_fraction must not exceed 1, got {}",
                self.left_fraction + self.right_fraction
            ));
        }
        Ok(())
    }

    /// Column offsets, relative to the page area, where the center zone
    /// starts and the right zone starts.
    pub fn boundaries(&self, width: u16) -> (u16, u16) {
        let width_f = f64::from(width);
        let left_end = (width_f * self.left_fraction).round() as u16;
        let right_len = (width_f * self.right_fraction).round() as u16;
        let right_start = width.saturating_sub(right_len).max(left_end);
        (left_end.min(width), right_start)
    }

    /// Zone under `column`, or `None` outside the page horizontally.
    pub fn zone_at(&self, page: Rect, column: u16) -> Option<Zone> {
        if column < page.x || column >= page.x + page.width {
            return None;
        }
        let (left_end, right_start) = self.boundaries(page.width);
        let offset = column - page.x;
        Some(if offset < left_end {
            Zone::Left
        } else if offset >= right_start {
            Zone::Right
        } else {
            Zone::Center
        })
    }

    /// Action bound to `zone`.
    pub fn action(&self, zone: Zone) -> ZoneAction {
        match zone {
            Zone::Left => self.left,
            Zone::Center => self.center,
            Zone::Right => self.right,
        }
    }
}

// ===== Swipe =====

/// Classified press/release pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Horizontal swipe. Swiping towards the left reveals the right side.
    Swipe(Side),
    /// Press and release without enough horizontal travel, at the press position.
    Tap { column: u16, row: u16 },
}

/// Tracks the left-button press that may start a swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeTracker {
    threshold: u16,
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    /// Tracker requiring more than `threshold` columns of travel.
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    /// Record the press position.
    pub fn press(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    /// Forget the pending press.
    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Classify the release. Returns `None` without a matching press.
    ///
    /// A swipe needs horizontal travel greater than the threshold and
    /// greater than the vertical travel.
    pub fn release(&mut self, column: u16, row: u16) -> Option<Gesture> {
        let (start_col, start_row) = self.start.take()?;
        let dx = i32::from(start_col) - i32::from(column);
        let dy = (i32::from(start_row) - i32::from(row)).abs();

        if dx.abs() > i32::from(self.threshold) && dx.abs() > dy {
            let side = if dx > 0 { Side::Right } else { Side::Left };
            return Some(Gesture::Swipe(side));
        }
        Some(Gesture::Tap {
            column: start_col,
            row: start_row,
        })
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

// ===== Slider =====

/// Page selected by clicking `column` on a slider drawn in `track`.
///
/// The track maps linearly onto `[1, total]`; columns outside the track are
/// clamped to its ends.
pub fn slider_page(track: Rect, column: u16, bounds: PageBounds) -> PageNumber {
    if track.width <= 1 {
        return bounds.first();
    }
    let last_col = track.x + track.width - 1;
    let offset = i64::from(column.clamp(track.x, last_col) - track.x);
    let span = i64::from(track.width - 1);
    let pages = i64::from(bounds.total()) - 1;
    bounds.clamp(1 + (offset * pages + span / 2) / span)
}

/// Column offset of the slider thumb for `page` on a track `width` wide.
pub fn slider_offset(width: u16, page: PageNumber, bounds: PageBounds) -> u16 {
    if width <= 1 || bounds.total() <= 1 {
        return 0;
    }
    let span = i64::from(width - 1);
    let pages = i64::from(bounds.total()) - 1;
    let offset = (i64::from(page.get()) - 1) * span;
    ((offset + pages / 2) / pages) as u16
}

// ===== Hit testing =====

/// Screen areas of every interactive element in the last drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub prev_button: Option<Rect>,
    pub next_button: Option<Rect>,
    pub slider: Option<Rect>,
    pub retry_button: Option<Rect>,
    pub page: Option<Rect>,
    /// Whole modal popup, when one is open.
    pub modal: Option<Rect>,
    /// Rows of the modal list, when one is open.
    pub modal_list: Option<Rect>,
    /// Index of the item drawn on the first row of `modal_list`.
    pub modal_list_offset: usize,
}

/// What a tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    PrevButton,
    NextButton,
    Slider,
    RetryButton,
    Page(Zone),
    /// Row `index` of the open modal's list.
    ModalItem(usize),
    /// Inside the modal but not on a list row.
    ModalChrome,
    /// Outside the open modal.
    ModalBackdrop,
    Nothing,
}

fn contains(area: Option<Rect>, column: u16, row: u16) -> bool {
    area.is_some_and(|r| {
        column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
    })
}

/// Resolve a tap.
///
/// An open modal captures every tap. Otherwise footer buttons come first,
/// then the slider, the retry button and finally the page zones.
pub fn hit_test(regions: &HitRegions, zones: &TapZones, column: u16, row: u16) -> HitTarget {
    if let Some(modal) = regions.modal {
        if let Some(list) = regions.modal_list.filter(|_| contains(regions.modal_list, column, row)) {
            return HitTarget::ModalItem(regions.modal_list_offset + usize::from(row - list.y));
        }
        return if contains(Some(modal), column, row) {
            HitTarget::ModalChrome
        } else {
            HitTarget::ModalBackdrop
        };
    }

    if contains(regions.prev_button, column, row) {
        return HitTarget::PrevButton;
    }
    if contains(regions.next_button, column, row) {
        return HitTarget::NextButton;
    }
    if contains(regions.slider, column, row) {
        return HitTarget::Slider;
    }
    if contains(regions.retry_button, column, row) {
        return HitTarget::RetryButton;
    }
    if let Some(page) = regions.page.filter(|_| contains(regions.page, column, row)) {
        if let Some(zone) = zones.zone_at(page, column) {
            return HitTarget::Page(zone);
        }
    }
    HitTarget::Nothing
}

// ===== Tests =====

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
