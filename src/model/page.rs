//! Page numbers, page bounds and reading direction.
//!
//! A `PageNumber` can only be obtained through `PageBounds`, so every page
//! held by the application is known to be inside `[1, total]`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of pages in the standard mushaf edition served by the asset host.
pub const DEFAULT_TOTAL_PAGES: u16 = 604;

/// A validated 1-based page number.
///
/// Only built through [`PageBounds::page`] or [`PageBounds::clamp`], so the
/// value always lies within the edition's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(u16);

impl PageNumber {
    /// Raw 1-based value.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive page range `[1, total]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    total: u16,
}

impl PageBounds {
    /// Smart constructor: a book needs at least one page.
    pub fn new(total: u16) -> Result<Self, InvalidPage> {
        if total == 0 {
            return Err(InvalidPage::EmptyBook);
        }
        Ok(Self { total })
    }

    /// Total page count.
    pub fn total(self) -> u16 {
        self.total
    }

    /// First page of the book.
    pub fn first(self) -> PageNumber {
        PageNumber(1)
    }

    /// Last page of the book.
    pub fn last(self) -> PageNumber {
        PageNumber(self.total)
    }

    /// Validate a raw page number.
    ///
    /// Takes `i64` so that arithmetic like `current + delta` can be checked
    /// without wrapping first.
    pub fn page(self, raw: i64) -> Result<PageNumber, InvalidPage> {
        if raw < 1 || raw > i64::from(self.total) {
            return Err(InvalidPage::OutOfRange {
                page: raw,
                total: self.total,
            });
        }
        Ok(PageNumber(raw as u16))
    }

    /// Whether the raw value is a valid page.
    pub fn contains(self, raw: i64) -> bool {
        self.page(raw).is_ok()
    }

    /// Clamp a raw value into range.
    pub fn clamp(self, raw: i64) -> PageNumber {
        PageNumber(raw.clamp(1, i64::from(self.total)) as u16)
    }

    /// Offset a page by `delta`, returning `None` when the result leaves the book.
    pub fn offset(self, page: PageNumber, delta: i64) -> Option<PageNumber> {
        self.page(i64::from(page.get()) + delta).ok()
    }
}

impl Default for PageBounds {
    fn default() -> Self {
        Self {
            total: DEFAULT_TOTAL_PAGES,
        }
    }
}

/// Errors produced when validating page numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPage {
    #[error("Page {page} is outside 1..={total}")]
    OutOfRange { page: i64, total: u16 },

    #[error("A book must have at least one page")]
    EmptyBook,
}

// ===== Direction policy =====

/// Physical side of the screen (arrow key, tap zone, or swipe target).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Logical page step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Previous,
    Next,
}

impl PageStep {
    /// Signed page delta for this step.
    pub fn delta(self) -> i64 {
        match self {
            PageStep::Previous => -1,
            PageStep::Next => 1,
        }
    }
}

/// Which physical side means "next page".
///
/// Left-to-right treats the right side (right arrow, swipe left) as next.
/// Right-to-left reverses that, matching how a printed mushaf is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl ReadingDirection {
    /// Resolve a physical side into a page step.
    pub fn step_for(self, side: Side) -> PageStep {
        match (self, side) {
            (ReadingDirection::LeftToRight, Side::Left) => PageStep::Previous,
            (ReadingDirection::LeftToRight, Side::Right) => PageStep::Next,
            (ReadingDirection::RightToLeft, Side::Left) => PageStep::Next,
            (ReadingDirection::RightToLeft, Side::Right) => PageStep::Previous,
        }
    }

    /// Side of the screen holding the given step.
    pub fn side_for(self, step: PageStep) -> Side {
        match (self, step) {
            (ReadingDirection::LeftToRight, PageStep::Previous) => Side::Left,
            (ReadingDirection::LeftToRight, PageStep::Next) => Side::Right,
            (ReadingDirection::RightToLeft, PageStep::Previous) => Side::Right,
            (ReadingDirection::RightToLeft, PageStep::Next) => Side::Left,
        }
    }

    /// Parse the kebab-case name used in config files and on the command line.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left-to-right" | "ltr" => Some(ReadingDirection::LeftToRight),
            "right-to-left" | "rtl" => Some(ReadingDirection::RightToLeft),
            _ => None,
        }
    }

    /// Kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            ReadingDirection::LeftToRight => "left-to-right",
            ReadingDirection::RightToLeft => "right-to-left",
        }
    }
}

// ===== Tests =====
