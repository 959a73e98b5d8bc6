//! Page navigation state.
//!
//! `Navigator` owns the current page, the single source of truth for which
//! page is displayed. Transitions are pure; persistence and prefetching are
//! triggered by [`AppState`](crate::state::AppState) from the returned
//! [`Transition`].

use crate::model::{PageBounds, PageNumber, PageStep, ReadingDirection, Side};

/// Default number of pages prefetched on each side of the current page.
pub const DEFAULT_PREFETCH_RADIUS: u16 = 2;

/// Result of an accepted navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Page before the move.
    pub from: PageNumber,
    /// Page after the move.
    pub to: PageNumber,
}

/// Current page plus the policies that govern moving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    bounds: PageBounds,
    current: PageNumber,
    direction: ReadingDirection,
    prefetch_radius: u16,
}

impl Navigator {
    /// Create a navigator positioned on `start`.
    pub fn new(
        bounds: PageBounds,
        start: PageNumber,
        direction: ReadingDirection,
        prefetch_radius: u16,
    ) -> Self {
        Self {
            bounds,
            current: start,
            direction,
            prefetch_radius,
        }
    }

    /// Currently displayed page.
    pub fn current(&self) -> PageNumber {
        self.current
    }

    /// Valid page range.
    pub fn bounds(&self) -> PageBounds {
        self.bounds
    }

    /// Reading direction policy.
    pub fn direction(&self) -> ReadingDirection {
        self.direction
    }

    /// Change the reading direction policy.
    pub fn set_direction(&mut self, direction: ReadingDirection) {
        self.direction = direction;
    }

    /// Move to `raw`. Out-of-range targets are ignored and return `None`.
    ///
    /// Moving to the current page is accepted (it still re-persists and
    /// re-prefetches, matching a slider that is released where it started).
    pub fn go_to(&mut self, raw: i64) -> Option<Transition> {
        let to = self.bounds.page(raw).ok()?;
        let from = self.current;
        self.current = to;
        Some(Transition { from, to })
    }

    /// Move by `delta` pages, with the same bounds check as `go_to`.
    pub fn jump(&mut self, delta: i64) -> Option<Transition> {
        self.go_to(i64::from(self.current.get()) + delta)
    }

    /// Move one logical step.
    pub fn step(&mut self, step: PageStep) -> Option<Transition> {
        self.jump(step.delta())
    }

    /// Move towards a physical side, resolved through the reading direction.
    pub fn toward(&mut self, side: Side) -> Option<Transition> {
        self.step(self.direction.step_for(side))
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current > self.bounds.first()
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.current < self.bounds.last()
    }

    /// Pages to prefetch around the current page.
    pub fn prefetch_window(&self) -> Vec<PageNumber> {
        prefetch_window(self.bounds, self.current, self.prefetch_radius)
    }
}

/// `{p - r, ..., p - 1, p + 1, ..., p + r}` intersected with the bounds,
/// nearest pages first (next before previous at equal distance).
pub fn prefetch_window(bounds: PageBounds, page: PageNumber, radius: u16) -> Vec<PageNumber> {
    let mut pages = Vec::with_capacity(usize::from(radius) * 2);
    for distance in 1..=i64::from(radius) {
        if let Some(next) = bounds.offset(page, distance) {
            pages.push(next);
        }
        if let Some(prev) = bounds.offset(page, -distance) {
            pages.push(prev);
        }
    }
    pages
}
