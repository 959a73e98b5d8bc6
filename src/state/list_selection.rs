//! Selection and scroll offset for modal lists.

/// Selected row plus scroll offset of a list whose length is owned elsewhere.
///
/// Every method that depends on the length takes it as an argument, so the
/// list may shrink (filtering, deletion) between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSelection {
    selected: usize,
    scroll_offset: usize,
}

impl ListSelection {
    /// Selection on `index`, scrolled to the top.
    pub fn at(index: usize) -> Self {
        Self {
            selected: index,
            scroll_offset: 0,
        }
    }

    /// Currently selected index (may exceed a list that just shrank).
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Selected index validated against `len`.
    pub fn selected_in(&self, len: usize) -> Option<usize> {
        (self.selected < len).then_some(self.selected)
    }

    /// Move selection up, clamping at 0.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down, clamping at `len - 1`.
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self, len: usize) {
        if len > 0 {
            self.selected = len - 1;
        }
    }

    /// Select `index` if it exists.
    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.selected = index;
        }
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.selected);
    }

    /// First visible row.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Update the scroll offset so the selection is visible.
    pub fn adjust_scroll(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selected - visible_rows + 1;
        }
    }
}
