//! State for the surah picker modal.

use super::list_selection::ListSelection;
use crate::model::surah::{self, Surah};

/// Search-filterable list of surahs.
///
/// The filtered list is recomputed from the query on demand; only the query
/// and the selection are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurahPickerState {
    visible: bool,
    query: String,
    selection: ListSelection,
}

impl SurahPickerState {
    /// Create closed picker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if picker is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open with an empty query, selecting the surah in progress on `page`.
    pub fn open(&mut self, page: u16) {
        self.visible = true;
        self.query.clear();
        let current = surah::surah_at_page(page);
        self.selection = ListSelection::at(usize::from(current.number) - 1);
    }

    /// Close the picker. The query is kept until the next `open`.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Append a character to the query.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.selection = ListSelection::default();
    }

    /// Delete the last character of the query.
    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.selection = ListSelection::default();
        }
    }

    /// Surahs matching the query, in number order.
    pub fn matches(&self) -> Vec<&'static Surah> {
        surah::filter(&self.query)
    }

    /// Selection within the filtered list.
    pub fn selection(&self) -> &ListSelection {
        &self.selection
    }

    /// Mutable selection within the filtered list.
    pub fn selection_mut(&mut self) -> &mut ListSelection {
        &mut self.selection
    }

    /// Selected surah, if the filtered list is non-empty.
    pub fn selected_surah(&self) -> Option<&'static Surah> {
        let matches = self.matches();
        self.selection
            .selected_in(matches.len())
            .map(|index| matches[index])
    }
}
