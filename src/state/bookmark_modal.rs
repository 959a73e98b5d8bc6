//! State for the bookmark manager modal.

use super::list_selection::ListSelection;

/// Bookmark list plus the optional note prompt.
///
/// The bookmarks themselves live in storage; this only tracks what the
/// modal shows and what the user is typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkModalState {
    visible: bool,
    selection: ListSelection,
    /// Note being typed for the current page, when the prompt is open.
    note_input: Option<String>,
}

impl BookmarkModalState {
    /// Create closed modal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if modal is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open with the first bookmark selected.
    pub fn open(&mut self) {
        self.visible = true;
        self.selection = ListSelection::default();
        self.note_input = None;
    }

    /// Close the modal, discarding any unfinished note.
    pub fn close(&mut self) {
        self.visible = false;
        self.note_input = None;
    }

    /// Selection within the bookmark list.
    pub fn selection(&self) -> &ListSelection {
        &self.selection
    }

    /// Mutable selection within the bookmark list.
    pub fn selection_mut(&mut self) -> &mut ListSelection {
        &mut self.selection
    }

    /// Whether the note prompt is open.
    pub fn is_editing(&self) -> bool {
        self.note_input.is_some()
    }

    /// Text typed so far in the note prompt.
    pub fn note_input(&self) -> Option<&str> {
        self.note_input.as_deref()
    }

    /// Open the note prompt, pre-filled with `initial`.
    pub fn begin_note(&mut self, initial: Option<&str>) {
        self.note_input = Some(initial.unwrap_or_default().to_string());
    }

    /// Append a character to the note.
    pub fn push_char(&mut self, c: char) {
        if let Some(note) = self.note_input.as_mut() {
            note.push(c);
        }
    }

    /// Delete the last character of the note.
    pub fn pop_char(&mut self) {
        if let Some(note) = self.note_input.as_mut() {
            note.pop();
        }
    }

    /// Close the prompt and return what was typed.
    pub fn finish_note(&mut self) -> Option<String> {
        self.note_input.take()
    }

    /// Close the prompt without saving.
    pub fn cancel_note(&mut self) {
        self.note_input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_resets_selection_and_prompt() {
        let mut modal = BookmarkModalState::new();
        modal.open();
        modal.selection_mut().select(2, 5);
        modal.begin_note(None);

        modal.close();
        modal.open();

        assert!(modal.is_visible());
        assert_eq!(modal.selection().selected(), 0);
        assert!(!modal.is_editing());
    }

    #[test]
    fn note_prompt_collects_typed_text() {
        let mut modal = BookmarkModalState::new();
        modal.open();
        modal.begin_note(Some("ayat"));
        for c in " 5x".chars() {
            modal.push_char(c);
        }
        modal.pop_char();

        assert_eq!(modal.note_input(), Some("ayat 5"));
        assert_eq!(modal.finish_note().as_deref(), Some("ayat 5"));
        assert!(!modal.is_editing());
    }

    #[test]
    fn typing_without_prompt_is_ignored() {
        let mut modal = BookmarkModalState::new();
        modal.open();
        modal.push_char('x');
        assert_eq!(modal.note_input(), None);
    }

    #[test]
    fn cancel_discards_note() {
        let mut modal = BookmarkModalState::new();
        modal.open();
        modal.begin_note(None);
        modal.push_char('a');
        modal.cancel_note();
        assert_eq!(modal.finish_note(), None);
    }
}
