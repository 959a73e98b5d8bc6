//! Bookmark record as persisted in storage.

use serde::{Deserialize, Serialize};

/// A bookmarked page.
///
/// Serialized as `{"page": 10, "date": "17/10/2026", "note": "..."}`.
/// Older collections used `verse` instead of `note`; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Bookmarked page (unvalidated until used for navigation).
    pub page: u16,

    /// Creation or last-update date, already formatted for display.
    #[serde(default)]
    pub date: String,

    /// Optional free-text note.
    #[serde(default, alias = "verse", deserialize_with = "empty_as_none")]
    pub note: Option<String>,
}

impl Bookmark {
    /// Create a bookmark, normalising a blank note to `None`.
    pub fn new(page: u16, date: impl Into<String>, note: Option<String>) -> Self {
        Self {
            page,
            date: date.into(),
            note: normalize_note(note),
        }
    }
}

/// Treat whitespace-only notes as absent.
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_note(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_note_field() {
        let bm: Bookmark =
            serde_json::from_str(r#"{"page":10,"date":"1/2/2025","note":"verse 5"}"#).unwrap();
        assert_eq!(bm, Bookmark::new(10, "1/2/2025", Some("verse 5".into())));
    }

    #[test]
    fn deserializes_legacy_verse_field() {
        let bm: Bookmark =
            serde_json::from_str(r#"{"page":3,"date":"1/2/2025","verse":"Al-Baqarah 5"}"#)
                .unwrap();
        assert_eq!(bm.note.as_deref(), Some("Al-Baqarah 5"));
    }

    #[test]
    fn empty_note_string_reads_as_none() {
        let bm: Bookmark =
            serde_json::from_str(r#"{"page":3,"date":"1/2/2025","note":""}"#).unwrap();
        assert_eq!(bm.note, None);
    }

    #[test]
    fn missing_note_and_date_default() {
        let bm: Bookmark = serde_json::from_str(r#"{"page":7}"#).unwrap();
        assert_eq!(bm.date, "");
        assert_eq!(bm.note, None);
    }

    #[test]
    fn serializes_note_under_note_key() {
        let json = serde_json::to_string(&Bookmark::new(2, "d", Some("x".into()))).unwrap();
        assert_eq!(json, r#"{"page":2,"date":"d","note":"x"}"#);
    }
}
