//! Note domain model.
//!
//! # Responsibility
//! - Define the journal entry record and its unsaved draft counterpart.
//! - Derive the day grouping key from the last-updated timestamp.
//!
//! # Invariants
//! - `id` is assigned by storage on first insert and never changes.
//! - `date_updated` carries `DD-MM-YYYY HH:mm:ss` text; day-key derivation
//!   degrades to an empty string on malformed input instead of failing.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stable identifier for a persisted note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// `0` means "not yet persisted" and must never target a write.
pub type NoteId = i64;

/// Timestamp format stored in `date_updated`.
pub const DATE_UPDATED_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Day grouping key format derived from `date_updated`.
pub const DAY_KEY_FORMAT: &str = "%d-%m-%Y";

/// A single journal entry.
///
/// All date/time fields are caller-formatted text: the presentation layer
/// owns its own pickers and hands the core already-rendered strings. Storage
/// never reinterprets them beyond ordering and day-key derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Storage-assigned id, unique across all records.
    pub id: NoteId,
    /// The note body. Required.
    pub note: String,
    /// Entry title. Required by UI convention, not enforced by storage.
    pub title: String,
    /// Longer free-form description. May be empty.
    pub description: String,
    /// Entry time as `HH:MM` 24-hour text.
    pub time: String,
    /// Entry date as `DD-MM-YYYY` text.
    pub date: String,
    /// Free-form location. May be empty.
    pub location: String,
    /// Opaque URI of an externally stored photo, when one was attached.
    pub image_uri: Option<String>,
    /// Last create/edit timestamp as `DD-MM-YYYY HH:mm:ss` text.
    ///
    /// Set to "now" at creation; callers refresh it on every edit. Storage
    /// does not auto-update it.
    pub date_updated: String,
}

impl Note {
    /// Returns the `DD-MM-YYYY` grouping key for this note.
    ///
    /// See [`day_key`] for the degradation contract.
    pub fn day_key(&self) -> String {
        day_key(&self.date_updated)
    }

    /// Whether this record carries a storage-assigned identity.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// All-empty record with id 0.
    ///
    /// Used by presentation code as the initial value before a real record
    /// loads. Never a valid target for update/delete.
    pub fn placeholder() -> Self {
        Self {
            id: 0,
            note: String::new(),
            title: String::new(),
            description: String::new(),
            time: String::new(),
            date: String::new(),
            location: String::new(),
            image_uri: None,
            date_updated: String::new(),
        }
    }
}

/// A note that has not been persisted yet: every field except the id.
///
/// Input shape for [`crate::repo::note_repo::NoteRepository::insert`] and the
/// facade create path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub note: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub date: String,
    pub location: String,
    pub image_uri: Option<String>,
    /// Left empty by most callers; the facade stamps "now" before insert.
    pub date_updated: String,
}

impl NoteDraft {
    /// Builds a draft from the per-field shape the presentation layer uses.
    ///
    /// `date_updated` starts empty and is stamped by the facade at enqueue
    /// time.
    pub fn new(
        title: impl Into<String>,
        note: impl Into<String>,
        description: impl Into<String>,
        time: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
        image_uri: Option<String>,
    ) -> Self {
        Self {
            note: note.into(),
            title: title.into(),
            description: description.into(),
            time: time.into(),
            date: date.into(),
            location: location.into(),
            image_uri,
            date_updated: String::new(),
        }
    }

    /// Promotes this draft to a full record once storage assigned an id.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            note: self.note,
            title: self.title,
            description: self.description,
            time: self.time,
            date: self.date,
            location: self.location,
            image_uri: self.image_uri,
            date_updated: self.date_updated,
        }
    }
}

/// Derives the `DD-MM-YYYY` day key from a `DD-MM-YYYY HH:mm:ss` timestamp.
///
/// Returns an empty string for empty or unparseable input. Never fails: the
/// key is a grouping label, not a chronological value, and a malformed
/// timestamp must not break list rendering.
pub fn day_key(date_updated: &str) -> String {
    if date_updated.is_empty() {
        return String::new();
    }

    match NaiveDateTime::parse_from_str(date_updated, DATE_UPDATED_FORMAT) {
        Ok(parsed) => parsed.format(DAY_KEY_FORMAT).to_string(),
        Err(_) => String::new(),
    }
}

/// Returns "now" rendered in the `date_updated` storage format (local time).
pub fn current_timestamp() -> String {
    Local::now().format(DATE_UPDATED_FORMAT).to_string()
}
