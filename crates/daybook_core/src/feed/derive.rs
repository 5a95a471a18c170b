//! Feed derivation: search filter, recency sort, day grouping.
//!
//! # Responsibility
//! - Filter notes by case-insensitive substring match across user-visible
//!   fields.
//! - Sort by last-updated timestamp, newest first.
//! - Section the sorted sequence by day key.
//!
//! # Invariants
//! - Ordering compares parsed timestamps, not raw strings, so cross-month
//!   boundaries order correctly. Unparseable timestamps sort after all valid
//!   ones; the sort is stable, so their relative base order survives.
//! - Notes with a malformed `date_updated` group under the empty day key
//!   rather than being dropped.

use crate::model::note::{Note, DATE_UPDATED_FORMAT};
use chrono::NaiveDateTime;

/// One day section of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    /// `DD-MM-YYYY` day key; empty for notes with a malformed timestamp.
    pub day: String,
    /// Notes of that day, newest first.
    pub notes: Vec<Note>,
}

/// The complete derived view: day sections, newest day first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFeed {
    pub groups: Vec<DayGroup>,
}

impl NoteFeed {
    /// Total note count across all sections.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.notes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Derives the day-sectioned feed from the full stored set.
///
/// Steps: filter by `query` (empty query keeps everything), sort descending
/// by parsed `date_updated`, then group by day key in first-occurrence order.
/// Within a group the sorted order is preserved.
pub fn derive_feed(notes: &[Note], query: &str) -> NoteFeed {
    let mut candidates: Vec<&Note> = if query.is_empty() {
        notes.iter().collect()
    } else {
        notes
            .iter()
            .filter(|note| matches_query(note, query))
            .collect()
    };

    candidates.sort_by(|a, b| parse_updated(b).cmp(&parse_updated(a)));

    let mut groups: Vec<DayGroup> = Vec::new();
    for note in candidates {
        let day = note.day_key();
        match groups.iter_mut().find(|group| group.day == day) {
            Some(group) => group.notes.push(note.clone()),
            None => groups.push(DayGroup {
                day,
                notes: vec![note.clone()],
            }),
        }
    }

    NoteFeed { groups }
}

/// Whether any searchable field contains `query`, ignoring case.
///
/// Searchable fields: note, title, description, location, date, time. The
/// image URI is deliberately not searched.
pub fn matches_query(note: &Note, query: &str) -> bool {
    let needle = query.to_lowercase();
    [
        note.note.as_str(),
        note.title.as_str(),
        note.description.as_str(),
        note.location.as_str(),
        note.date.as_str(),
        note.time.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn parse_updated(note: &Note) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&note.date_updated, DATE_UPDATED_FORMAT).ok()
}
