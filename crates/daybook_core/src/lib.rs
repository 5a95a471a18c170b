//! Core domain logic for Daybook, a personal journaling application.
//! This crate is the single source of truth for note persistence and the
//! derived day-sectioned feed; presentation layers render what it returns.

pub mod db;
pub mod feed;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use feed::derive::{derive_feed, matches_query, DayGroup, NoteFeed};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{current_timestamp, day_key, Note, NoteDraft, NoteId};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::journal::{JournalService, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
