//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/get/list persistence over the `notes`
//!   table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `insert` assigns the id; callers never choose one.
//! - `update` replaces the whole row and reports `NotFound` for missing ids.
//! - `delete` is an idempotent no-op for missing ids.
//! - `list_all` returns a stable `date_updated DESC, id ASC` base ordering;
//!   final presentation ordering belongs to the feed engine.

use crate::db::DbError;
use crate::model::note::{Note, NoteDraft, NoteId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    note,
    title,
    description,
    time,
    date,
    location,
    image_uri,
    date_updated
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error for note storage operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Stores a new record and returns the storage-assigned id.
    fn insert(&self, draft: &NoteDraft) -> RepoResult<NoteId>;
    /// Replaces the stored record matching `note.id` entirely.
    ///
    /// Fails with [`RepoError::NotFound`] when no such record exists.
    fn update(&self, note: &Note) -> RepoResult<()>;
    /// Removes the record matching `note.id`. No-op when already gone.
    fn delete(&self, note: &Note) -> RepoResult<()>;
    /// Point lookup. A missing id is `Ok(None)`.
    fn get_by_id(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Returns all records, newest `date_updated` first.
    fn list_all(&self) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
#[derive(Debug)]
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert(&self, draft: &NoteDraft) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (
                note,
                title,
                description,
                time,
                date,
                location,
                image_uri,
                date_updated
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                draft.note.as_str(),
                draft.title.as_str(),
                draft.description.as_str(),
                draft.time.as_str(),
                draft.date.as_str(),
                draft.location.as_str(),
                draft.image_uri.as_deref(),
                draft.date_updated.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, note: &Note) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                note = ?1,
                title = ?2,
                description = ?3,
                time = ?4,
                date = ?5,
                location = ?6,
                image_uri = ?7,
                date_updated = ?8
             WHERE id = ?9;",
            params![
                note.note.as_str(),
                note.title.as_str(),
                note.description.as_str(),
                note.time.as_str(),
                note.date.as_str(),
                note.location.as_str(),
                note.image_uri.as_deref(),
                note.date_updated.as_str(),
                note.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        Ok(())
    }

    fn delete(&self, note: &Note) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1;", [note.id])?;
        Ok(())
    }

    fn get_by_id(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY date_updated DESC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    Ok(Note {
        id: row.get("id")?,
        note: row.get("note")?,
        title: row.get("title")?,
        description: row.get("description")?,
        time: row.get("time")?,
        date: row.get("date")?,
        location: row.get("location")?,
        image_uri: row.get("image_uri")?,
        date_updated: row.get("date_updated")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingRequiredTable("notes"));
    }

    for column in [
        "id",
        "note",
        "title",
        "description",
        "time",
        "date",
        "location",
        "image_uri",
        "date_updated",
    ] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
