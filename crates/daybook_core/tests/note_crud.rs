use daybook_core::db::open_db_in_memory;
use daybook_core::{Note, NoteDraft, NoteRepository, RepoError, SqliteNoteRepository};

fn draft(title: &str, date_updated: &str) -> NoteDraft {
    let mut draft = NoteDraft::new(
        title,
        "short body",
        "a longer description",
        "10:30",
        "02-01-2024",
        "Paris",
        Some("content://media/42".to_string()),
    );
    draft.date_updated = date_updated.to_string();
    draft
}

#[test]
fn insert_and_get_roundtrip_preserves_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let draft = draft("Trip", "02-01-2024 10:30:00");
    let id = repo.insert(&draft).unwrap();
    assert!(id > 0);

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, draft.into_note(id));
}

#[test]
fn insert_assigns_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let first = repo.insert(&draft("First", "01-01-2024 09:00:00")).unwrap();
    let second = repo.insert(&draft("Second", "01-01-2024 09:00:01")).unwrap();
    assert_ne!(first, second);
}

#[test]
fn update_replaces_the_full_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert(&draft("Draft", "02-01-2024 10:30:00")).unwrap();
    let mut note = repo.get_by_id(id).unwrap().unwrap();

    note.title = "Renamed".to_string();
    // Omitting a field in the replacement clears it: no patch semantics.
    note.image_uri = None;
    repo.update(&note).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Renamed");
    assert_eq!(loaded.image_uri, None);
    assert_eq!(loaded.note, "short body");
    assert_eq!(loaded.description, "a longer description");
    assert_eq!(loaded.location, "Paris");
}

#[test]
fn update_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut ghost = Note::placeholder();
    ghost.id = 999;
    ghost.note = "never stored".to_string();

    let err = repo.update(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));
}

#[test]
fn delete_is_an_idempotent_no_op_for_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert(&draft("Doomed", "02-01-2024 10:30:00")).unwrap();
    let note = repo.get_by_id(id).unwrap().unwrap();

    repo.delete(&note).unwrap();
    repo.delete(&note).unwrap();

    assert_eq!(repo.get_by_id(id).unwrap(), None);
    assert!(repo.list_all().unwrap().iter().all(|n| n.id != id));
}

#[test]
fn get_by_id_reports_missing_rows_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_by_id(12345).unwrap(), None);
}

#[test]
fn list_all_orders_by_date_updated_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let older = repo.insert(&draft("Older", "01-01-2024 09:00:00")).unwrap();
    let newest = repo.insert(&draft("Newest", "03-01-2024 09:00:00")).unwrap();
    let middle = repo.insert(&draft("Middle", "02-01-2024 09:00:00")).unwrap();

    let listed = repo.list_all().unwrap();
    let ids: Vec<i64> = listed.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![newest, middle, older]);
}

#[test]
fn list_all_breaks_timestamp_ties_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let first = repo.insert(&draft("First", "02-01-2024 09:00:00")).unwrap();
    let second = repo.insert(&draft("Second", "02-01-2024 09:00:00")).unwrap();

    let ids: Vec<i64> = repo.list_all().unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn repository_rejects_unmigrated_connections() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteNoteRepository::try_new(&conn).unwrap_err();
    assert!(matches!(err, RepoError::MissingRequiredTable("notes")));
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("journal.sqlite");

    let id = {
        let conn = daybook_core::db::open_db(&db_path).unwrap();
        let repo = SqliteNoteRepository::try_new(&conn).unwrap();
        repo.insert(&draft("Durable", "02-01-2024 10:30:00")).unwrap()
    };

    let conn = daybook_core::db::open_db(&db_path).unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Durable");
}
