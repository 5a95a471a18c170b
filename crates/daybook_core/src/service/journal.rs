//! Journal facade: the operation surface the presentation layer calls.
//!
//! # Responsibility
//! - Dispatch create/update/delete to a background writer without blocking
//!   the caller.
//! - Serve awaited point lookups for detail/edit flows.
//! - Publish a full note snapshot to subscribers after every successful
//!   mutation.
//!
//! # Invariants
//! - A single writer thread owns the connection and serializes all storage
//!   operations.
//! - Placeholder records (id 0) never reach a write path.
//! - A failed write logs an error and publishes nothing; the previous
//!   snapshot stays current.

use crate::feed::derive::{derive_feed, NoteFeed};
use crate::model::note::{current_timestamp, Note, NoteDraft, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
use log::{error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot, watch};

/// Facade-layer error.
#[derive(Debug)]
pub enum ServiceError {
    /// Persistence-layer failure surfaced through an awaited call.
    Repo(RepoError),
    /// The writer thread is gone; the service was closed or crashed.
    WorkerGone,
    /// The writer thread could not be spawned.
    WorkerSpawn(std::io::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::WorkerGone => write!(f, "journal writer is no longer running"),
            Self::WorkerSpawn(err) => write!(f, "failed to spawn journal writer: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::WorkerGone => None,
            Self::WorkerSpawn(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

enum Command {
    Create(NoteDraft),
    Update(Note),
    Delete(Note),
    Get(NoteId, oneshot::Sender<RepoResult<Option<Note>>>),
}

/// Asynchronous facade over note storage.
///
/// Mutations are fire-and-forget: the caller enqueues and returns
/// immediately, and must not assume completion ordering relative to its own
/// subsequent reads unless it awaits [`JournalService::get_note`] or a
/// [`JournalService::notes`] notification.
pub struct JournalService {
    commands: mpsc::UnboundedSender<Command>,
    notes_rx: watch::Receiver<Vec<Note>>,
    worker: Option<JoinHandle<()>>,
}

impl JournalService {
    /// Starts the facade over an opened, migrated connection.
    ///
    /// The connection moves onto a dedicated writer thread; the caller keeps
    /// only this handle. Lifecycle is owned by the process entry point that
    /// constructed the connection.
    pub fn start(conn: Connection) -> Result<Self, ServiceError> {
        let initial = {
            let repo = SqliteNoteRepository::try_new(&conn)?;
            repo.list_all()?
        };

        let (commands, command_rx) = mpsc::unbounded_channel();
        let (notes_tx, notes_rx) = watch::channel(initial);

        let worker = std::thread::Builder::new()
            .name("daybook-writer".to_string())
            .spawn(move || run_writer(conn, command_rx, notes_tx))
            .map_err(ServiceError::WorkerSpawn)?;

        info!("event=service_start module=service status=ok");
        Ok(Self {
            commands,
            notes_rx,
            worker: Some(worker),
        })
    }

    /// Enqueues a new note for insertion. Fire-and-forget.
    ///
    /// Stamps `date_updated` with "now" when the draft left it empty, so the
    /// per-field call shape needs no timestamp handling in the UI.
    pub fn create_note(&self, mut draft: NoteDraft) {
        if draft.date_updated.is_empty() {
            draft.date_updated = current_timestamp();
        }
        self.dispatch(Command::Create(draft));
    }

    /// Enqueues a full-record replacement. Fire-and-forget.
    ///
    /// The caller supplies every field including the preserved id; there are
    /// no partial-patch semantics. Placeholder records are dropped.
    pub fn update_note(&self, note: Note) {
        if !note.is_persisted() {
            warn!("event=note_update module=service status=rejected reason=placeholder_id");
            return;
        }
        self.dispatch(Command::Update(note));
    }

    /// Enqueues a deletion. Fire-and-forget, idempotent at the gateway.
    pub fn delete_note(&self, note: Note) {
        if !note.is_persisted() {
            warn!("event=note_delete module=service status=rejected reason=placeholder_id");
            return;
        }
        self.dispatch(Command::Delete(note));
    }

    /// Awaited point lookup; completes before detail/edit screens render.
    ///
    /// A missing id is `Ok(None)`, never an error.
    pub async fn get_note(&self, id: NoteId) -> Result<Option<Note>, ServiceError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Get(id, reply_tx))
            .map_err(|_| ServiceError::WorkerGone)?;

        let result = reply_rx.await.map_err(|_| ServiceError::WorkerGone)?;
        Ok(result?)
    }

    /// The observable note list.
    ///
    /// Every successful mutation publishes a full fresh snapshot in the
    /// gateway's base ordering; subscribers re-render from whole snapshots,
    /// no diffing involved.
    pub fn notes(&self) -> watch::Receiver<Vec<Note>> {
        self.notes_rx.clone()
    }

    /// Derives the day-sectioned feed from the current snapshot.
    ///
    /// Convenience over [`derive_feed`] for callers that do not hold their
    /// own subscription.
    pub fn feed(&self, query: &str) -> NoteFeed {
        derive_feed(&self.notes_rx.borrow(), query)
    }

    /// Shuts the writer down and waits for in-flight commands to drain.
    pub fn close(mut self) {
        let worker = self.worker.take();
        drop(self);
        if let Some(handle) = worker {
            if handle.join().is_err() {
                error!("event=service_close module=service status=error reason=writer_panicked");
            }
        }
    }

    fn dispatch(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("event=note_dispatch module=service status=dropped reason=worker_gone");
        }
    }
}

fn run_writer(
    conn: Connection,
    mut commands: mpsc::UnboundedReceiver<Command>,
    notes_tx: watch::Sender<Vec<Note>>,
) {
    let repo = match SqliteNoteRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=writer_start module=service status=error error={err}");
            return;
        }
    };

    while let Some(command) = commands.blocking_recv() {
        match command {
            Command::Create(draft) => match repo.insert(&draft) {
                Ok(id) => {
                    info!("event=note_create module=service status=ok id={id}");
                    publish(&repo, &notes_tx);
                }
                Err(err) => {
                    error!("event=note_create module=service status=error error={err}");
                }
            },
            Command::Update(note) => match repo.update(&note) {
                Ok(()) => {
                    info!("event=note_update module=service status=ok id={}", note.id);
                    publish(&repo, &notes_tx);
                }
                Err(err) => {
                    error!(
                        "event=note_update module=service status=error id={} error={err}",
                        note.id
                    );
                }
            },
            Command::Delete(note) => match repo.delete(&note) {
                Ok(()) => {
                    info!("event=note_delete module=service status=ok id={}", note.id);
                    publish(&repo, &notes_tx);
                }
                Err(err) => {
                    error!(
                        "event=note_delete module=service status=error id={} error={err}",
                        note.id
                    );
                }
            },
            Command::Get(id, reply) => {
                // Caller may have stopped awaiting; a dead reply channel is fine.
                let _ = reply.send(repo.get_by_id(id));
            }
        }
    }

    info!("event=writer_stop module=service status=ok");
}

fn publish(repo: &SqliteNoteRepository<'_>, notes_tx: &watch::Sender<Vec<Note>>) {
    match repo.list_all() {
        Ok(snapshot) => {
            // Send only fails when every receiver is gone; nothing to do then.
            let _ = notes_tx.send(snapshot);
        }
        Err(err) => {
            error!("event=snapshot_publish module=service status=error error={err}");
        }
    }
}
