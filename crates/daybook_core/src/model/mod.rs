//! Domain model for journal entries.
//!
//! # Responsibility
//! - Define the canonical Note record shared by persistence and feed logic.
//! - Provide the day-key derivation used for list sectioning.
//!
//! # Invariants
//! - Every persisted record is identified by a stable integer `NoteId`.
//! - Id `0` marks a placeholder record that was never persisted.

pub mod note;
