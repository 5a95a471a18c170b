//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable storage contract for Note records.
//! - Isolate SQLite query details from facade orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - `get_by_id` reports a missing id as `Ok(None)`, never as an error.

pub mod note_repo;
