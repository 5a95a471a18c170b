//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls behind the facade the presentation layer
//!   consumes.
//! - Keep UI layers decoupled from storage details and write scheduling.

pub mod journal;
