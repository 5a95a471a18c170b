//! List derivation for the day-sectioned journal feed.
//!
//! # Responsibility
//! - Turn the stored note set plus an optional search query into the
//!   filtered, sorted, day-grouped view the presentation layer renders.
//!
//! # Invariants
//! - Derivation is a pure function over its inputs.
//! - Group order follows first occurrence in the sorted sequence, never an
//!   alphabetical re-sort.

pub mod derive;
