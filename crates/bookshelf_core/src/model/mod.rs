//! Domain model for books, authors and predefined shelves.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep entity invariants close to the data they protect.
//!
//! # Invariants
//! - Every entity is identified by a stable surrogate `Uuid`.
//! - A book references at most one author and at most one shelf.
//! - A shelf never owns its book set in memory; membership lives in storage.

pub mod author;
pub mod book;
pub mod shelf;
