//! Author domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an author.
pub type AuthorId = Uuid;

/// A person who wrote one or more tracked books.
///
/// Authors are owned independently of books: deleting a book never deletes
/// its author, and deleting an author leaves referencing books with an
/// unset author rather than cascading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Stable global ID used for linking and auditing.
    pub id: AuthorId,
    pub name: String,
}

impl Author {
    /// Creates a new author with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an author with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: AuthorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
