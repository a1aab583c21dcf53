//! Shelf domain model.
//!
//! # Invariants
//! - `ShelfName` is a closed enumeration; free-form shelf names do not exist.
//! - At most one shelf per `ShelfName` is expected in the working set, but
//!   storage does not enforce this. Queries detect violations defensively
//!   instead of assuming uniqueness.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a shelf.
pub type ShelfId = Uuid;

/// Closed enumeration of the predefined shelf categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShelfName {
    ToRead,
    Reading,
    Read,
    DidNotFinish,
}

impl ShelfName {
    /// All predefined shelf categories, in display order.
    pub const ALL: [ShelfName; 4] = [
        ShelfName::ToRead,
        ShelfName::Reading,
        ShelfName::Read,
        ShelfName::DidNotFinish,
    ];
}

impl Display for ShelfName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::ToRead => "To read",
            Self::Reading => "Currently reading",
            Self::Read => "Read",
            Self::DidNotFinish => "Did not finish",
        };
        write!(f, "{label}")
    }
}

/// A predefined category holding a set of books.
///
/// The book set is intentionally not embedded here: membership is stored as
/// each book's shelf reference, and readers obtain a fresh copy through the
/// repository. Handing out an owned copy keeps callers from mutating
/// persisted membership without going through `save`.
///
/// `name` is optional so that a malformed shelf row (a persisted shelf with
/// no category) stays representable; the book service reports it as a soft
/// anomaly instead of refusing to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelf {
    /// Stable global ID used for linking and auditing.
    pub id: ShelfId,
    pub name: Option<ShelfName>,
}

impl Shelf {
    /// Creates a new shelf for the given category with a generated ID.
    pub fn new(name: ShelfName) -> Self {
        Self::with_id(Uuid::new_v4(), Some(name))
    }

    /// Creates a shelf with a caller-provided stable ID.
    pub fn with_id(id: ShelfId, name: Option<ShelfName>) -> Self {
        Self { id, name }
    }
}
