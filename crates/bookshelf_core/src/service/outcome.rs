//! Structured diagnostics accumulated alongside service results.
//!
//! # Responsibility
//! - Record soft anomalies as values tests can assert on, instead of
//!   burying them in log output.
//! - Mirror every recorded anomaly to the log in stable key/value form.
//!
//! # Invariants
//! - Recording an anomaly never aborts the operation that caused it.
//! - Anomaly codes are stable identifiers safe for log parsing.

use crate::model::book::BookId;
use crate::model::shelf::{ShelfId, ShelfName};
use log::warn;
use std::fmt::{Display, Formatter};

/// A recorded inconsistency that did not block the operation causing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Caller passed no book; the operation was a no-op.
    MissingBook,
    /// Saved book has no author reference.
    MissingAuthor,
    /// Saved book is not on any shelf.
    MissingShelf,
    /// Saved book references a shelf whose name is unset.
    UnnamedShelf(ShelfId),
    /// No shelf exists for the requested name.
    ShelfNotFound(ShelfName),
    /// More than one shelf claims the requested name; no result is
    /// returned rather than guessing which one is authoritative.
    AmbiguousShelf { name: ShelfName, matches: usize },
    /// Book was still present when re-queried after delete.
    DeleteUnverified(BookId),
}

impl Anomaly {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingBook => "missing_book",
            Self::MissingAuthor => "missing_author",
            Self::MissingShelf => "missing_shelf",
            Self::UnnamedShelf(_) => "unnamed_shelf",
            Self::ShelfNotFound(_) => "shelf_not_found",
            Self::AmbiguousShelf { .. } => "ambiguous_shelf",
            Self::DeleteUnverified(_) => "delete_unverified",
        }
    }
}

impl Display for Anomaly {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBook => write!(f, "book is unset; nothing to do"),
            Self::MissingAuthor => write!(f, "book has no author"),
            Self::MissingShelf => write!(f, "book is not on any shelf"),
            Self::UnnamedShelf(id) => write!(f, "shelf {id} has no name"),
            Self::ShelfNotFound(name) => write!(f, "no shelf named `{name}`"),
            Self::AmbiguousShelf { name, matches } => {
                write!(f, "{matches} shelves named `{name}`; refusing to pick one")
            }
            Self::DeleteUnverified(id) => write!(f, "book {id} still present after delete"),
        }
    }
}

/// Primary result plus the soft anomalies observed while producing it.
///
/// `value` is `None` when the operation had nothing to return (no-op input,
/// unresolvable shelf); callers distinguish that from success by checking
/// it, mirroring the unset-entity contract of the service operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: Option<T>,
    pub anomalies: Vec<Anomaly>,
}

impl<T> Outcome<T> {
    /// Creates an outcome with no value and no anomalies.
    pub fn empty() -> Self {
        Self {
            value: None,
            anomalies: Vec::new(),
        }
    }

    /// Creates a clean outcome carrying `value`.
    pub fn of(value: T) -> Self {
        Self {
            value: Some(value),
            anomalies: Vec::new(),
        }
    }

    /// Records a soft anomaly and mirrors it to the log.
    pub fn record(&mut self, anomaly: Anomaly) {
        warn!(
            "event=anomaly module=service code={} detail={anomaly}",
            anomaly.code()
        );
        self.anomalies.push(anomaly);
    }

    /// Returns whether any anomaly was recorded.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Returns whether an anomaly with the given code was recorded.
    pub fn has(&self, code: &str) -> bool {
        self.anomalies.iter().any(|anomaly| anomaly.code() == code)
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::empty()
    }
}
