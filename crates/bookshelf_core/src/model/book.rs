//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its reading metadata.
//! - Validate entity state before write paths hand it to storage.
//!
//! # Invariants
//! - `id` is stable and never reused for another book.
//! - `title` must be non-empty for the book to be persistable.
//! - A book belongs to at most one shelf at a time; shelf reassignment is a
//!   single reference change, never membership in two shelves.

use crate::model::author::Author;
use crate::model::shelf::Shelf;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a book.
pub type BookId = Uuid;

/// Highest rating a reader can give, on a half-star ten-point scale.
pub const MAX_RATING: f64 = 10.0;

/// Canonical record for a tracked book.
///
/// Author and shelf references are optional: a book can be captured before
/// its author is known and before it is placed on any shelf. The service
/// layer reports those gaps as soft anomalies rather than rejecting the
/// book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Stable global ID used for linking and auditing.
    pub id: BookId,
    pub title: String,
    pub author: Option<Author>,
    pub shelf: Option<Shelf>,
    /// Unix epoch milliseconds.
    pub date_started_reading: Option<i64>,
    /// Unix epoch milliseconds. Should not be earlier than the start date.
    pub date_finished_reading: Option<i64>,
    /// Reader rating in `0.0..=10.0`.
    pub rating: Option<f64>,
    pub number_of_pages: Option<u32>,
    pub genre: Option<String>,
}

impl Book {
    /// Creates a new book with a generated stable ID.
    ///
    /// Optional metadata starts unset; author and shelf are attached by the
    /// caller before saving if they are known.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a book with a caller-provided stable ID.
    pub fn with_id(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: None,
            shelf: None,
            date_started_reading: None,
            date_finished_reading: None,
            rating: None,
            number_of_pages: None,
            genre: None,
        }
    }

    /// Checks entity invariants before a write path touches storage.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    /// - `RatingOutOfRange` when the rating leaves `0.0..=10.0`.
    /// - `ReversedReadingDates` when the finish date precedes the start date.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }

        if let Some(rating) = self.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(BookValidationError::RatingOutOfRange(rating));
            }
        }

        if let (Some(started), Some(finished)) =
            (self.date_started_reading, self.date_finished_reading)
        {
            if finished < started {
                return Err(BookValidationError::ReversedReadingDates { started, finished });
            }
        }

        Ok(())
    }
}

/// Invariant violations detected by [`Book::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum BookValidationError {
    EmptyTitle,
    RatingOutOfRange(f64),
    ReversedReadingDates { started: i64, finished: i64 },
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::RatingOutOfRange(rating) => {
                write!(f, "rating {rating} is outside 0.0..={MAX_RATING}")
            }
            Self::ReversedReadingDates { started, finished } => write!(
                f,
                "finished date {finished} is earlier than started date {started}"
            ),
        }
    }
}

impl Error for BookValidationError {}
