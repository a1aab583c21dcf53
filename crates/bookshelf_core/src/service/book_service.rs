//! Book use-case service.
//!
//! # Responsibility
//! - Orchestrate multi-entity saves: the book's author is persisted before
//!   the book that references it.
//! - Perform filtered and unfiltered retrieval.
//! - Verify the post-condition of deletes and surface failures as
//!   diagnostics.
//!
//! # Invariants
//! - Unset inputs are soft no-ops, never errors; callers detect them by
//!   checking the outcome value.
//! - There is no rollback across the author and book writes: if the book
//!   write fails after the author write succeeded, the author stays.

use crate::model::book::{Book, BookId};
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::BookRepository;
use crate::service::outcome::{Anomaly, Outcome};
use crate::service::{EntityService, ServiceError, ServiceResult};
use log::info;

/// Result envelope for [`BookService::save`].
pub type SaveOutcome = Outcome<Book>;

/// Result envelope for [`BookService::delete`]; the value marks that the
/// deletion was actually delegated to storage.
pub type DeleteOutcome = Outcome<()>;

/// Gateway to book persistence: consumers go through this service rather
/// than touching the repositories directly.
pub struct BookService<B: BookRepository, A: AuthorRepository> {
    books: B,
    authors: A,
}

impl<B: BookRepository, A: AuthorRepository> BookService<B, A> {
    /// Creates a service over book and author repositories. Both are needed
    /// because saving a book may persist its author in the same logical
    /// operation.
    pub fn new(books: B, authors: A) -> Self {
        Self { books, authors }
    }

    /// Gets one book by ID.
    ///
    /// # Errors
    /// - `BookNotFound` when no book has this ID.
    pub fn find_by_id(&self, id: BookId) -> ServiceResult<Book> {
        self.books.find(id)?.ok_or(ServiceError::BookNotFound(id))
    }

    /// Lists books, optionally filtered by title.
    ///
    /// An unset or empty filter behaves exactly like no filter. Otherwise
    /// matching is case-insensitive substring on the title.
    pub fn find_all(&self, filter: Option<&str>) -> ServiceResult<Vec<Book>> {
        match filter {
            Some(text) if !text.is_empty() => Ok(self.books.search(text)?),
            _ => Ok(self.books.find_all()?),
        }
    }

    /// Persists a book together with its author.
    ///
    /// # Contract
    /// - Unset book: no-op; the outcome carries no value and a
    ///   `missing_book` anomaly.
    /// - Author present: persisted first, so the book's reference is valid
    ///   by the time the book row is written. Author absent: recorded,
    ///   the book is still saved.
    /// - Shelf absent or unnamed: recorded, the book is still saved. The
    ///   inconsistency is surfaced, not corrected.
    ///
    /// # Errors
    /// - Validation failures and storage faults; soft anomalies never
    ///   become errors.
    pub fn save(&self, book: Option<&Book>) -> ServiceResult<SaveOutcome> {
        let mut outcome = SaveOutcome::empty();

        let Some(book) = book else {
            outcome.record(Anomaly::MissingBook);
            return Ok(outcome);
        };

        match &book.author {
            Some(author) => {
                self.authors.save(author)?;
                info!(
                    "event=author_save module=service status=ok author_id={}",
                    author.id
                );
            }
            None => outcome.record(Anomaly::MissingAuthor),
        }

        match &book.shelf {
            Some(shelf) if shelf.name.is_none() => outcome.record(Anomaly::UnnamedShelf(shelf.id)),
            Some(_) => {}
            None => outcome.record(Anomaly::MissingShelf),
        }

        self.books.save(book)?;
        info!(
            "event=book_save module=service status=ok book_id={} anomalies={}",
            book.id,
            outcome.anomalies.len()
        );

        outcome.value = Some(book.clone());
        Ok(outcome)
    }

    /// Deletes a book and verifies it is gone.
    ///
    /// # Contract
    /// - Unset book: no-op with a `missing_book` anomaly.
    /// - Deletion is delegated, then all books are re-queried; if the book
    ///   is still present a `delete_unverified` anomaly is recorded. No
    ///   retry, no error.
    /// - Deleting an already-deleted book is indistinguishable from the
    ///   first delete.
    pub fn delete(&self, book: Option<&Book>) -> ServiceResult<DeleteOutcome> {
        let mut outcome = DeleteOutcome::empty();

        let Some(book) = book else {
            outcome.record(Anomaly::MissingBook);
            return Ok(outcome);
        };

        self.books.delete(book.id)?;

        let remaining = self.books.find_all()?;
        if remaining.iter().any(|candidate| candidate.id == book.id) {
            outcome.record(Anomaly::DeleteUnverified(book.id));
        } else {
            info!(
                "event=book_delete module=service status=ok book_id={} remaining={}",
                book.id,
                remaining.len()
            );
        }

        outcome.value = Some(());
        Ok(outcome)
    }

    /// Returns the total number of persisted books.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.books.count()?)
    }
}

impl<B: BookRepository, A: AuthorRepository> EntityService for BookService<B, A> {
    type Entity = Book;
    type Id = BookId;
    type SaveOutput = SaveOutcome;
    type DeleteOutput = DeleteOutcome;

    fn find_by_id(&self, id: BookId) -> ServiceResult<Book> {
        BookService::find_by_id(self, id)
    }

    fn save(&self, entity: Option<&Book>) -> ServiceResult<SaveOutcome> {
        BookService::save(self, entity)
    }

    fn delete(&self, entity: Option<&Book>) -> ServiceResult<DeleteOutcome> {
        BookService::delete(self, entity)
    }
}
