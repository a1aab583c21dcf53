//! Shelf resolution service.
//!
//! # Responsibility
//! - Resolve a shelf name to the single shelf entity holding that name.
//! - Hand callers a fresh copy of the resolved shelf's book set.
//!
//! # Invariants
//! - Exactly one match is the healthy case. Zero matches and duplicate
//!   matches both yield no result plus a diagnostic; the service never
//!   guesses which duplicate is authoritative.

use crate::model::book::Book;
use crate::model::shelf::{Shelf, ShelfId, ShelfName};
use crate::repo::book_repo::BookRepository;
use crate::repo::shelf_repo::ShelfRepository;
use crate::service::outcome::{Anomaly, Outcome};
use crate::service::ServiceResult;
use log::info;

/// Result envelope for [`ShelfService::books_in_shelf`].
pub type ShelfBooksOutcome = Outcome<Vec<Book>>;

/// Gateway to shelf persistence and name resolution.
pub struct ShelfService<S: ShelfRepository, B: BookRepository> {
    shelves: S,
    books: B,
}

impl<S: ShelfRepository, B: BookRepository> ShelfService<S, B> {
    /// Creates a service over shelf and book repositories. The book
    /// repository is needed to materialize a resolved shelf's book set.
    pub fn new(shelves: S, books: B) -> Self {
        Self { shelves, books }
    }

    /// Lists all shelves.
    pub fn find_all(&self) -> ServiceResult<Vec<Shelf>> {
        Ok(self.shelves.find_all()?)
    }

    /// Lists every shelf holding the given name.
    ///
    /// Exactly one element is the expected result; anything else is an
    /// invariant violation the caller must handle (see
    /// [`Self::books_in_shelf`] for the resolution policy).
    pub fn find_all_by_name(&self, name: ShelfName) -> ServiceResult<Vec<Shelf>> {
        Ok(self.shelves.find_all_by_name(name)?)
    }

    /// Resolves a shelf name and returns a copy of that shelf's book set.
    ///
    /// # Contract
    /// - One match: the outcome carries the shelf's books. The returned
    ///   list is an owned copy; mutating it does not touch persisted
    ///   membership.
    /// - Zero matches: no value, `shelf_not_found` anomaly.
    /// - Multiple matches: no value, `ambiguous_shelf` anomaly. Correctness
    ///   over availability.
    pub fn books_in_shelf(&self, name: ShelfName) -> ServiceResult<ShelfBooksOutcome> {
        let matches = self.shelves.find_all_by_name(name)?;
        let mut outcome = ShelfBooksOutcome::empty();

        match matches.as_slice() {
            [] => outcome.record(Anomaly::ShelfNotFound(name)),
            [shelf] => {
                let books = self.books.find_all_on_shelf(shelf.id)?;
                info!(
                    "event=shelf_resolve module=service status=ok shelf_id={} books={}",
                    shelf.id,
                    books.len()
                );
                outcome.value = Some(books);
            }
            many => outcome.record(Anomaly::AmbiguousShelf {
                name,
                matches: many.len(),
            }),
        }

        Ok(outcome)
    }

    /// Persists a shelf and returns its ID.
    pub fn save(&self, shelf: &Shelf) -> ServiceResult<ShelfId> {
        Ok(self.shelves.save(shelf)?)
    }

    /// Returns the total number of persisted shelves.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.shelves.count()?)
    }
}
