//! Core domain logic for the bookshelf tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId, BookValidationError};
pub use model::shelf::{Shelf, ShelfId, ShelfName};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::shelf_repo::{ShelfRepository, SqliteShelfRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::book_service::{BookService, DeleteOutcome, SaveOutcome};
pub use service::outcome::{Anomaly, Outcome};
pub use service::shelf_service::{ShelfBooksOutcome, ShelfService};
pub use service::{EntityService, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
