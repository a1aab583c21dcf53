//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Soft anomalies are accumulated in the returned [`outcome::Outcome`]
//!   and never escalate to errors; only missing single-entity lookups,
//!   validation failures and storage faults are hard failures.

use crate::model::author::AuthorId;
use crate::model::book::BookId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_service;
pub mod book_service;
pub mod outcome;
pub mod shelf_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Hard failures surfaced by the service layer.
#[derive(Debug)]
pub enum ServiceError {
    /// Explicit single-author lookup found nothing.
    AuthorNotFound(AuthorId),
    /// Explicit single-book lookup found nothing.
    BookNotFound(BookId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthorNotFound(id) => write!(f, "author not found: {id}"),
            Self::BookNotFound(id) => write!(f, "book not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Shared contract implemented by every entity-specific service.
///
/// Conformance is static: callers generic over an `EntityService` pick the
/// implementation at compile time, no dynamic dispatch involved. The save
/// and delete outputs differ per entity (a plain echo for authors, a
/// diagnostic envelope for books), so they are associated types rather than
/// a single shape.
pub trait EntityService {
    type Entity;
    type Id;
    type SaveOutput;
    type DeleteOutput;

    /// Gets one entity by ID; absence is a hard failure.
    fn find_by_id(&self, id: Self::Id) -> ServiceResult<Self::Entity>;

    /// Persists an entity. An unset entity is a no-op, not an error.
    fn save(&self, entity: Option<&Self::Entity>) -> ServiceResult<Self::SaveOutput>;

    /// Deletes an entity. An unset entity is a no-op, not an error.
    fn delete(&self, entity: Option<&Self::Entity>) -> ServiceResult<Self::DeleteOutput>;
}
