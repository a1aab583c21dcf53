//! Author use-case service.
//!
//! Thin gateway over the author repository: consumers go through this
//! service rather than touching the repository directly.

use crate::model::author::{Author, AuthorId};
use crate::repo::author_repo::AuthorRepository;
use crate::service::{EntityService, ServiceError, ServiceResult};
use log::info;

/// Use-case service wrapper for author CRUD operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one author by ID.
    ///
    /// # Errors
    /// - `AuthorNotFound` when no author has this ID.
    pub fn find_by_id(&self, id: AuthorId) -> ServiceResult<Author> {
        self.repo
            .find(id)?
            .ok_or(ServiceError::AuthorNotFound(id))
    }

    /// Lists all authors.
    pub fn find_all(&self) -> ServiceResult<Vec<Author>> {
        Ok(self.repo.find_all()?)
    }

    /// Persists an author and returns it unchanged.
    ///
    /// An unset author is a deliberate no-op, not an error: the result is
    /// `None` and nothing is written.
    pub fn save(&self, author: Option<&Author>) -> ServiceResult<Option<Author>> {
        let Some(author) = author else {
            return Ok(None);
        };

        self.repo.save(author)?;
        info!(
            "event=author_save module=service status=ok author_id={}",
            author.id
        );
        Ok(Some(author.clone()))
    }

    /// Deletes an author.
    ///
    /// Books referencing this author are not deleted; their author
    /// reference degrades to unset.
    pub fn delete(&self, author: &Author) -> ServiceResult<()> {
        self.repo.delete(author.id)?;
        info!(
            "event=author_delete module=service status=ok author_id={}",
            author.id
        );
        Ok(())
    }

    /// Returns the total number of persisted authors.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count()?)
    }
}

impl<R: AuthorRepository> EntityService for AuthorService<R> {
    type Entity = Author;
    type Id = AuthorId;
    type SaveOutput = Option<Author>;
    type DeleteOutput = ();

    fn find_by_id(&self, id: AuthorId) -> ServiceResult<Author> {
        AuthorService::find_by_id(self, id)
    }

    fn save(&self, entity: Option<&Author>) -> ServiceResult<Option<Author>> {
        AuthorService::save(self, entity)
    }

    fn delete(&self, entity: Option<&Author>) -> ServiceResult<()> {
        match entity {
            Some(author) => AuthorService::delete(self, author),
            None => Ok(()),
        }
    }
}
