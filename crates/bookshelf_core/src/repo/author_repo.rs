//! Author repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Deleting an author never cascades to books; referencing books fall
//!   back to an unset author via the schema's `ON DELETE SET NULL`.

use crate::model::author::{Author, AuthorId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const AUTHOR_SELECT_SQL: &str = "SELECT id, name FROM authors";

/// Repository interface for author persistence.
pub trait AuthorRepository {
    fn find(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn find_all(&self) -> RepoResult<Vec<Author>>;
    fn save(&self, author: &Author) -> RepoResult<AuthorId>;
    fn delete(&self, id: AuthorId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn find(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(&format!(
            "{AUTHOR_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn save(&self, author: &Author) -> RepoResult<AuthorId> {
        self.conn.execute(
            "INSERT INTO authors (id, name) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![author.id.to_string(), author.name.as_str()],
        )?;

        Ok(author.id)
    }

    fn delete(&self, id: AuthorId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id.to_string()])?;

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| {
                row.get::<_, u64>(0)
            })?;
        Ok(count)
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in authors.id"))
    })?;

    Ok(Author {
        id,
        name: row.get("name")?,
    })
}
