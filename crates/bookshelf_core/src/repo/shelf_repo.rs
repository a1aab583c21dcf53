//! Shelf repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `find_all_by_name` makes no uniqueness assumption: duplicate rows for
//!   one shelf name are returned as-is so callers can detect the violation.
//! - A `NULL` shelf name round-trips as `None`; an unknown stored name is
//!   rejected as invalid data.

use crate::model::shelf::{Shelf, ShelfId, ShelfName};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const SHELF_SELECT_SQL: &str = "SELECT id, name FROM shelves";

/// Repository interface for shelf persistence and name lookup.
pub trait ShelfRepository {
    fn find(&self, id: ShelfId) -> RepoResult<Option<Shelf>>;
    fn find_all(&self) -> RepoResult<Vec<Shelf>>;
    fn find_all_by_name(&self, name: ShelfName) -> RepoResult<Vec<Shelf>>;
    fn save(&self, shelf: &Shelf) -> RepoResult<ShelfId>;
    fn delete(&self, id: ShelfId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed shelf repository.
pub struct SqliteShelfRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShelfRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ShelfRepository for SqliteShelfRepository<'_> {
    fn find(&self, id: ShelfId) -> RepoResult<Option<Shelf>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SHELF_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_shelf_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Shelf>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SHELF_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut shelves = Vec::new();
        while let Some(row) = rows.next()? {
            shelves.push(parse_shelf_row(row)?);
        }

        Ok(shelves)
    }

    fn find_all_by_name(&self, name: ShelfName) -> RepoResult<Vec<Shelf>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SHELF_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC;"))?;

        let mut rows = stmt.query(params![shelf_name_to_db(name)])?;
        let mut shelves = Vec::new();
        while let Some(row) = rows.next()? {
            shelves.push(parse_shelf_row(row)?);
        }

        Ok(shelves)
    }

    fn save(&self, shelf: &Shelf) -> RepoResult<ShelfId> {
        self.conn.execute(
            "INSERT INTO shelves (id, name) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![shelf.id.to_string(), shelf.name.map(shelf_name_to_db)],
        )?;

        Ok(shelf.id)
    }

    fn delete(&self, id: ShelfId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM shelves WHERE id = ?1;", [id.to_string()])?;

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM shelves;", [], |row| {
                row.get::<_, u64>(0)
            })?;
        Ok(count)
    }
}

fn parse_shelf_row(row: &Row<'_>) -> RepoResult<Shelf> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in shelves.id"))
    })?;

    let name = match row.get::<_, Option<String>>("name")? {
        Some(value) => Some(parse_shelf_name(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid shelf name `{value}` in shelves.name"))
        })?),
        None => None,
    };

    Ok(Shelf { id, name })
}

pub(crate) fn shelf_name_to_db(name: ShelfName) -> &'static str {
    match name {
        ShelfName::ToRead => "to_read",
        ShelfName::Reading => "reading",
        ShelfName::Read => "read",
        ShelfName::DidNotFinish => "did_not_finish",
    }
}

pub(crate) fn parse_shelf_name(value: &str) -> Option<ShelfName> {
    match value {
        "to_read" => Some(ShelfName::ToRead),
        "reading" => Some(ShelfName::Reading),
        "read" => Some(ShelfName::Read),
        "did_not_finish" => Some(ShelfName::DidNotFinish),
        _ => None,
    }
}
