//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and title-search APIs over canonical `books` storage.
//! - Rehydrate author and shelf references on every read so a fetched book
//!   round-trips all fields.
//!
//! # Invariants
//! - Write paths must call `Book::validate()` before SQL mutations.
//! - Title search is case-insensitive substring matching; `%`, `_` and `\`
//!   in the filter are treated literally.
//! - `delete` is idempotent: deleting an absent book changes nothing.

use crate::model::author::Author;
use crate::model::book::{Book, BookId};
use crate::model::shelf::{Shelf, ShelfId};
use crate::repo::shelf_repo::parse_shelf_name;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const BOOK_SELECT_SQL: &str = "SELECT
    b.id AS id,
    b.title AS title,
    b.date_started_reading AS date_started_reading,
    b.date_finished_reading AS date_finished_reading,
    b.rating AS rating,
    b.number_of_pages AS number_of_pages,
    b.genre AS genre,
    a.id AS author_id,
    a.name AS author_name,
    s.id AS shelf_id,
    s.name AS shelf_name
FROM books b
LEFT JOIN authors a ON a.id = b.author_id
LEFT JOIN shelves s ON s.id = b.shelf_id";

const BOOK_ORDER_SQL: &str = "ORDER BY b.title COLLATE NOCASE ASC, b.id ASC";

/// Repository interface for book persistence and retrieval.
pub trait BookRepository {
    fn find(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn find_all(&self) -> RepoResult<Vec<Book>>;
    /// Returns books whose title contains `filter` (case-insensitive).
    fn search(&self, filter: &str) -> RepoResult<Vec<Book>>;
    /// Returns a fresh copy of the given shelf's book set.
    fn find_all_on_shelf(&self, shelf_id: ShelfId) -> RepoResult<Vec<Book>>;
    fn save(&self, book: &Book) -> RepoResult<BookId>;
    fn delete(&self, id: BookId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_books(&self, sql: &str, bind: impl rusqlite::Params) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn find(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE b.id = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        self.query_books(&format!("{BOOK_SELECT_SQL} {BOOK_ORDER_SQL};"), [])
    }

    fn search(&self, filter: &str) -> RepoResult<Vec<Book>> {
        // SQLite LIKE is case-insensitive for ASCII, which is the documented
        // matching contract for title filters.
        self.query_books(
            &format!(
                "{BOOK_SELECT_SQL}
                 WHERE b.title LIKE '%' || ?1 || '%' ESCAPE '\\'
                 {BOOK_ORDER_SQL};"
            ),
            params![escape_like(filter)],
        )
    }

    fn find_all_on_shelf(&self, shelf_id: ShelfId) -> RepoResult<Vec<Book>> {
        self.query_books(
            &format!("{BOOK_SELECT_SQL} WHERE b.shelf_id = ?1 {BOOK_ORDER_SQL};"),
            params![shelf_id.to_string()],
        )
    }

    fn save(&self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;

        self.conn.execute(
            "INSERT INTO books (
                id,
                title,
                author_id,
                shelf_id,
                date_started_reading,
                date_finished_reading,
                rating,
                number_of_pages,
                genre
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (id) DO UPDATE SET
                title = excluded.title,
                author_id = excluded.author_id,
                shelf_id = excluded.shelf_id,
                date_started_reading = excluded.date_started_reading,
                date_finished_reading = excluded.date_finished_reading,
                rating = excluded.rating,
                number_of_pages = excluded.number_of_pages,
                genre = excluded.genre,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                book.id.to_string(),
                book.title.as_str(),
                book.author.as_ref().map(|author| author.id.to_string()),
                book.shelf.as_ref().map(|shelf| shelf.id.to_string()),
                book.date_started_reading,
                book.date_finished_reading,
                book.rating,
                book.number_of_pages,
                book.genre.as_deref(),
            ],
        )?;

        Ok(book.id)
    }

    fn delete(&self, id: BookId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM books WHERE id = ?1;", [id.to_string()])?;

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get::<_, u64>(0))?;
        Ok(count)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{id_text}` in books.id")))?;

    let author = match row.get::<_, Option<String>>("author_id")? {
        Some(author_id_text) => {
            let author_id = Uuid::parse_str(&author_id_text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid uuid value `{author_id_text}` in authors.id"
                ))
            })?;
            Some(Author {
                id: author_id,
                name: row.get("author_name")?,
            })
        }
        None => None,
    };

    let shelf = match row.get::<_, Option<String>>("shelf_id")? {
        Some(shelf_id_text) => {
            let shelf_id = Uuid::parse_str(&shelf_id_text).map_err(|_| {
                RepoError::InvalidData(format!("invalid uuid value `{shelf_id_text}` in shelves.id"))
            })?;
            let name = match row.get::<_, Option<String>>("shelf_name")? {
                Some(value) => Some(parse_shelf_name(&value).ok_or_else(|| {
                    RepoError::InvalidData(format!("invalid shelf name `{value}` in shelves.name"))
                })?),
                None => None,
            };
            Some(Shelf { id: shelf_id, name })
        }
        None => None,
    };

    let book = Book {
        id,
        title: row.get("title")?,
        author,
        shelf,
        date_started_reading: row.get("date_started_reading")?,
        date_finished_reading: row.get("date_finished_reading")?,
        rating: row.get("rating")?,
        number_of_pages: row.get("number_of_pages")?,
        genre: row.get("genre")?,
    };
    book.validate()?;
    Ok(book)
}

/// Escapes LIKE wildcards so filter text matches literally.
fn escape_like(filter: &str) -> String {
    filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
