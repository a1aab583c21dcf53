use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Anomaly, Book, BookRepository, Shelf, ShelfName, ShelfRepository, ShelfService,
    SqliteBookRepository, SqliteShelfRepository,
};
use rusqlite::Connection;

fn shelf_service(
    conn: &Connection,
) -> ShelfService<SqliteShelfRepository<'_>, SqliteBookRepository<'_>> {
    ShelfService::new(
        SqliteShelfRepository::new(conn),
        SqliteBookRepository::new(conn),
    )
}

#[test]
fn predefined_shelves_are_seeded_once_each() {
    let conn = open_db_in_memory().unwrap();
    let service = shelf_service(&conn);

    assert_eq!(service.count().unwrap(), 4);
    for name in ShelfName::ALL {
        let matches = service.find_all_by_name(name).unwrap();
        assert_eq!(matches.len(), 1, "expected exactly one `{name}` shelf");
        assert_eq!(matches[0].name, Some(name));
    }
}

#[test]
fn single_match_resolves_to_that_shelfs_books() {
    let conn = open_db_in_memory().unwrap();
    let service = shelf_service(&conn);
    let books = SqliteBookRepository::new(&conn);

    let read_shelf = service.find_all_by_name(ShelfName::Read).unwrap().remove(0);
    let mut book = Book::new("Dune");
    book.shelf = Some(read_shelf);
    books.save(&book).unwrap();

    let outcome = service.books_in_shelf(ShelfName::Read).unwrap();
    assert!(outcome.is_clean());
    let members = outcome.value.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, book.id);
}

#[test]
fn empty_shelf_resolves_to_an_empty_book_set() {
    let conn = open_db_in_memory().unwrap();
    let service = shelf_service(&conn);

    let outcome = service.books_in_shelf(ShelfName::ToRead).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.value, Some(Vec::new()));
}

#[test]
fn zero_matches_yield_no_result_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    let service = shelf_service(&conn);
    let shelves = SqliteShelfRepository::new(&conn);

    let doomed = service
        .find_all_by_name(ShelfName::DidNotFinish)
        .unwrap()
        .remove(0);
    shelves.delete(doomed.id).unwrap();

    let outcome = service.books_in_shelf(ShelfName::DidNotFinish).unwrap();
    assert!(outcome.value.is_none());
    assert_eq!(
        outcome.anomalies,
        vec![Anomaly::ShelfNotFound(ShelfName::DidNotFinish)]
    );
}

#[test]
fn duplicate_shelf_names_yield_ambiguity_not_a_guess() {
    let conn = open_db_in_memory().unwrap();
    let service = shelf_service(&conn);

    service.save(&Shelf::new(ShelfName::Read)).unwrap();
    assert_eq!(service.find_all_by_name(ShelfName::Read).unwrap().len(), 2);

    let outcome = service.books_in_shelf(ShelfName::Read).unwrap();
    assert!(outcome.value.is_none());
    assert_eq!(
        outcome.anomalies,
        vec![Anomaly::AmbiguousShelf {
            name: ShelfName::Read,
            matches: 2,
        }]
    );
}

#[test]
fn reassigning_a_book_moves_it_between_shelf_sets() {
    let conn = open_db_in_memory().unwrap();
    let service = shelf_service(&conn);
    let books = SqliteBookRepository::new(&conn);

    let read_shelf = service.find_all_by_name(ShelfName::Read).unwrap().remove(0);
    let reading_shelf = service
        .find_all_by_name(ShelfName::Reading)
        .unwrap()
        .remove(0);

    let mut book = Book::new("Dune");
    book.shelf = Some(reading_shelf);
    books.save(&book).unwrap();

    book.shelf = Some(read_shelf);
    books.save(&book).unwrap();

    let old_set = service.books_in_shelf(ShelfName::Reading).unwrap();
    assert_eq!(old_set.value, Some(Vec::new()));

    let new_set = service.books_in_shelf(ShelfName::Read).unwrap();
    assert_eq!(new_set.value.unwrap().len(), 1);
}

#[test]
fn resolved_book_set_is_an_owned_copy() {
    let conn = open_db_in_memory().unwrap();
    let service = shelf_service(&conn);
    let books = SqliteBookRepository::new(&conn);

    let read_shelf = service.find_all_by_name(ShelfName::Read).unwrap().remove(0);
    let mut book = Book::new("Dune");
    book.shelf = Some(read_shelf);
    books.save(&book).unwrap();

    let mut first = service.books_in_shelf(ShelfName::Read).unwrap().value.unwrap();
    first.clear();

    let second = service.books_in_shelf(ShelfName::Read).unwrap().value.unwrap();
    assert_eq!(second.len(), 1);
}
