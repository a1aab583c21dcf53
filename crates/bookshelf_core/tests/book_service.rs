use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Anomaly, Author, AuthorRepository, Book, BookService, EntityService, ServiceError,
    ServiceResult, Shelf, ShelfName, ShelfRepository, SqliteAuthorRepository,
    SqliteBookRepository, SqliteShelfRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn book_service(conn: &Connection) -> BookService<SqliteBookRepository<'_>, SqliteAuthorRepository<'_>> {
    BookService::new(
        SqliteBookRepository::new(conn),
        SqliteAuthorRepository::new(conn),
    )
}

#[test]
fn save_unset_book_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    let outcome = service.save(None).unwrap();
    assert!(outcome.value.is_none());
    assert_eq!(outcome.anomalies, vec![Anomaly::MissingBook]);
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn save_dune_without_author_or_shelf_records_both_anomalies() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    let book = Book::new("Dune");
    let outcome = service.save(Some(&book)).unwrap();

    assert_eq!(outcome.value.as_ref().map(|saved| saved.id), Some(book.id));
    assert!(outcome.has("missing_author"));
    assert!(outcome.has("missing_shelf"));
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn save_persists_author_in_the_same_operation() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);
    let authors = SqliteAuthorRepository::new(&conn);

    let mut book = Book::new("Dune");
    book.author = Some(Author::new("Frank Herbert"));

    let outcome = service.save(Some(&book)).unwrap();
    assert!(!outcome.has("missing_author"));
    assert_eq!(authors.count().unwrap(), 1);

    let loaded = service.find_by_id(book.id).unwrap();
    assert_eq!(loaded.author, book.author);
}

#[test]
fn save_with_unnamed_shelf_still_persists_the_book() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);
    let shelves = SqliteShelfRepository::new(&conn);

    let unnamed = Shelf::with_id(Uuid::new_v4(), None);
    shelves.save(&unnamed).unwrap();

    let mut book = Book::new("Dune");
    book.shelf = Some(unnamed.clone());

    let outcome = service.save(Some(&book)).unwrap();
    assert!(outcome.has("unnamed_shelf"));
    assert!(outcome.value.is_some());

    let loaded = service.find_by_id(book.id).unwrap();
    assert_eq!(loaded.shelf, Some(unnamed));
}

#[test]
fn save_with_named_shelf_is_clean_of_shelf_anomalies() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);
    let shelves = SqliteShelfRepository::new(&conn);

    let read_shelf = shelves
        .find_all_by_name(ShelfName::Read)
        .unwrap()
        .remove(0);

    let mut book = Book::new("Dune");
    book.shelf = Some(read_shelf);

    let outcome = service.save(Some(&book)).unwrap();
    assert!(!outcome.has("missing_shelf"));
    assert!(!outcome.has("unnamed_shelf"));
}

#[test]
fn delete_unset_book_records_anomaly_without_side_effects() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    service.save(Some(&Book::new("Dune"))).unwrap();

    let outcome = service.delete(None).unwrap();
    assert!(outcome.value.is_none());
    assert_eq!(outcome.anomalies, vec![Anomaly::MissingBook]);
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn delete_verifies_the_book_is_gone() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    let book = Book::new("Dune");
    service.save(Some(&book)).unwrap();

    let outcome = service.delete(Some(&book)).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(service.count().unwrap(), 0);

    let err = service.find_by_id(book.id).unwrap_err();
    assert!(matches!(err, ServiceError::BookNotFound(id) if id == book.id));
}

#[test]
fn deleting_an_already_deleted_book_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    let keeper = Book::new("Emma");
    let victim = Book::new("Dune");
    service.save(Some(&keeper)).unwrap();
    service.save(Some(&victim)).unwrap();

    service.delete(Some(&victim)).unwrap();
    let count_after_first = service.count().unwrap();

    let outcome = service.delete(Some(&victim)).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(service.count().unwrap(), count_after_first);
}

#[test]
fn empty_filter_behaves_like_no_filter() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    service.save(Some(&Book::new("Dune"))).unwrap();
    service.save(Some(&Book::new("Emma"))).unwrap();

    let unfiltered = service.find_all(None).unwrap();
    assert_eq!(unfiltered.len(), 2);
    assert_eq!(service.find_all(Some("")).unwrap(), unfiltered);
}

#[test]
fn filter_restricts_to_matching_titles() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    service.save(Some(&Book::new("Dune"))).unwrap();
    service.save(Some(&Book::new("Emma"))).unwrap();

    let hits = service.find_all(Some("du")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Dune");
}

// Generic over the shared service contract; dispatch is resolved statically.
fn lookup<S: EntityService>(service: &S, id: S::Id) -> ServiceResult<S::Entity> {
    service.find_by_id(id)
}

#[test]
fn book_service_conforms_to_the_shared_entity_contract() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    let book = Book::new("Dune");
    EntityService::save(&service, Some(&book)).unwrap();

    let loaded = lookup(&service, book.id).unwrap();
    assert_eq!(loaded.id, book.id);

    EntityService::delete(&service, Some(&book)).unwrap();
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn find_by_id_for_unknown_book_is_a_hard_failure() {
    let conn = open_db_in_memory().unwrap();
    let service = book_service(&conn);

    let missing = Uuid::new_v4();
    let err = service.find_by_id(missing).unwrap_err();
    assert!(matches!(err, ServiceError::BookNotFound(id) if id == missing));
}
