//! Integration tests for the SQLite-backed repository

use std::fs;
use std::path::PathBuf;

use book_tracker::{
    validate, Book, BookDraft, BookRepository, Catalog, GenreSelector, RawBookFields,
    SqliteBookRepository, Store, TrackerError,
};
use rusqlite::{params, Connection};
use tempfile::TempDir;

fn open_repo(dir: &TempDir) -> (SqliteBookRepository, PathBuf) {
    let path = dir.path().join("library").join("books.sqlite");
    let store = Store::open(&path).expect("Failed to open store");
    (SqliteBookRepository::new(store), path)
}

fn raw(title: &str, author: &str, genres: &[&str]) -> RawBookFields {
    RawBookFields {
        title: title.into(),
        author: author.into(),
        year: "1965".into(),
        pages: "412".into(),
        rating: "9.5".into(),
        current_page: "100".into(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        cover: None,
    }
}

fn draft(title: &str, author: &str, genres: &[&str]) -> BookDraft {
    validate(&raw(title, author, genres)).expect("Fixture should validate")
}

#[test]
fn test_insert_then_list_round_trip() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    let inserted = repo.insert(draft("Dune", "Herbert", &["Sci-Fi"])).unwrap();
    assert!(inserted.id() > 0);

    let books = repo.list_all().unwrap();
    assert_eq!(books.len(), 1);
    let stored = &books[0];
    assert_eq!(stored, &inserted);
    assert_eq!(stored.title(), "Dune");
    assert_eq!(stored.author(), "Herbert");
    assert_eq!(stored.year(), 1965);
    assert_eq!(stored.pages(), 412);
    assert_eq!(stored.rating(), 9.5);
    assert_eq!(stored.current_page(), 100);
    assert_eq!(stored.genres().iter().collect::<Vec<_>>(), vec!["Sci-Fi"]);
    assert_eq!(stored.cover(), None);
}

#[test]
fn test_list_all_is_in_primary_key_order() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    let ids: Vec<i64> = ["Zebra", "Apple", "Mango"]
        .iter()
        .map(|title| repo.insert(draft(title, "Anon", &["Novel"])).unwrap().id())
        .collect();

    let listed: Vec<i64> = repo.list_all().unwrap().iter().map(Book::id).collect();
    assert_eq!(listed, ids);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_empty_store_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    assert!(repo.list_all().unwrap().is_empty());
    assert!(repo.list_genres().unwrap().is_empty());
}

#[test]
fn test_update_overwrites_every_field() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);
    let original = repo.insert(draft("Dune", "Herbert", &["Sci-Fi"])).unwrap();

    let mut edited = RawBookFields::from_book(&original);
    edited.title = "Dune Messiah".into();
    edited.year = "1969".into();
    edited.pages = "256".into();
    edited.rating = "7".into();
    edited.current_page = "256".into();
    edited.genres = vec!["Sci-Fi".into(), "Classic".into()];
    edited.cover = Some(vec![1, 2, 3]);

    let updated = Book::from_draft(original.id(), validate(&edited).unwrap());
    repo.update(&updated).unwrap();

    let books = repo.list_all().unwrap();
    assert_eq!(books, vec![updated]);
    assert_eq!(books[0].genres().to_column(), "Sci-Fi,Classic");
    assert_eq!(books[0].progress_percent(), 100);
}

#[test]
fn test_update_of_absent_id_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);
    repo.insert(draft("Dune", "Herbert", &["Sci-Fi"])).unwrap();

    let ghost = Book::from_draft(999, draft("Ghost", "Nobody", &["Horror"]));
    match repo.update(&ghost) {
        Err(TrackerError::NotFound(id)) => assert_eq!(id, 999),
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn test_delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);
    let dune = repo.insert(draft("Dune", "Herbert", &["Sci-Fi"])).unwrap();
    let orwell = repo.insert(draft("1984", "Orwell", &["Dystopia"])).unwrap();

    assert!(repo.delete(dune.id()).unwrap());
    let remaining: Vec<i64> = repo.list_all().unwrap().iter().map(Book::id).collect();
    assert_eq!(remaining, vec![orwell.id()]);

    assert!(!repo.delete(dune.id()).unwrap());
    assert!(!repo.delete(12345).unwrap());
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);
    let first = repo.insert(draft("One", "Anon", &["Novel"])).unwrap();
    repo.delete(first.id()).unwrap();

    let second = repo.insert(draft("Two", "Anon", &["Novel"])).unwrap();
    assert!(second.id() > first.id());
}

#[test]
fn test_list_genres_is_sorted_trimmed_and_distinct() {
    let dir = TempDir::new().unwrap();
    let (repo, path) = open_repo(&dir);
    repo.insert(draft("Fantasy Only", "Anon", &["Fantasy"])).unwrap();

    // Rows written by older versions may carry spaces after the separator.
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO books (title, author, genres) VALUES (?1, ?2, ?3)",
        params!["Mixed", "Anon", "Sci-Fi, Fantasy"],
    )
    .unwrap();

    assert_eq!(repo.list_genres().unwrap(), vec!["Fantasy", "Sci-Fi"]);

    let catalog = Catalog::load(&repo).unwrap();
    assert_eq!(catalog.genres().to_vec(), vec!["Fantasy", "Sci-Fi"]);
}

#[test]
fn test_null_columns_read_as_defaults() {
    let dir = TempDir::new().unwrap();
    let (repo, path) = open_repo(&dir);

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO books (title, author) VALUES (?1, ?2)",
        params!["Bare", "Anon"],
    )
    .unwrap();

    let books = repo.list_all().unwrap();
    let bare = &books[0];
    assert_eq!(bare.year(), 0);
    assert_eq!(bare.pages(), 0);
    assert_eq!(bare.rating(), 0.0);
    assert_eq!(bare.current_page(), 0);
    assert!(bare.genres().is_empty());
    assert_eq!(bare.cover(), None);
    assert_eq!(bare.progress(), 0.0);
    assert!(repo.list_genres().unwrap().is_empty());
}

#[test]
fn test_cover_bytes_are_stored_verbatim() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);

    let mut fields = raw("Covered", "Anon", &["Gothic"]);
    let bytes: Vec<u8> = (0..=255).collect();
    fields.cover = Some(bytes.clone());
    repo.insert(validate(&fields).unwrap()).unwrap();

    let books = repo.list_all().unwrap();
    assert_eq!(books[0].cover(), Some(bytes.as_slice()));
}

#[test]
fn test_data_survives_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let inserted = {
        let (repo, _) = open_repo(&dir);
        repo.insert(draft("Dune", "Herbert", &["Sci-Fi"])).unwrap()
    };

    let (reopened, _) = open_repo(&dir);
    assert_eq!(reopened.list_all().unwrap(), vec![inserted]);
}

#[test]
fn test_vanished_database_is_a_persistence_error() {
    let dir = TempDir::new().unwrap();
    let (repo, path) = open_repo(&dir);
    repo.insert(draft("Dune", "Herbert", &["Sci-Fi"])).unwrap();
    let catalog = Catalog::load(&repo).unwrap();

    fs::remove_file(&path).unwrap();

    assert!(matches!(
        repo.list_all(),
        Err(TrackerError::Persistence { .. })
    ));
    assert!(matches!(
        repo.insert(draft("1984", "Orwell", &["Dystopia"])),
        Err(TrackerError::Persistence { .. })
    ));
    assert!(Catalog::load(&repo).is_err());

    // The snapshot held by the caller is untouched by the failed refresh.
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.books()[0].title(), "Dune");
}

#[test]
fn test_catalog_filtering_over_stored_books() {
    let dir = TempDir::new().unwrap();
    let (repo, _) = open_repo(&dir);
    repo.insert(draft("Dune", "Herbert", &["Sci-Fi"])).unwrap();
    repo.insert(draft("1984", "Orwell", &["Dystopia"])).unwrap();

    let catalog = Catalog::load(&repo).unwrap();
    let titles = |query: &str, genre: GenreSelector| -> Vec<String> {
        book_tracker::filter(&catalog, query, &genre)
            .into_iter()
            .map(|book| book.title().to_string())
            .collect()
    };

    assert_eq!(titles("", GenreSelector::All), vec!["Dune", "1984"]);
    assert_eq!(titles("dun", GenreSelector::All), vec!["Dune"]);
    assert_eq!(titles("", GenreSelector::genre("Dystopia")), vec!["1984"]);
}
