use librarium_core::{BookRepository, DbManager, SqliteBookRepository};
use tempfile::TempDir;

#[test]
fn open_is_idempotent_for_file_databases() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.db");

    let mut manager = DbManager::new(&path);
    manager.open().unwrap();
    manager.open().unwrap();
    assert!(manager.is_open());
}

#[test]
fn data_survives_close_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.db");

    let mut manager = DbManager::new(&path);
    manager.open().unwrap();
    {
        let repo = SqliteBookRepository::new(&manager);
        repo.add("Dune", "Herbert", 1965).unwrap();
    }
    manager.close();

    let mut reopened = DbManager::new(&path);
    reopened.open().unwrap();
    let repo = SqliteBookRepository::new(&reopened);
    let book = repo.get("Dune").unwrap().unwrap();
    assert_eq!(book.author, "Herbert");
}

#[test]
fn schema_creation_happens_once_per_backing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.db");

    let mut first = DbManager::new(&path);
    first.open().unwrap();
    {
        let repo = SqliteBookRepository::new(&first);
        repo.add("Dune", "Herbert", 1965).unwrap();
    }
    first.close();

    // A second open sees the existing table instead of recreating it.
    let mut second = DbManager::new(&path);
    second.open().unwrap();
    let repo = SqliteBookRepository::new(&second);
    assert_eq!(repo.get_all().unwrap().len(), 1);
}

#[test]
fn open_failure_leaves_manager_unset() {
    let dir = TempDir::new().unwrap();
    // A directory path cannot be opened as a database file.
    let mut manager = DbManager::new(dir.path());

    assert!(manager.open().is_err());
    assert!(!manager.is_open());
    assert!(manager.connection().is_none());
}
