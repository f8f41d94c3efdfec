//! Reading migration files from disk.

use toast_cli::commands::migrate::read_migration_scripts;

#[test]
fn test_scripts_are_sorted_by_file_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("0001_add_index.sql"), "CREATE INDEX i ON users (name);")
        .unwrap();
    std::fs::write(dir.path().join("0000_init.sql"), "CREATE TABLE users (userID text);")
        .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a migration").unwrap();

    let scripts = read_migration_scripts(dir.path()).unwrap();
    let names: Vec<&str> = scripts.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["0000_init.sql", "0001_add_index.sql"]);
}

#[test]
fn test_empty_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_migration_scripts(dir.path()).unwrap_err();
    assert!(err.to_string().contains("no migration files"));
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(read_migration_scripts(&missing).is_err());
}
