//! Migration behavior against file-backed databases.

use plume::db::{migrations, open_db, open_db_in_memory};

#[test]
fn fresh_database_lands_on_latest_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap();
    assert_eq!(version, migrations::latest_version());
}

#[test]
fn posts_table_exists_after_open() {
    let conn = open_db_in_memory().unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn reopening_a_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.db");

    {
        let conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO posts (title, body) VALUES ('kept', 'across reopen');",
            [],
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap();
    assert_eq!(version, migrations::latest_version());
}
