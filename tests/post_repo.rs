//! Repository-level CRUD tests against an in-memory database.

use plume::db::open_db_in_memory;
use plume::repo::{PostFilter, PostRepository, RepoError, SqlitePostRepository};
use plume::PostDraft;

fn draft(title: &str, body: &str) -> PostDraft {
    PostDraft {
        title: title.to_owned(),
        body: body.to_owned(),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let created = repo.create(&draft("first post", "hello")).unwrap();
    assert_eq!(created.id, 1);

    let loaded = repo.get(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn ids_are_assigned_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let a = repo.create(&draft("a", "1")).unwrap();
    let b = repo.create(&draft("b", "2")).unwrap();
    assert_eq!((a.id, b.id), (1, 2));
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    assert!(repo.get(99).unwrap().is_none());
}

#[test]
fn update_replaces_title_and_body() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let post = repo.create(&draft("draft", "wip")).unwrap();
    let updated = repo.update(post.id, &draft("final", "done")).unwrap();

    assert_eq!(updated.id, post.id);
    assert_eq!(updated.title, "final");

    let loaded = repo.get(post.id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.body, "done");
}

#[test]
fn update_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let err = repo.update(7, &draft("t", "b")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(7)));
}

#[test]
fn delete_removes_the_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    let post = repo.create(&draft("gone soon", "bye")).unwrap();
    repo.delete(post.id).unwrap();

    assert!(repo.get(post.id).unwrap().is_none());
    assert!(matches!(
        repo.delete(post.id).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn list_returns_posts_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    repo.create(&draft("one", "x")).unwrap();
    repo.create(&draft("two", "y")).unwrap();
    repo.create(&draft("three", "z")).unwrap();

    let titles: Vec<String> = repo
        .list(&PostFilter::default())
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["one", "two", "three"]);
}

#[test]
fn list_filters_are_substring_matches() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    repo.create(&draft("Post with bells", "Body A")).unwrap();
    repo.create(&draft("Post with whistles", "Body B")).unwrap();

    let filter = PostFilter {
        title_like: Some("bells".to_owned()),
        ..PostFilter::default()
    };
    let hits = repo.list(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Post with bells");
}

#[test]
fn list_filters_combine_as_intersection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    repo.create(&draft("gentlemen", "bells")).unwrap();
    repo.create(&draft("gentlemen", "whistles")).unwrap();
    repo.create(&draft("ladies", "whistles")).unwrap();

    let filter = PostFilter {
        title_like: Some("gentlemen".to_owned()),
        body_like: Some("whistles".to_owned()),
    };
    let hits = repo.list(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].body, "whistles");
}

#[test]
fn list_filter_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::new(&conn);

    repo.create(&draft("progress: 100%", "almost")).unwrap();
    repo.create(&draft("progress: 100", "almost")).unwrap();

    let filter = PostFilter {
        title_like: Some("100%".to_owned()),
        ..PostFilter::default()
    };
    let hits = repo.list(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "progress: 100%");
}
