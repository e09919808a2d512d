//! Post repository contract and SQLite implementation.
//!
//! SQL stays inside this module. Handlers speak [`PostRepository`]; nothing
//! above this layer knows what the `posts` table looks like.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

use rusqlite::types::Value;
use rusqlite::{Connection, Row, params, params_from_iter};

use crate::db::DbError;
use crate::model::{Post, PostDraft, PostId};

const POST_SELECT_SQL: &str = "SELECT id, title, body FROM posts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error surface of post persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(PostId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(e) => write!(f, "{e}"),
            Self::NotFound(id) => write!(f, "post not found: {id}"),
        }
    }
}

impl StdError for RepoError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Db(e) => Some(e),
            Self::NotFound(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(e: DbError) -> Self {
        Self::Db(e)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(e))
    }
}

/// Substring filters for listing posts. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub title_like: Option<String>,
    pub body_like: Option<String>,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn create(&self, draft: &PostDraft) -> RepoResult<Post>;
    fn get(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list(&self, filter: &PostFilter) -> RepoResult<Vec<Post>>;
    fn update(&self, id: PostId, draft: &PostDraft) -> RepoResult<Post>;
    fn delete(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create(&self, draft: &PostDraft) -> RepoResult<Post> {
        self.conn.execute(
            "INSERT INTO posts (title, body) VALUES (?1, ?2);",
            params![draft.title.as_str(), draft.body.as_str()],
        )?;

        Ok(Post {
            id: self.conn.last_insert_rowid(),
            title: draft.title.clone(),
            body: draft.body.clone(),
        })
    }

    fn get(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list(&self, filter: &PostFilter) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = &filter.title_like {
            sql.push_str(" AND title LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(like_pattern(needle)));
        }

        if let Some(needle) = &filter.body_like {
            sql.push_str(" AND body LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(like_pattern(needle)));
        }

        sql.push_str(" ORDER BY id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn update(&self, id: PostId, draft: &PostDraft) -> RepoResult<Post> {
        let changed = self.conn.execute(
            "UPDATE posts SET title = ?1, body = ?2 WHERE id = ?3;",
            params![draft.title.as_str(), draft.body.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(Post {
            id,
            title: draft.title.clone(),
            body: draft.body.clone(),
        })
    }

    fn delete(&self, id: PostId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    Ok(Post {
        id: row.get("id")?,
        title: row.get("title")?,
        body: row.get("body")?,
    })
}

/// Builds a `%needle%` LIKE pattern, escaping wildcards in the needle so a
/// filter value of `100%` matches the literal text.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
