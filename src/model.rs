//! Post domain model.

use serde::{Deserialize, Serialize};

/// Database-assigned post identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PostId = i64;

/// A persisted post. The sole entity this service manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Auto-assigned by the database, unique, immutable once created.
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Canonical API path for this post, used for `Location` headers.
    pub fn api_path(&self) -> String {
        format!("/api/posts/{}", self.id)
    }
}

/// Validated input for creating or editing a post.
///
/// Edits are full replaces, so one shape serves both operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}
