//! The posts API: route table, handlers, content negotiation, and the
//! condition → status/message mapping.
//!
//! Every error leaves this module as a JSON body of the shape
//! `{"message": "<text>"}` with the status code the condition calls for:
//!
//! | Condition | Status | Message |
//! |---|---|---|
//! | client does not accept JSON | 406 | `Request must accept application/json data` |
//! | body is not declared JSON | 415 | `Request must contain application/json data` |
//! | body does not parse | 400 | `Request body is not valid JSON` |
//! | body fails validation | 422 | the validator's message, verbatim |
//! | post does not exist | 404 | `Could not find post with id {id}` |
//! | database failure | 500 | `Internal server error` |

use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::app::App;
use crate::health;
use crate::model::PostId;
use crate::repo::{PostFilter, PostRepository, RepoError, SqlitePostRepository};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::validate;

/// Builds the full route table, health endpoints included.
pub fn routes() -> Router {
    Router::new()
        .on(Method::GET, "/api/posts", list_posts)
        .on(Method::POST, "/api/posts", create_post)
        .on(Method::GET, "/api/posts/{id}", get_post)
        .on(Method::POST, "/api/posts/{id}", update_post)
        .on(Method::DELETE, "/api/posts/{id}", delete_post)
        .on(Method::GET, "/healthz", health::liveness)
        .on(Method::GET, "/readyz", health::readiness)
}

// ── Error mapping ─────────────────────────────────────────────────────────────

type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong on the request path, one variant per
/// condition the fixed mapping names.
enum ApiError {
    NotAcceptable,
    UnsupportedMediaType,
    MalformedJson,
    Validation(String),
    /// Holds the id as the caller wrote it, so the message echoes the raw
    /// path segment even when it is not a valid integer.
    PostNotFound(String),
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MalformedJson => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PostNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotAcceptable => "Request must accept application/json data".to_owned(),
            Self::UnsupportedMediaType => "Request must contain application/json data".to_owned(),
            Self::MalformedJson => "Request body is not valid JSON".to_owned(),
            Self::Validation(message) => message.clone(),
            Self::PostNotFound(id) => format!("Could not find post with id {id}"),
            Self::Internal => "Internal server error".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Response::builder()
            .status(self.status())
            .json(message_body(&self.message()))
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(id) => Self::PostNotFound(id.to_string()),
            RepoError::Db(e) => {
                error!(error = %e, "database error on request path");
                Self::Internal
            }
        }
    }
}

fn message_body(text: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "message": text }))
        .unwrap_or_else(|_| b"{}".to_vec())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /api/posts — list, optionally filtered by substring.
async fn list_posts(app: App, req: Request) -> ApiResult<Response> {
    require_accepts_json(&req)?;

    let filter = PostFilter {
        title_like: req.query_param("title_like").map(str::to_owned),
        body_like: req.query_param("body_like").map(str::to_owned),
    };

    let posts = {
        let conn = app.db();
        SqlitePostRepository::new(&conn).list(&filter)?
    };

    json_ok(&posts)
}

/// GET /api/posts/{id}
async fn get_post(app: App, req: Request) -> ApiResult<Response> {
    require_accepts_json(&req)?;
    let id = post_id(&req)?;

    let post = {
        let conn = app.db();
        SqlitePostRepository::new(&conn).get(id)?
    };

    match post {
        Some(post) => json_ok(&post),
        None => Err(ApiError::PostNotFound(id.to_string())),
    }
}

/// POST /api/posts — create. 201 + Location + the created post.
async fn create_post(app: App, req: Request) -> ApiResult<Response> {
    require_accepts_json(&req)?;
    let value = require_json_body(&req)?;
    let draft = validate::post_draft(&value).map_err(ApiError::Validation)?;

    let post = {
        let conn = app.db();
        SqlitePostRepository::new(&conn).create(&draft)?
    };

    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .header("location", &post.api_path())
        .json(encode(&post)?))
}

/// POST /api/posts/{id} — edit, a full replace of title and body.
/// 200 + Location + the updated post.
async fn update_post(app: App, req: Request) -> ApiResult<Response> {
    require_accepts_json(&req)?;
    let value = require_json_body(&req)?;
    let draft = validate::post_draft(&value).map_err(ApiError::Validation)?;
    let id = post_id(&req)?;

    let post = {
        let conn = app.db();
        SqlitePostRepository::new(&conn).update(id, &draft)?
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("location", &post.api_path())
        .json(encode(&post)?))
}

/// DELETE /api/posts/{id} — 204, empty body, still `application/json`.
async fn delete_post(app: App, req: Request) -> ApiResult<Response> {
    require_accepts_json(&req)?;
    let id = post_id(&req)?;

    {
        let conn = app.db();
        SqlitePostRepository::new(&conn).delete(id)?;
    }

    Ok(Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("content-type", "application/json")
        .no_body())
}

// ── Negotiation and shared plumbing ───────────────────────────────────────────

/// Rejects clients that will not accept `application/json`.
///
/// An absent `Accept` header means the client accepts anything
/// (RFC 9110 §12.5.1), so only an explicit non-JSON preference is a 406.
fn require_accepts_json(req: &Request) -> ApiResult<()> {
    match req.header("accept") {
        None => Ok(()),
        Some(value) if accept_allows_json(value) => Ok(()),
        Some(_) => Err(ApiError::NotAcceptable),
    }
}

fn accept_allows_json(value: &str) -> bool {
    value.split(',').any(|item| {
        let media_type = item.split(';').next().unwrap_or("").trim();
        media_type.eq_ignore_ascii_case("application/json")
            || media_type.eq_ignore_ascii_case("application/*")
            || media_type == "*/*"
    })
}

/// Enforces `Content-Type: application/json` (parameters ignored), then
/// decodes the body.
fn require_json_body(req: &Request) -> ApiResult<Value> {
    let declared_json = req.header("content-type").is_some_and(|value| {
        let media_type = value.split(';').next().unwrap_or("").trim();
        media_type.eq_ignore_ascii_case("application/json")
    });

    if !declared_json {
        return Err(ApiError::UnsupportedMediaType);
    }

    serde_json::from_slice(req.body()).map_err(|_| ApiError::MalformedJson)
}

/// Parses the `{id}` path segment. A segment that is not an integer cannot
/// name a post, so it maps to the same 404 the caller would get for a
/// missing row.
fn post_id(req: &Request) -> ApiResult<PostId> {
    let raw = req.param("id").unwrap_or_default();
    raw.parse().map_err(|_| ApiError::PostNotFound(raw.to_owned()))
}

fn json_ok<T: Serialize>(value: &T) -> ApiResult<Response> {
    Ok(Response::json(encode(value)?))
}

fn encode<T: Serialize>(value: &T) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        error!(error = %e, "failed to encode response body");
        ApiError::Internal
    })
}

#[cfg(test)]
mod tests {
    use super::accept_allows_json;

    #[test]
    fn plain_json_accept_is_allowed() {
        assert!(accept_allows_json("application/json"));
        assert!(accept_allows_json("Application/JSON"));
    }

    #[test]
    fn wildcards_are_allowed() {
        assert!(accept_allows_json("*/*"));
        assert!(accept_allows_json("application/*"));
        assert!(accept_allows_json("text/html, */*;q=0.1"));
    }

    #[test]
    fn quality_parameters_are_ignored() {
        assert!(accept_allows_json("application/json; q=0.9"));
        assert!(accept_allows_json("text/html;q=1.0, application/json;q=0.5"));
    }

    #[test]
    fn non_json_accept_is_rejected() {
        assert!(!accept_allows_json("application/xml"));
        assert!(!accept_allows_json("text/html, text/plain"));
    }
}
