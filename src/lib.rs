//! # plume
//!
//! A small JSON posts API over SQLite, designed to sit behind a reverse
//! proxy. Five routes, one table.
//!
//! ## The contract
//!
//! nginx handles TLS, rate limiting, slow clients, and body-size limits.
//! plume does not. The proxy does proxy things. The service does service
//! things: route the request, negotiate content types, validate input,
//! touch the table, map the outcome to a status code.
//!
//! What's left for plume — the only part that changes between applications:
//!
//! - Radix-tree routing — O(path-length) lookup via [`matchit`]
//! - Async I/O — tokio + hyper, HTTP/1.1 and HTTP/2
//! - Graceful shutdown — SIGTERM / Ctrl-C, drains in-flight requests
//! - One `posts` table — SQLite via `rusqlite`, migrations applied at open
//!
//! ## HTTP surface
//!
//! | Method | Path | Behavior |
//! |---|---|---|
//! | GET | `/api/posts` | list (optional `title_like=` / `body_like=` substring filters) |
//! | GET | `/api/posts/{id}` | fetch one |
//! | POST | `/api/posts` | create — `201` + `Location` |
//! | POST | `/api/posts/{id}` | edit (full replace) — `200` + `Location` |
//! | DELETE | `/api/posts/{id}` | delete — `204` |
//!
//! Every route speaks `application/json`, on both sides, and says so loudly:
//! `406` when the client won't accept it, `415` when the client won't send
//! it, `422` when the body doesn't validate, `404` with
//! `{"message": "Could not find post with id N"}` when the row isn't there.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use plume::{api, App, Config, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env();
//!     let app = App::open(&config).expect("database error");
//!
//!     Server::bind(&config.addr)
//!         .serve(app, api::routes())
//!         .await
//!         .expect("server error");
//! }
//! ```

pub mod api;
mod app;
mod config;
pub mod db;
mod error;
mod handler;
pub mod health;
mod model;
pub mod repo;
mod request;
mod response;
mod router;
mod server;
mod validate;

pub use app::App;
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use model::{Post, PostDraft, PostId};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
