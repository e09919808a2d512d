//! Kubernetes health-check handlers.
//!
//! Kubernetes asks two questions. plume answers them.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Readiness gates on the only dependency this service has: the database.

use http::StatusCode;
use tracing::error;

use crate::app::App;
use crate::request::Request;
use crate::response::Response;

/// Liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can respond to
/// HTTP at all, it is alive — this handler intentionally has no dependencies.
pub async fn liveness(_app: App, _req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler.
///
/// Runs `SELECT 1` against the database. `200 ready` when it answers,
/// `503` when it doesn't.
pub async fn readiness(app: App, _req: Request) -> Response {
    let probe: Result<i64, rusqlite::Error> = {
        let conn = app.db();
        conn.query_row("SELECT 1;", [], |row| row.get(0))
    };

    match probe {
        Ok(_) => Response::text("ready"),
        Err(e) => {
            error!(error = %e, "readiness probe failed");
            Response::status(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
