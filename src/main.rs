//! plume service entry point.
//!
//! Run with:
//!   RUST_LOG=info PLUME_DB=plume.db cargo run
//!
//! Try:
//!   curl http://localhost:3000/api/posts
//!   curl -X POST http://localhost:3000/api/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"Example Post","body":"Just a test"}'
//!   curl http://localhost:3000/api/posts/1
//!   curl -X DELETE http://localhost:3000/api/posts/1
//!   curl http://localhost:3000/healthz

use plume::{App, Config, Server, api};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let app = App::open(&config).expect("database error");

    Server::bind(&config.addr)
        .serve(app, api::routes())
        .await
        .expect("server error");
}
