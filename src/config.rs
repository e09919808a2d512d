//! Process configuration from the environment.
//!
//! plume is configured the twelve-factor way: a couple of environment
//! variables, read once at startup. There is no config file layer — the
//! deployment (systemd unit, container spec, pod manifest) owns the values.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PLUME_ADDR` | `0.0.0.0:3000` | socket address to bind |
//! | `PLUME_DB` | `plume.db` | SQLite database path; `:memory:` for ephemeral |

use std::env;

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `host:port` the server binds to.
    pub addr: String,
    /// SQLite database path. `:memory:` opens an in-process ephemeral store.
    pub database: String,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            addr: env::var("PLUME_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned()),
            database: env::var("PLUME_DB").unwrap_or_else(|_| "plume.db".to_owned()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_owned(),
            database: ":memory:".to_owned(),
        }
    }
}
