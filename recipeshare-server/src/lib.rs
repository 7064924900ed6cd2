//! recipeshare-server: REST API over the recipe-sharing database
//!
//! Layers, leaf-first:
//! - `db::pool` - pool construction and `with_connection`
//! - `db::repos` - one repository per entity, each method one statement
//! - `http` - axum router, handlers, JSON envelope and error mapping
//!
//! The pool is owned by the process root and threaded into handlers
//! through `AppState`; there is no global database state.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use db::{create_pool, with_connection, DbError, PoolSettings};
pub use http::{build_router, run_server, AppState, ServerError};
