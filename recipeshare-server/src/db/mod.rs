//! Database layer - connection provider, migrations and repositories
//!
//! # Design Principles
//!
//! - Bounded pool (1..=3 connections by default), passed explicitly
//! - Every statement runs through `with_connection`
//! - Errors are typed (`DbError`), never swallowed into empty results
//! - Transactions for multi-row writes (steps, cascading delete)

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{close_pool, create_pool, verify_pool, with_connection, PoolSettings, ShutdownError};
pub use repos::*;
pub use sqlx::PgPool;
