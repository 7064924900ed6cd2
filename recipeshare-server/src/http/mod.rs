//! HTTP layer
//!
//! Axum server with:
//! - every route under `/api`
//! - `{data}` / `{error}` JSON envelopes
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown, then pool drain

pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use envelope::Envelope;
pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerError};
