//! Weather cache HTTP presentation layer
//!
//! This crate provides the HTTP API for the weather cache service.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer};
pub use routes::create_router;
pub use server::serve_with_shutdown;
pub use state::AppState;
