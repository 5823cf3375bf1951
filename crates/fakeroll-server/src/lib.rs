//! HTTP API and CLI plumbing around `fakeroll-datagen`.

pub mod config;
pub mod errors;
pub mod http;

pub use config::ServerConfig;
pub use errors::{ApiError, ServerError};
pub use http::{build_router, serve, AppState};
