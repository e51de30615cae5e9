//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod chat;
mod error;
mod health;
mod request;

use axum::Router;
use axum::routing::{get, post};

pub use crate::handler::error::{Error, ErrorKind};
pub use crate::handler::request::ChatRequest;
use crate::service::ServiceState;

/// Builds the complete application router over the given state.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/healthz", get(health::healthz))
        .fallback(fallback_handler)
        .with_state(state)
}

/// Returns a structured 404 for unmatched paths.
async fn fallback_handler() -> Error<'static> {
    Error::new(ErrorKind::NotFound).with_message("Requested endpoint does not exist")
}
