//! HTTP middleware layers applied around the router.

mod cors;
mod observability;

pub use cors::{CorsConfig, create_cors_layer};
pub use observability::create_trace_layer;
