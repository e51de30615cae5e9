//! Service configuration and shared application state.

mod config;
mod state;

pub use config::ServiceConfig;
pub use state::ServiceState;
