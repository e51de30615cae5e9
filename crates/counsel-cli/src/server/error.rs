//! Server error types.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Error type for server startup and runtime failures.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Server configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Creates a bind error with address context.
    pub fn bind(address: impl Into<String>, source: io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig(_) => {
                Some("Check the configuration and ensure all required fields are set correctly")
            }
            Self::Bind { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => {
                    Some("Try using a port above 1024 or run with appropriate privileges")
                }
                io::ErrorKind::AddrInUse => Some(
                    "The port is already in use. Try a different port or stop the conflicting service",
                ),
                _ => Some("Check network configuration and firewall settings"),
            },
            Self::Runtime(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_errors_carry_address_context() {
        let err = ServerError::bind("127.0.0.1:80", io::Error::other("denied"));
        assert!(err.to_string().contains("127.0.0.1:80"));
    }

    #[test]
    fn address_in_use_has_a_suggestion() {
        let err = ServerError::bind(
            "127.0.0.1:3000",
            io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        );
        assert!(err.suggestion().is_some());
    }
}
