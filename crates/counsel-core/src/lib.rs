#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Counsel Core
//!
//! This crate provides the foundational types for the counsel chat gateway.
//! It defines the chat and stream-frame data model, best-effort document
//! extraction behind a fetcher trait, and the normalization pass that turns
//! a client chat history into the agent runtime's message envelope.

/// Tracing target for document extraction.
pub const TRACING_TARGET_EXTRACT: &str = "counsel_core::extract";

/// Tracing target for message normalization.
pub const TRACING_TARGET_NORMALIZE: &str = "counsel_core::normalize";

mod error;

pub mod extract;
pub mod normalize;
pub mod types;

// Re-export key types for convenience
pub use error::{BoxedError, Error, ErrorKind, Result};
