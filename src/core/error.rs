//! Errors raised by the core data model.

use thiserror::Error;

/// Errors that can occur when encoding or decoding nested configurations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration could not be encoded for storage in its parent
    #[error("Failed to encode configuration for '{slot}': {source}")]
    Encode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored configuration does not match the requested state/payload types
    #[error("Failed to decode configuration for '{slot}': {source}")]
    Decode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur when filling a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Transition ({state}, {input}) is already registered")]
    DuplicateKey { state: String, input: String },
}
