//! Error types for the Bulb Lab circuit model.
//!
//! This module provides a unified error type [`BulbLabError`] covering
//! configuration validation, the explanation service, and export.
//!
//! The circuit model and layout engine themselves never fail: once a
//! [`CircuitConfiguration`](crate::circuit::CircuitConfiguration) exists it is
//! valid, so errors only appear at the boundaries.

use thiserror::Error;

/// Result type alias using [`BulbLabError`].
pub type Result<T> = std::result::Result<T, BulbLabError>;

/// Unified error type for all Bulb Lab operations.
#[derive(Error, Debug)]
pub enum BulbLabError {
    // ============ Configuration Errors ============
    /// Battery count outside the accepted domain
    #[error("Invalid battery count '{value}': {message}")]
    InvalidBatteryCount { value: String, message: String },

    /// Unrecognised connection name
    #[error("Unknown connection type '{name}' (expected 'series' or 'parallel')")]
    UnknownConnectionType { name: String },

    // ============ Explanation Service Errors ============
    /// No credential configured for the text generation service
    #[error("Explanation service credential '{variable}' is not set")]
    MissingCredential { variable: String },

    /// Network or HTTP failure talking to the service
    #[error("Explanation service request failed: {message}")]
    Transport { message: String },

    /// The service answered with something we could not decode
    #[error("Malformed explanation service response: {message}")]
    MalformedResponse { message: String },

    // ============ Export Errors ============
    /// Failed to serialize a frame or geometry to JSON
    #[error("Failed to serialize {what}: {source}")]
    Serialization {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl BulbLabError {
    /// Create an invalid battery count error
    pub fn invalid_battery_count(value: impl ToString, message: impl Into<String>) -> Self {
        Self::InvalidBatteryCount {
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            what: what.into(),
            source,
        }
    }
}
