//! Error types shared across the workspace
//!
//! Grouped by where they originate: config / transport / general

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum TelemetryError {
    // ===== Configuration Errors =====
    /// Fleet config could not be parsed
    #[error("failed to parse fleet config: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Fleet config parsed but carries an invalid value
    #[error("invalid config field '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Transport Errors =====
    /// Sink construction error (socket bind/connect)
    #[error("transport init error for '{target}': {message}")]
    TransportInit { target: String, message: String },

    /// Sink send error
    #[error("sink '{sink_name}' send error: {message}")]
    TransportSend { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl TelemetryError {
    /// Parse error without an underlying source
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Validation error for a named config field
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create transport init error
    pub fn transport_init(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportInit {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create sink send error
    pub fn transport_send(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportSend {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
