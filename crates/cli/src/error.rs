//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
///
/// Most failures bubble up as `anyhow` chains from the library crates;
/// these variants cover conditions the CLI detects itself.
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Transport setup error
    #[error("Failed to set up transport towards {target}: {message}")]
    TransportSetup { target: String, message: String },

    /// Fleet execution error
    #[error("Fleet execution failed: {message}")]
    FleetExecution { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn transport_setup(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportSetup {
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn fleet_execution(message: impl Into<String>) -> Self {
        Self::FleetExecution {
            message: message.into(),
        }
    }
}
