//! Error types for the air quality library.
//!
//! A single error enum covers data loading, selection validation and session
//! lookup, and maps onto JSON-RPC error codes for the server layer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the airq library.
#[derive(Debug, Error)]
pub enum AirqError {
    // File system errors
    #[error("IO error{}: {message}", io_location(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // Data loading errors
    #[error("CSV error: {message}")]
    Csv { message: String, row: Option<usize> },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid timestamp at row {row}: {value}")]
    InvalidTimestamp { row: usize, value: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Selection errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid params: {message}")]
    InvalidParams { message: String },

    #[error("Unknown pollutant: {0}")]
    UnknownPollutant(String),

    #[error("Unknown station: {0}")]
    UnknownStation(String),

    #[error("No stations or pollutants selected")]
    EmptySelection,

    // Session errors
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

fn io_location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

/// Result type alias for airq operations.
pub type Result<T> = std::result::Result<T, AirqError>;

impl From<std::io::Error> for AirqError {
    fn from(err: std::io::Error) -> Self {
        AirqError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for AirqError {
    fn from(err: serde_json::Error) -> Self {
        AirqError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<csv::Error> for AirqError {
    fn from(err: csv::Error) -> Self {
        let row = err.position().map(|p| p.record() as usize);
        AirqError::Csv {
            message: err.to_string(),
            row,
        }
    }
}

impl From<toml::de::Error> for AirqError {
    fn from(err: toml::de::Error) -> Self {
        AirqError::Config {
            message: err.to_string(),
        }
    }
}

impl AirqError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        AirqError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AirqError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// Standard codes:
    /// - -32601: Method not found
    /// - -32602: Invalid params
    /// - -32603: Internal error
    ///
    /// Application codes:
    /// - -32001: Session not found
    /// - -32002: Unknown station or pollutant
    /// - -32003: Data could not be loaded
    /// - -32005: Validation error
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            AirqError::MethodNotFound(_) => -32601,
            AirqError::InvalidParams { .. } => -32602,

            AirqError::SessionNotFound(_) => -32001,

            AirqError::UnknownPollutant(_) | AirqError::UnknownStation(_) => -32002,

            AirqError::Csv { .. }
            | AirqError::MissingColumn { .. }
            | AirqError::InvalidTimestamp { .. }
            | AirqError::FileNotFound(_) => -32003,

            AirqError::Validation { .. } | AirqError::EmptySelection => -32005,

            _ => -32603,
        }
    }
}
