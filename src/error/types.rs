//! Error taxonomy for configuration resolution and the service surface
//!
//! Resolver failures are always returned as values. None of them is fatal
//! at the resolver boundary; callers degrade remote → local → fallback.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// The bundled configuration document does not exist
    #[error("The calculator configuration could not be found: {}", path.display())]
    MissingConfig {
        /// Path that was probed
        path: PathBuf,
    },

    /// The bundled configuration document exists but cannot be read
    #[error("The calculator configuration file is not readable: {}", path.display())]
    UnreadableConfig {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The bundled configuration document is not a JSON object
    #[error("The calculator configuration is invalid: {reason}")]
    InvalidConfig {
        /// Path of the offending document
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },

    /// No remote configuration URL resolved; the remote layer is skipped
    #[error("No remote configuration URL has been defined")]
    RemoteDisabled,

    /// The remote configuration could not be fetched at all
    #[error("Remote configuration request to {url} failed")]
    RemoteTransport {
        /// Requested URL
        url: String,
        /// Transport failure (DNS, connect, TLS, timeout)
        #[source]
        source: reqwest::Error,
    },

    /// The remote endpoint answered with a non-200 status
    #[error("Remote configuration returned HTTP {status}")]
    RemoteHttp {
        /// Requested URL
        url: String,
        /// Status code returned by the remote endpoint
        status: u16,
    },

    /// The remote body is not a JSON object
    #[error("The remote calculator configuration is invalid: {reason}")]
    RemoteInvalidConfig {
        /// Requested URL
        url: String,
        /// Parser diagnostic
        reason: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Service settings errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The settings field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Persisted option store errors
    #[error("Option store error during {operation}: {details}")]
    OptionStore {
        /// The store operation that failed
        operation: String,
        /// Detailed error description
        details: String,
    },

    /// Validation errors
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Error message describing the validation failure
        message: String,
        /// The invalid value that caused the validation to fail
        value: Option<String>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
        /// Additional context about where the error occurred
        context: Option<String>,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid local configuration error
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid remote configuration error
    pub fn remote_invalid<S: Into<String>>(url: S, reason: S) -> Self {
        Self::RemoteInvalidConfig {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an option store error
    pub fn option_store<S: Into<String>>(operation: S, details: S) -> Self {
        Self::OptionStore {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Create a validation error carrying the rejected value
    pub fn validation_with_value<S: Into<String>>(field: S, message: S, value: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            value: Some(value.into()),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Whether this error came from the remote layer
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::RemoteDisabled
                | Error::RemoteTransport { .. }
                | Error::RemoteHttp { .. }
                | Error::RemoteInvalidConfig { .. }
        )
    }

    /// HTTP status used when the error reaches the REST surface
    pub fn status_code(&self) -> u16 {
        match self {
            Error::RemoteDisabled => 404,
            Error::RemoteHttp { status, .. } => *status,
            Error::Validation { .. } => 400,
            _ => 500,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::MissingConfig { .. } => "missing_config",
            Error::UnreadableConfig { .. } => "unreadable_config",
            Error::InvalidConfig { .. } => "invalid_config",
            Error::RemoteDisabled => "remote_disabled",
            Error::RemoteTransport { .. } => "remote_transport",
            Error::RemoteHttp { .. } => "remote_http",
            Error::RemoteInvalidConfig { .. } => "remote_invalid_config",
            Error::Json(..) => "json",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Io(..) => "io",
            Error::Config { .. } => "config",
            Error::OptionStore { .. } => "option_store",
            Error::Validation { .. } => "validation",
            Error::Internal { .. } => "internal",
        }
    }
}
