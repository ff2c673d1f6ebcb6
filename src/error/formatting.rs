//! Error formatting utilities
//!
//! Turns [`Error`] values into the strings and JSON payloads used by the
//! REST surface and structured log lines.

use crate::Error;
use std::error::Error as StdError;

/// Format error for display, appending nested causes
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::RemoteHttp { url, status } => {
            format!("Remote configuration at {} returned HTTP {}", url, status)
        }

        Error::RemoteInvalidConfig { url, reason } => {
            format!("Remote configuration at {} is invalid: {}", url, reason)
        }

        Error::InvalidConfig { path, reason } => {
            format!(
                "Calculator configuration {} is invalid: {}",
                path.display(),
                reason
            )
        }

        Error::Validation {
            field,
            message,
            value,
        } => match value {
            Some(val) => format!(
                "Validation failed for {} (value: '{}'): {}",
                field, val, message
            ),
            None => format!("Validation failed for {}: {}", field, message),
        },

        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for JSON API responses
pub fn format_error_for_api(error: &Error) -> serde_json::Value {
    serde_json::json!({
        "error": format_error(error),
        "category": error.category(),
        "status": error.status_code(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "remote": error.is_remote(),
    });

    match error {
        Error::RemoteHttp { url, status } => {
            log_data["url"] = serde_json::Value::String(url.clone());
            log_data["http_status"] = serde_json::Value::Number((*status).into());
        }
        Error::RemoteTransport { url, source } => {
            log_data["url"] = serde_json::Value::String(url.clone());
            log_data["timeout"] = serde_json::Value::Bool(source.is_timeout());
        }
        Error::MissingConfig { path }
        | Error::UnreadableConfig { path, .. }
        | Error::InvalidConfig { path, .. } => {
            log_data["path"] = serde_json::Value::String(path.display().to_string());
        }
        _ => {}
    }

    log_data
}
