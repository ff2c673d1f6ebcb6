//! Response type definitions
//!
//! Payloads returned by the HTTP service and the CLI.

use crate::types::{CalculatorFigures, CalculatorInputs, SliderSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Savings estimate with display strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    /// Inputs after coercion
    pub inputs: CalculatorInputs,
    /// Raw figures, unrounded
    pub figures: CalculatorFigures,
    /// Figures formatted with the resolved currency prefix
    pub display: DisplayFigures,
    /// Monthly per-seat price used for the estimate
    pub seat_rate: f64,
    /// Per-slider position and rendered scale labels
    pub sliders: Vec<SliderView>,
}

/// A slider as rendered for the current inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderView {
    pub id: String,
    pub label: String,
    pub value: f64,
    /// Fill percentage of the track
    pub progress: f64,
    /// Scale marks formatted per the slider's display format
    pub marks: Vec<String>,
}

impl SliderView {
    pub fn new(slider: &SliderSpec, value: f64) -> Self {
        use crate::utils::format::format_mark;
        Self {
            id: slider.id.clone(),
            label: slider.label.clone(),
            value,
            progress: slider.progress(value),
            marks: slider
                .marks
                .iter()
                .map(|mark| format_mark(slider, mark))
                .collect(),
        }
    }
}

/// Formatted figures as shown on the summary card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFigures {
    pub savings: String,
    pub atera_annual: String,
    pub current_annual: String,
}

impl DisplayFigures {
    /// Format figures with whole-unit precision
    pub fn new(figures: &CalculatorFigures, prefix: &str) -> Self {
        use crate::utils::format::format_currency;
        Self {
            savings: format_currency(figures.savings, prefix, 0),
            atera_annual: format_currency(figures.atera_annual, prefix, 0),
            current_annual: format_currency(figures.current_annual, prefix, 0),
        }
    }
}

/// The persisted remote configuration URL setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteUrlSetting {
    /// Stored value; empty string when unset
    #[serde(default)]
    pub remote_url: String,
}

impl RemoteUrlSetting {
    pub fn new(remote_url: impl Into<String>) -> Self {
        Self {
            remote_url: remote_url.into(),
        }
    }
}

/// Ping response for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    /// Server uptime in seconds
    pub server_uptime: u64,

    /// Server version
    pub version: String,
}

impl PingResponse {
    /// Create a new ping response
    pub fn new(server_uptime: u64, version: impl Into<String>) -> Self {
        Self {
            server_uptime,
            version: version.into(),
        }
    }
}

/// Error response for API errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Optional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,

    /// Error timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            context: None,
            details: None,
            timestamp: Some(Utc::now()),
            version: Some(crate::utils::version::get_version().to_string()),
        }
    }

    /// Create error response with context
    pub fn with_context(error: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..Self::new(error)
        }
    }

    /// Create error response with both context and details
    pub fn with_context_and_details(
        error: impl Into<String>,
        context: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            context: Some(context.into()),
            details: Some(details),
            ..Self::new(error)
        }
    }
}
