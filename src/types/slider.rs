//! Normalized slider definitions
//!
//! [`SliderSpec`] is the validated form of a [`RawSlider`]: every numeric
//! field is a finite number and defaults have been applied. Entries without
//! an `id` never make it this far.

use crate::types::RawSlider;
use crate::utils::coerce::{number_or, to_number};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_currency() -> String {
    "USD".to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Display format of a slider's scale marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SliderFormat {
    /// Plain number, optionally with thousands grouping
    Number {
        #[serde(default, skip_serializing_if = "is_false")]
        thousands: bool,
    },
    /// Currency amount
    Currency {
        /// ISO 4217 code
        #[serde(rename = "currency", default = "default_currency")]
        currency_code: String,
        #[serde(rename = "maximumFractionDigits", default)]
        max_fraction_digits: u8,
    },
}

impl Default for SliderFormat {
    fn default() -> Self {
        SliderFormat::Number { thousands: false }
    }
}

/// A scale label: either a number to format or a literal string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mark {
    Number(f64),
    Label(String),
}

/// One adjustable input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    #[serde(rename = "default")]
    pub default_value: f64,
    #[serde(default)]
    pub marks: Vec<Mark>,
    #[serde(default)]
    pub format: SliderFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl SliderSpec {
    /// Create a plain numeric slider
    pub fn new(id: impl Into<String>, min: f64, max: f64, step: f64, default_value: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            min,
            max,
            step,
            default_value,
            marks: Vec::new(),
            format: SliderFormat::default(),
            prefix: None,
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the scale marks
    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    /// Set the display format
    pub fn with_format(mut self, format: SliderFormat) -> Self {
        self.format = format;
        self
    }

    /// Validate and default a raw document entry
    ///
    /// Returns `None` when the entry has no non-empty `id`.
    pub fn from_raw(raw: &RawSlider) -> Option<Self> {
        let id = raw.id.as_deref().filter(|id| !id.is_empty())?.to_string();

        let min = number_or(raw.min.as_ref(), 0.0);
        let max = number_or(raw.max.as_ref(), min);
        let step = raw
            .step
            .as_ref()
            .and_then(to_number)
            .filter(|step| *step > 0.0)
            .unwrap_or(1.0);
        let default_value = number_or(raw.default_value.as_ref(), min);

        let label = raw
            .label
            .clone()
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| id.clone());

        let marks = match &raw.marks {
            Some(Value::Array(items)) => items.iter().filter_map(parse_mark).collect(),
            _ => Vec::new(),
        };

        let format = raw
            .format
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();

        Some(Self {
            id,
            label,
            min,
            max,
            step,
            default_value,
            marks,
            format,
            prefix: raw.prefix.clone(),
        })
    }

    /// Position of `value` within the range as a percentage in [0, 100]
    pub fn progress(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        let clamped = value.clamp(self.min, self.max);
        (((clamped - self.min) / range) * 100.0).clamp(0.0, 100.0)
    }
}

fn parse_mark(value: &Value) -> Option<Mark> {
    match value {
        Value::Number(n) => n.as_f64().map(Mark::Number),
        Value::String(s) => Some(Mark::Label(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawSlider {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_id_is_dropped() {
        assert!(SliderSpec::from_raw(&raw(json!({"min": 0, "max": 5}))).is_none());
        assert!(SliderSpec::from_raw(&raw(json!({"id": "", "min": 0}))).is_none());
    }

    #[test]
    fn test_defaults_applied() {
        let spec = SliderSpec::from_raw(&raw(json!({"id": "endpoints", "min": 100}))).unwrap();

        assert_eq!(spec.label, "endpoints");
        assert_eq!(spec.min, 100.0);
        assert_eq!(spec.max, 100.0);
        assert_eq!(spec.step, 1.0);
        assert_eq!(spec.default_value, 100.0);
        assert!(spec.marks.is_empty());
        assert_eq!(spec.format, SliderFormat::Number { thousands: false });
    }

    #[test]
    fn test_non_positive_step_defaults_to_one() {
        let zero = SliderSpec::from_raw(&raw(json!({"id": "a", "step": 0}))).unwrap();
        let negative = SliderSpec::from_raw(&raw(json!({"id": "a", "step": -5}))).unwrap();
        let junk = SliderSpec::from_raw(&raw(json!({"id": "a", "step": "big"}))).unwrap();
        assert_eq!(zero.step, 1.0);
        assert_eq!(negative.step, 1.0);
        assert_eq!(junk.step, 1.0);
    }

    #[test]
    fn test_invalid_default_falls_back_to_min() {
        let spec =
            SliderSpec::from_raw(&raw(json!({"id": "a", "min": 3, "default": "lots"}))).unwrap();
        assert_eq!(spec.default_value, 3.0);
    }

    #[test]
    fn test_marks_and_currency_format() {
        let spec = SliderSpec::from_raw(&raw(json!({
            "id": "endpointRate",
            "marks": [1, "mid", 20, {"bad": true}],
            "format": {"type": "currency", "currency": "EUR", "maximumFractionDigits": 2}
        })))
        .unwrap();

        assert_eq!(
            spec.marks,
            vec![
                Mark::Number(1.0),
                Mark::Label("mid".to_string()),
                Mark::Number(20.0)
            ]
        );
        assert_eq!(
            spec.format,
            SliderFormat::Currency {
                currency_code: "EUR".to_string(),
                max_fraction_digits: 2
            }
        );
    }

    #[test]
    fn test_unknown_format_falls_back_to_number() {
        let spec =
            SliderSpec::from_raw(&raw(json!({"id": "a", "format": {"type": "percent"}}))).unwrap();
        assert_eq!(spec.format, SliderFormat::default());
    }

    #[test]
    fn test_progress() {
        let spec = SliderSpec::new("technicians", 0.0, 20.0, 1.0, 10.0);
        assert_eq!(spec.progress(10.0), 50.0);
        assert_eq!(spec.progress(-4.0), 0.0);
        assert_eq!(spec.progress(40.0), 100.0);

        let flat = SliderSpec::new("flat", 5.0, 5.0, 1.0, 5.0);
        assert_eq!(flat.progress(5.0), 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let spec = SliderSpec::new("technicians", 0.0, 20.0, 1.0, 10.0);
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["default"], json!(10.0));
        assert_eq!(value["format"], json!({"type": "number"}));
        assert!(value.get("prefix").is_none());
    }
}
