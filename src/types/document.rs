//! Configuration document shapes
//!
//! A [`ConfigDocument`] is what the local file and the remote endpoint
//! contain before normalization. Every field is optional, unknown keys are
//! kept in `extra` so they survive the merge and reach the client.

use crate::utils::coerce::lenient_string;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Top-level slider configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Slider entries in document order; non-object entries are discarded
    #[serde(
        default,
        deserialize_with = "lenient_sliders",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sliders: Vec<RawSlider>,

    /// Currency prefix shown in front of every figure
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prefix: Option<String>,

    /// Call-to-action link
    #[serde(
        rename = "ctaHref",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cta_href: Option<String>,

    /// Any other top-level keys, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One slider entry exactly as written in a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSlider {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Value>,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,

    /// Per-slider currency prefix, consulted when the document has none
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prefix: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDocument {
    /// Parse a document from JSON text; the root must be an object
    pub fn from_json(text: &str) -> std::result::Result<Self, String> {
        let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        Self::from_value(value)
    }

    /// Build a document from an already-parsed JSON value
    pub fn from_value(value: Value) -> std::result::Result<Self, String> {
        if !value.is_object() {
            return Err(format!(
                "expected a JSON object at the document root, found {}",
                json_kind(&value)
            ));
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}

impl RawSlider {
    /// Convenience constructor used by tests and the fallback document
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// True when the entry carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.label.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.step.is_none()
            && self.default_value.is_none()
            && self.marks.is_none()
            && self.format.is_none()
            && self.prefix.is_none()
            && self.extra.is_empty()
    }

    /// Shallow merge: every field present in `over` replaces the one in `self`
    pub fn overlay(&self, over: &RawSlider) -> RawSlider {
        let mut extra = self.extra.clone();
        for (key, value) in &over.extra {
            extra.insert(key.clone(), value.clone());
        }

        RawSlider {
            id: over.id.clone().or_else(|| self.id.clone()),
            label: over.label.clone().or_else(|| self.label.clone()),
            min: over.min.clone().or_else(|| self.min.clone()),
            max: over.max.clone().or_else(|| self.max.clone()),
            step: over.step.clone().or_else(|| self.step.clone()),
            default_value: over
                .default_value
                .clone()
                .or_else(|| self.default_value.clone()),
            marks: over.marks.clone().or_else(|| self.marks.clone()),
            format: over.format.clone().or_else(|| self.format.clone()),
            prefix: over.prefix.clone().or_else(|| self.prefix.clone()),
            extra,
        }
    }
}

fn lenient_sliders<'de, D>(deserializer: D) -> Result<Vec<RawSlider>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    let mut sliders = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_object() {
            tracing::debug!("Skipping non-object slider entry: {}", item);
            continue;
        }
        sliders.push(serde_json::from_value(item).map_err(serde::de::Error::custom)?);
    }
    Ok(sliders)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
