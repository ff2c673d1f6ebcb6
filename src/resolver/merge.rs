//! Document merge and normalization
//!
//! [`merge_documents`] overlays a remote document onto the local one and
//! [`finalize`] turns the result into a [`CalculatorConfig`] by applying the
//! prefix and call-to-action fallbacks and normalizing every slider.

use crate::config::precedence::{DEFAULT_CTA_HREF, cta_href_chain};
use crate::types::{CalculatorConfig, ConfigDocument, RawSlider, SliderSpec};
use serde_json::Value;
use tracing::debug;

/// Currency prefix used when neither the document nor any slider sets one
pub const DEFAULT_PREFIX: &str = "$";

/// Overlay `remote` onto `local`
///
/// Sliders are matched by `id`, falling back to position. Remote sliders
/// past the local count are appended. Every other remote key that is set
/// replaces the local one.
pub fn merge_documents(local: &ConfigDocument, remote: &ConfigDocument) -> ConfigDocument {
    let mut merged = local.clone();

    if !remote.sliders.is_empty() {
        if local.sliders.is_empty() {
            merged.sliders = remote.sliders.clone();
        } else {
            for (index, slider) in local.sliders.iter().enumerate() {
                if let Some(over) = find_override(slider, index, &remote.sliders) {
                    merged.sliders[index] = slider.overlay(over);
                }
            }

            if remote.sliders.len() > local.sliders.len() {
                let extras = &remote.sliders[local.sliders.len()..];
                debug!("Appending {} remote-only slider(s)", extras.len());
                merged.sliders.extend(extras.iter().cloned());
            }
        }
    }

    if remote.prefix.is_some() {
        merged.prefix = remote.prefix.clone();
    }
    if remote.cta_href.is_some() {
        merged.cta_href = remote.cta_href.clone();
    }
    for (key, value) in &remote.extra {
        if !value.is_null() {
            merged.extra.insert(key.clone(), value.clone());
        }
    }

    merged
}

fn find_override<'a>(
    slider: &RawSlider,
    index: usize,
    remote: &'a [RawSlider],
) -> Option<&'a RawSlider> {
    let by_id = slider
        .id
        .as_ref()
        .and_then(|id| remote.iter().find(|candidate| candidate.id.as_ref() == Some(id)))
        .filter(|candidate| !candidate.is_empty());

    by_id.or_else(|| remote.get(index).filter(|candidate| !candidate.is_empty()))
}

/// Resolve the currency prefix of a document
///
/// Non-empty document prefix, then the first non-empty slider prefix, then `$`.
pub fn resolve_prefix(document: &ConfigDocument) -> String {
    document
        .prefix
        .as_deref()
        .filter(|prefix| !prefix.is_empty())
        .or_else(|| {
            document
                .sliders
                .iter()
                .filter_map(|slider| slider.prefix.as_deref())
                .find(|prefix| !prefix.is_empty())
        })
        .unwrap_or(DEFAULT_PREFIX)
        .to_string()
}

/// Normalize a (merged or local-only) document into the served configuration
pub fn finalize(document: ConfigDocument) -> CalculatorConfig {
    let currency_prefix = resolve_prefix(&document);
    let cta_href = cta_href_chain(document.cta_href.clone()).resolve_or(DEFAULT_CTA_HREF);

    let total = document.sliders.len();
    let sliders: Vec<SliderSpec> = document
        .sliders
        .iter()
        .filter_map(SliderSpec::from_raw)
        .collect();
    if sliders.len() < total {
        debug!("Dropped {} slider(s) without an id", total - sliders.len());
    }

    let mut extra = document.extra;
    extra.retain(|_, value| !matches!(value, Value::Null));

    CalculatorConfig {
        sliders,
        currency_prefix,
        cta_href,
        extra,
    }
}

/// Merge and normalize in one step
pub fn merge(local: &ConfigDocument, remote: &ConfigDocument) -> CalculatorConfig {
    finalize(merge_documents(local, remote))
}
