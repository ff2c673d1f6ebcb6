//! Resolved configuration and calculator value types

use crate::types::SliderSpec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Slider id bound to [`CalculatorInputs::technicians`]
pub const TECHNICIANS: &str = "technicians";
/// Slider id bound to [`CalculatorInputs::endpoints`]
pub const ENDPOINTS: &str = "endpoints";
/// Slider id bound to [`CalculatorInputs::endpoint_rate`]
pub const ENDPOINT_RATE: &str = "endpointRate";

/// Fully resolved calculator configuration served to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Normalized sliders: local order first, remote extras appended
    pub sliders: Vec<SliderSpec>,

    /// Currency prefix
    #[serde(rename = "prefix")]
    pub currency_prefix: String,

    /// Call-to-action link
    #[serde(rename = "ctaHref")]
    pub cta_href: String,

    /// Remaining top-level document keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalculatorConfig {
    /// Hard-coded configuration rendered when nothing else resolves
    pub fn fallback() -> Self {
        Self {
            sliders: vec![
                SliderSpec::new(TECHNICIANS, 0.0, 20.0, 1.0, 10.0).with_label("Technicians"),
                SliderSpec::new(ENDPOINTS, 0.0, 2500.0, 100.0, 1200.0).with_label("Endpoints"),
                SliderSpec::new(ENDPOINT_RATE, 1.0, 20.0, 1.0, 7.0)
                    .with_label("Cost per endpoint"),
            ],
            currency_prefix: "$".to_string(),
            cta_href: "#".to_string(),
            extra: Map::new(),
        }
    }

    /// Look up a slider by id
    pub fn slider(&self, id: &str) -> Option<&SliderSpec> {
        self.sliders.iter().find(|slider| slider.id == id)
    }

    /// Inputs initialised from each bound slider's default value
    pub fn default_inputs(&self) -> CalculatorInputs {
        let default_of = |id: &str| self.slider(id).map_or(0.0, |s| s.default_value);
        CalculatorInputs::new(
            default_of(TECHNICIANS),
            default_of(ENDPOINTS),
            default_of(ENDPOINT_RATE),
        )
    }
}

/// Live slider values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    pub technicians: f64,
    pub endpoints: f64,
    pub endpoint_rate: f64,
}

impl CalculatorInputs {
    pub fn new(technicians: f64, endpoints: f64, endpoint_rate: f64) -> Self {
        Self {
            technicians,
            endpoints,
            endpoint_rate,
        }
    }

    /// Value bound to the slider `id`, if it drives one of the inputs
    pub fn value_of(&self, id: &str) -> Option<f64> {
        match id {
            TECHNICIANS => Some(self.technicians),
            ENDPOINTS => Some(self.endpoints),
            ENDPOINT_RATE => Some(self.endpoint_rate),
            _ => None,
        }
    }

    /// Fill unset fields from `base`
    pub fn or_defaults(
        technicians: Option<f64>,
        endpoints: Option<f64>,
        endpoint_rate: Option<f64>,
        base: CalculatorInputs,
    ) -> Self {
        Self {
            technicians: technicians.unwrap_or(base.technicians),
            endpoints: endpoints.unwrap_or(base.endpoints),
            endpoint_rate: endpoint_rate.unwrap_or(base.endpoint_rate),
        }
    }
}

/// Annual cost figures derived from [`CalculatorInputs`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorFigures {
    pub savings: f64,
    pub atera_annual: f64,
    pub current_annual: f64,
}
