//! Savings model
//!
//! Annual spend on a per-endpoint tool against per-technician seats.

use crate::types::{
    CalculatorConfig, CalculatorFigures, CalculatorInputs, DisplayFigures, EstimateResponse,
    SliderView,
};

/// Monthly price of one technician seat
pub const DEFAULT_SEAT_RATE: f64 = 149.0;

const MONTHS_PER_YEAR: f64 = 12.0;

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Compute the three annual figures for a set of inputs
///
/// Non-finite inputs count as 0. Results are not rounded and negative
/// inputs propagate, but `savings` never drops below 0.
pub fn compute(inputs: &CalculatorInputs, seat_rate: f64) -> CalculatorFigures {
    let technicians = finite(inputs.technicians);
    let endpoints = finite(inputs.endpoints);
    let endpoint_rate = finite(inputs.endpoint_rate);
    let seat_rate = finite(seat_rate);

    let current_annual = endpoints * endpoint_rate * MONTHS_PER_YEAR;
    let atera_annual = technicians * seat_rate * MONTHS_PER_YEAR;
    let savings = (current_annual - atera_annual).max(0.0);

    CalculatorFigures {
        savings,
        atera_annual,
        current_annual,
    }
}

/// Figures plus display strings rendered against `config`
///
/// Sliders not bound to an input are shown at their default value.
pub fn estimate(
    inputs: CalculatorInputs,
    seat_rate: f64,
    config: &CalculatorConfig,
) -> EstimateResponse {
    let figures = compute(&inputs, seat_rate);
    let sliders = config
        .sliders
        .iter()
        .map(|slider| {
            let value = inputs.value_of(&slider.id).unwrap_or(slider.default_value);
            SliderView::new(slider, value)
        })
        .collect();

    EstimateResponse {
        inputs,
        display: DisplayFigures::new(&figures, &config.currency_prefix),
        figures,
        seat_rate,
        sliders,
    }
}
