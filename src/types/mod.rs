//! Type definitions for the calculator
//!
//! Raw documents, normalized configuration, calculator values and API payloads.

pub mod calculator;
pub mod document;
pub mod response;
pub mod slider;

pub use calculator::{CalculatorConfig, CalculatorFigures, CalculatorInputs};
pub use document::{ConfigDocument, RawSlider};
pub use response::{
    DisplayFigures, ErrorResponse, EstimateResponse, PingResponse, RemoteUrlSetting, SliderView,
};
pub use slider::{Mark, SliderFormat, SliderSpec};
