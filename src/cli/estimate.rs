//! Estimate mode CLI logic
//!
//! Prints a savings estimate for the given slider values as JSON.

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    resolver::ConfigResolver,
    savings,
    types::{CalculatorConfig, CalculatorInputs, EstimateResponse},
};

/// Arguments for estimate mode
#[derive(Debug, Default)]
pub struct EstimateArgs {
    pub technicians: Option<f64>,
    pub endpoints: Option<f64>,
    pub endpoint_rate: Option<f64>,
    pub seat_rate: Option<f64>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Build the estimate for `args` against a resolved configuration
pub fn build_estimate(
    args: &EstimateArgs,
    config: &CalculatorConfig,
    default_seat_rate: f64,
) -> EstimateResponse {
    let inputs = CalculatorInputs::or_defaults(
        args.technicians,
        args.endpoints,
        args.endpoint_rate,
        config.default_inputs(),
    );
    let seat_rate = args.seat_rate.unwrap_or(default_seat_rate);
    savings::estimate(inputs, seat_rate, config)
}

/// Run estimate mode with the given arguments
pub async fn run_estimate_mode(args: EstimateArgs) -> Result<()> {
    super::init_stderr_logging(args.verbose);

    let settings =
        super::load_settings(args.config.as_deref()).context("failed to load settings")?;

    let config = ConfigResolver::new(settings.clone())?
        .config_or_fallback()
        .await;

    let response = build_estimate(&args, &config, settings.calculator.seat_rate);
    debug!("Estimate: {:?}", response);

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
