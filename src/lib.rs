//! Compact savings calculator
//!
//! Configuration pipeline and savings model behind the compact calculator
//! block. Slider definitions come from a bundled JSON document, optionally
//! overlaid by a remote one, merged by slider id and cached for an hour.
//!
//! # Features
//!
//! - **Config resolution**: local document, remote override, merge, TTL cache
//! - **Savings model**: annual per-endpoint spend against per-technician seats
//! - **HTTP Server Mode**: REST endpoints for the presentation layer
//! - **CLI Mode**: one-shot estimates and configuration inspection
//!
//! # Usage
//!
//! ## HTTP Server Mode
//!
//! ```bash
//! compact-calc server --port 4417 --host 0.0.0.0
//! ```
//!
//! ## Estimate
//!
//! ```bash
//! compact-calc --technicians 10 --endpoints 1200 --endpoint-rate 7
//! ```
//!
//! # Examples
//!
//! ```rust
//! use atera_compact_calculator::{CalculatorInputs, savings};
//!
//! let figures = savings::compute(
//!     &CalculatorInputs::new(10.0, 1200.0, 7.0),
//!     savings::DEFAULT_SEAT_RATE,
//! );
//! assert_eq!(figures.savings, 82920.0);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod savings;
pub mod server;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use resolver::ConfigResolver;
pub use types::{
    CalculatorConfig, CalculatorFigures, CalculatorInputs, ErrorResponse, PingResponse,
    SliderSpec,
};

/// Serializes unit tests that read or write process environment variables
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
