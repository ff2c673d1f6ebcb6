//! Configuration management for the calculator service
//!
//! Service settings (server, logging, network, calculator sources) and the
//! precedence chains used to resolve individual values.

pub mod loader;
pub mod precedence;
pub mod settings;

pub use loader::ConfigLoader;
pub use precedence::PrecedenceChain;
pub use settings::{CalculatorSettings, Settings};
