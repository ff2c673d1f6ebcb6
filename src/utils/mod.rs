//! Utility functions and helpers
//!
//! This module contains utility functions used throughout the application.

pub mod cache;
pub mod coerce;
pub mod format;
pub mod version;

pub use cache::{CONFIG_CACHE_KEY, ConfigCache, TransientCache, config_cache_key};
pub use version::{VERSION, get_version};
