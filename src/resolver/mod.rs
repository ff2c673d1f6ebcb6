//! # Configuration resolver
//!
//! Builds the calculator configuration served to the presentation layer.
//!
//! ## Pipeline
//!
//! 1. [`local::load_local`] reads the bundled slider document
//! 2. [`ConfigResolver::resolve_remote_url`] walks the URL precedence chain
//! 3. [`remote::RemoteFetcher`] fetches the remote override, if any
//! 4. [`merge::merge`] overlays remote onto local and normalizes sliders
//! 5. the result is cached under a fixed key for the configured TTL
//!
//! ## Degradation
//!
//! A failing remote falls back to the local document. When both fail the
//! remote error is returned and callers may render
//! [`CalculatorConfig::fallback`](crate::types::CalculatorConfig::fallback).

pub mod local;
pub mod manager;
pub mod merge;
pub mod options;
pub mod remote;

pub use local::load_local;
pub use manager::ConfigResolver;
pub use merge::{finalize, merge, merge_documents};
pub use options::{FileOptionStore, MemoryOptionStore, OptionStore};
pub use remote::{RemoteFetcher, RemoteSource};
