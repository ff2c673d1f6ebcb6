//! HTTP server implementation
//!
//! Axum router serving the resolved calculator configuration, savings
//! estimates and the remote URL setting.

pub mod app;
pub mod handlers;

pub use app::{create_app, create_app_with_resolver};
