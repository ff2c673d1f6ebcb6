//! Command-line entry points
//!
//! `server` runs the HTTP service, the remaining modes are one-shot
//! commands that print JSON on stdout and log on stderr.

pub mod config;
pub mod estimate;
pub mod server;

use crate::{Settings, config::ConfigLoader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Load settings from `--config`, ATERA_CALC_CONFIG or the default location
pub fn load_settings(config: Option<&str>) -> crate::Result<Settings> {
    let config_path = match config {
        Some(path) => Some(std::path::PathBuf::from(path)),
        None => ConfigLoader::get_config_path(),
    };
    ConfigLoader::new().load(config_path.as_deref())
}

/// Log filter with precedence `--verbose` > RUST_LOG > configured level
pub fn env_filter(verbose: bool, level: &str) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    }
}

/// Install a stderr subscriber for one-shot commands
///
/// Quiet by default so stdout stays machine-readable.
pub fn init_stderr_logging(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose, "error"))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
