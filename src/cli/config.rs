//! Configuration inspection and remote-URL commands

use anyhow::{Context, Result};
use tracing::warn;

use crate::{
    resolver::ConfigResolver,
    types::{CalculatorConfig, RemoteUrlSetting},
};

/// Arguments for `config`
#[derive(Debug, Default)]
pub struct ConfigArgs {
    pub fallback: bool,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Arguments for `set-remote-url`
#[derive(Debug, Default)]
pub struct SetRemoteUrlArgs {
    pub url: String,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Print the resolved configuration as pretty JSON
///
/// With `fallback`, a resolution failure prints the hard-coded configuration
/// instead of failing.
pub async fn run_config_mode(args: ConfigArgs) -> Result<()> {
    super::init_stderr_logging(args.verbose);

    let settings =
        super::load_settings(args.config.as_deref()).context("failed to load settings")?;
    let resolver = ConfigResolver::new(settings)?;

    let config = match resolver.load_config().await {
        Ok(config) => config,
        Err(e) if args.fallback => {
            warn!("Using fallback configuration: {}", e);
            eprintln!("Unable to load calculator settings: {}", e);
            CalculatorConfig::fallback()
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context("Unable to load calculator settings"));
        }
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Persist a new remote URL and print the stored value
pub async fn run_set_remote_url_mode(args: SetRemoteUrlArgs) -> Result<()> {
    super::init_stderr_logging(args.verbose);

    let settings =
        super::load_settings(args.config.as_deref()).context("failed to load settings")?;
    let resolver = ConfigResolver::new(settings)?;

    let stored = resolver
        .update_remote_url(&args.url)
        .await
        .context("failed to update remote URL")?;

    println!("{}", serde_json::to_string(&RemoteUrlSetting::new(stored))?);
    Ok(())
}
