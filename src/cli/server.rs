//! Server mode CLI logic
//!
//! Contains the core logic for running the HTTP service.

use crate::{Settings, resolver::ConfigResolver, server::app, utils::version};
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Arguments for server mode
#[derive(Debug)]
pub struct ServerArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Run server mode with the given arguments
pub async fn run_server_mode(args: ServerArgs) -> Result<()> {
    // Settings are loaded before logging so logging.level can take effect.
    // Precedence: CLI arguments > environment > settings file > defaults
    let mut settings = super::load_settings(args.config.as_deref()).unwrap_or_else(|e| {
        // Can't use tracing here since it's not initialized yet
        eprintln!(
            "Warning: Failed to load configuration: {}. Using defaults.",
            e
        );
        Settings::default()
    });

    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.logging.verbose |= args.verbose;

    let registry = tracing_subscriber::registry().with(super::env_filter(
        settings.logging.verbose,
        &settings.logging.level,
    ));
    let _ = if settings.logging.format == "compact" {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    tracing::info!(
        "Starting calculator service v{} (local config {:?})",
        version::get_version(),
        settings.calculator.local_config_path
    );

    let resolver = ConfigResolver::new(settings.clone()).context("failed to build resolver")?;
    let app = app::create_app_with_resolver(resolver);

    let addr = parse_and_bind_address(&settings.server.host, settings.server.port).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Calculator service v{} listening on {}",
        version::get_version(),
        listener.local_addr().unwrap_or(addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse host string and pick the address to bind
///
/// `::` falls back to `0.0.0.0` when IPv6 is unavailable.
pub async fn parse_and_bind_address(host: &str, port: u16) -> Result<std::net::SocketAddr> {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

    if host != "::"
        && let Ok(ip) = host.parse::<IpAddr>()
    {
        let addr = SocketAddr::new(ip, port);
        tracing::debug!("Parsed address: {}", addr);
        return Ok(addr);
    }

    match host {
        "::" => {
            let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port);
            tracing::debug!("Using IPv6 any address: {}", addr);

            match tokio::net::TcpListener::bind(addr).await {
                Ok(_) => Ok(addr),
                Err(e) => {
                    tracing::warn!(
                        "Could not listen on [::]:{} (Caused by {}), falling back to 0.0.0.0",
                        port,
                        e
                    );
                    Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port))
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid host address: {}. Use an IP address, '::' or '0.0.0.0'",
                host
            );
        }
    }
}
