//! Command-line interface for the compact savings calculator
//!
//! # Usage
//!
//! ## Estimate (default)
//! ```bash
//! compact-calc --technicians 10 --endpoints 1200 --endpoint-rate 7
//! ```
//!
//! ## Server Mode
//! ```bash
//! compact-calc server --port 4417 --host 0.0.0.0
//! ```
//!
//! ## Configuration
//! ```bash
//! compact-calc config --fallback
//! compact-calc set-remote-url https://example.com/calc-sliders.json
//! ```

use clap::{Parser, Subcommand};

use atera_compact_calculator::cli::{
    config::{ConfigArgs, SetRemoteUrlArgs, run_config_mode, run_set_remote_url_mode},
    estimate::{EstimateArgs, run_estimate_mode},
    server::{ServerArgs, run_server_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "compact-calc")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Estimate mode options (when no subcommand is provided)
    /// Number of technicians (defaults to the slider default)
    #[arg(short, long, value_name = "COUNT", allow_negative_numbers = true)]
    technicians: Option<f64>,

    /// Number of managed endpoints (defaults to the slider default)
    #[arg(short, long, value_name = "COUNT", allow_negative_numbers = true)]
    endpoints: Option<f64>,

    /// Current monthly cost per endpoint (defaults to the slider default)
    #[arg(short = 'r', long, value_name = "AMOUNT", allow_negative_numbers = true)]
    endpoint_rate: Option<f64>,

    /// Monthly price of one technician seat
    #[arg(long, value_name = "AMOUNT")]
    seat_rate: Option<f64>,

    /// Configuration file path
    #[arg(long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server mode
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the resolved calculator configuration
    Config {
        /// Print the built-in configuration when resolution fails
        #[arg(long)]
        fallback: bool,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Store the remote configuration URL (empty to disable)
    SetRemoteUrl {
        /// Remote JSON document URL
        #[arg(value_name = "URL")]
        url: String,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Server {
            port,
            host,
            config,
            verbose,
        }) => {
            let args = ServerArgs {
                port,
                host,
                config,
                verbose,
            };
            run_server_mode(args).await
        }
        Some(Commands::Config {
            fallback,
            config,
            verbose,
        }) => {
            run_config_mode(ConfigArgs {
                fallback,
                config,
                verbose,
            })
            .await
        }
        Some(Commands::SetRemoteUrl {
            url,
            config,
            verbose,
        }) => {
            run_set_remote_url_mode(SetRemoteUrlArgs {
                url,
                config,
                verbose,
            })
            .await
        }
        None => {
            let args = EstimateArgs {
                technicians: cli.technicians,
                endpoints: cli.endpoints,
                endpoint_rate: cli.endpoint_rate,
                seat_rate: cli.seat_rate,
                config: cli.config,
                verbose: cli.verbose,
            };
            run_estimate_mode(args).await
        }
    }
}
