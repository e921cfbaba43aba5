//! Mutual-fund desk binary
//!
//! # Usage
//!
//! ```bash
//! mf-desk clients --search sharma
//! MF_API_TOKEN=... mf-desk purchase --client CL001 --scheme AXIS001 --amount 5000 --sip
//! ```
//!
//! # Environment Variables
//!
//! * `MF_API_BASE_URL` - Order-routing API base URL (default: https://api.bsestarmf.in/v1)
//! * `MF_API_TOKEN` - Bearer token
//! * `MF_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{run, Cli, CliConfig, CliError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env()
        .context("Failed to load configuration")?
        .with_overrides(cli.base_url.clone(), cli.token.clone());

    init_tracing(&config.log_level);

    let gateway = config.connect().await.context("Failed to build API gateway")?;
    tracing::debug!(base_url = %gateway.base_url(), "Gateway ready");

    let mut stdout = std::io::stdout().lock();
    match run(cli.command, &gateway, &mut stdout).await {
        Ok(()) => Ok(()),
        Err(error) => {
            let code = error.exit_code();
            report(&error);
            std::process::exit(code);
        }
    }
}

fn report(error: &CliError) {
    eprintln!("Error: {}", error);
}

/// Logs go to stderr so command output stays pipeable
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
