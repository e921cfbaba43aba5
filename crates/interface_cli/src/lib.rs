//! Command-line desk
//!
//! `mf-desk` lists clients and schemes, shows portfolios and history, and
//! places purchase, redeem and switch orders through the transaction
//! workflow.
//!
//! # Example
//!
//! ```bash
//! mf-desk schemes --search bluechip
//! mf-desk purchase --client CL001 --scheme AXIS001 --amount 5000
//! mf-desk redeem --client CL001 --scheme AXIS001 --all
//! mf-desk history CL001 --type REDEEM --days 90
//! ```

pub mod config;
pub mod error;
pub mod commands;
pub mod render;

pub use commands::{run, Cli, Command};
pub use config::CliConfig;
pub use error::CliError;
