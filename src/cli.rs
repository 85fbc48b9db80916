//! Command-line interface components.

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_TARGET};
use anyhow::Result;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "csv2xlsx")]
#[command(about = "Convert public/example_data/qnb_new.csv into public/example_data/qnb.xlsx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level for the default filter directive
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Set up structured logging on stderr; `RUST_LOG` takes precedence
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
