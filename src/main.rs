use anyhow::Context;
use clap::Parser;
use csv2xlsx::cli::{self, Args};
use csv2xlsx::converter::convert_fixed_paths;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    cli::setup_logging(&args).context("Failed to initialize logging")?;

    // Conversion failures are reported on stdout and never change the exit status
    let outcome = convert_fixed_paths();
    debug!("Finished with stage {:?}", outcome.stage());

    Ok(())
}
