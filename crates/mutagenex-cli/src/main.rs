mod cli;
mod commands;
mod error;
mod logging;
mod progress;

use crate::cli::Cli;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run_app(&cli) {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run_app(cli: &Cli) -> error::Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("mutagenex v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", cli);

    let result = commands::mutate::run(cli);
    match &result {
        Ok(_) => info!("✅ Run completed."),
        Err(e) => error!("❌ Run failed: {}", e),
    }
    result
}
