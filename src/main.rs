//! CLI entry point for overlapping wave function collapse generation

use clap::Parser;
use tilecollapse::io::cli::{Cli, FileProcessor};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();

    // Logs share stderr with the progress bars
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
