//! `strata-dump` entry-point: load sources, merge them and print the result.
use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use strata_dump::cli::DumpArgs;
use strata_dump::dump::write_report;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = DumpArgs::parse();
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &args).map_err(color_eyre::eyre::Report::from)
}
