use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use playlist_mirror::cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so stdout stays clean for URIs and JSON)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("playlist_mirror=info".parse()?))
        .init();

    if !cli::run_command(&args)? {
        // No command specified, show usage
        cli::Cli::command().print_help()?;
        println!();
    }

    Ok(())
}
