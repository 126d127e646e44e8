use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use attend_cli::commands::{calc, clock, delete, employee, history};
use attend_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Employee(action) => employee::run(&mut out, action, &config)?,
        Commands::ClockIn(args) => clock::clock_in(&mut out, args, &config)?,
        Commands::ClockOut(args) => clock::clock_out(&mut out, args, &config)?,
        Commands::History(args) => history::run(&mut out, args, &config)?,
        Commands::Delete(args) => delete::run(&mut out, args, &config)?,
        Commands::Calc(action) => calc::run(&mut out, action, &config)?,
    }
    out.flush()?;

    Ok(())
}
