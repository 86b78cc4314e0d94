mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use error::exit_with_error;
use std::process;

fn init_tracing(cli: &Cli) {
    // CLI tracing policy:
    //   --quiet   → always "off"
    //   --verbose → "info", RUST_LOG honoured when set
    //   default   → "off" (clean terminal output)
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => exit_with_error(e),
    }
}

fn run(cli: Cli) -> error::CliResult<i32> {
    match cli.command {
        Commands::Launch {
            session_label,
            subjects_dir,
            viewer,
        } => commands::launch::run(&session_label, subjects_dir, &viewer),
        Commands::Check { files } => commands::check::run(&files),
        Commands::Show {
            file,
            version,
            json,
        } => commands::show::run(&file, version.as_deref(), json),
    }
}
