//! kvconf: command-line front end for flat key=value configuration files.

use anyhow::Result;
use clap::Parser;

use kvconf::cli::{Cli, Commands};
use kvconf::domain::logger::{self, LogOptions};
use kvconf::service::QueryService;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics emitted while loading go through tracing
    logger::init(&LogOptions {
        debug: cli.debug,
        quiet: cli.quiet,
        log_dir: cli.log_dir.clone(),
    })?;

    match cli.command {
        Commands::Check { file, required } => {
            QueryService::open(&file, &required).check()?;
            if !cli.quiet {
                eprintln!("Configuration is valid.");
            }
        }
        Commands::Get {
            file,
            key,
            value_type,
            default,
        } => {
            let service = QueryService::open(&file, &[] as &[&str]);
            println!("{}", service.lookup(&key, value_type, default.as_deref())?);
        }
        Commands::Dump {
            file,
            format,
            pattern,
        } => {
            let service = QueryService::open(&file, &[] as &[&str]);
            if !service.store().is_valid() {
                anyhow::bail!("Configuration file {} is invalid", file.display());
            }
            print!("{}", service.dump(format, pattern.as_deref())?);
        }
        Commands::Version => {
            println!("kvconf {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
