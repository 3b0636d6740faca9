//! sgsync - keep an AWS security group's ingress rules in sync with
//! Fastly's published IP ranges.

use anyhow::Result;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use sgsync::cli::{Cli, Commands};
use sgsync::error::SgsyncError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    let result = match cli.command {
        Commands::Sync { dry_run } => sgsync::commands::sync::run(dry_run, &cli.config).await,
        Commands::Plan => sgsync::commands::plan::run(&cli.config).await,
        Commands::Status => sgsync::commands::status::run(&cli.config).await,
        Commands::Version => {
            println!("sgsync {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    // Tag pipeline failures with retryability for the invoking trigger
    if let Err(ref err) = result {
        if let Some(sgsync_err) = err.downcast_ref::<SgsyncError>() {
            error!(retryable = sgsync_err.is_retryable(), "{:#}", err);
            std::process::exit(1);
        }
    }

    result
}
