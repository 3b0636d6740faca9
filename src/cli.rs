//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sgsync")]
#[command(author, version, about = "Sync a security group's ingress rules with Fastly's IP ranges")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "/etc/sgsync/config.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (for cron/scheduled invocation)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the IP list, diff it against the security group, apply the difference
    Sync {
        /// Compute and report the plan but never touch the security group
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what a sync would change, without applying anything
    Plan,

    /// Show the security group's current ingress CIDRs
    Status,

    /// Show version
    Version,
}
