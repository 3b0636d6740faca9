//! # sgsync - Security Group Ingress Sync
//!
//! Keeps an AWS security group's ingress rules in sync with Fastly's
//! published edge network IP ranges.
//!
//! Each invocation runs three stages:
//!
//! 1. **Extract** - fetch the authoritative CIDR list from the source and
//!    read the security group's current ingress CIDRs.
//! 2. **Diff** - compute the CIDRs to add and remove by two-way comparison
//!    with exact string equality.
//! 3. **Apply** - authorize the additions and revoke the removals against
//!    the security group, gated by the `apply` configuration flag.
//!
//! No state is kept between runs: the plan is recomputed from live state
//! every time, so an interrupted invocation is corrected by the next one.
//!
//! ## Example Usage
//!
//! ```no_run
//! use sgsync::config::Config;
//! use sgsync::gateway::AwsGateway;
//! use sgsync::reconcile;
//! use sgsync::source::FastlySource;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("/etc/sgsync/config.yaml")?;
//!     let source = FastlySource::new(&config.source)?;
//!     let gateway = AwsGateway::from_env().await;
//!
//!     let outcome = reconcile::run(&gateway, &source, &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&outcome)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`diff`] - Two-way CIDR comparison
//! - [`error`] - Pipeline error taxonomy
//! - [`gateway`] - Security group backend abstraction (EC2)
//! - [`reconcile`] - Extract/diff/apply pipeline
//! - [`source`] - Authoritative CIDR source (Fastly public IP list)

pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod gateway;
pub mod reconcile;
pub mod source;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use diff::{diff, ReconcilePlan};
pub use error::SgsyncError;
pub use reconcile::SyncOutcome;
