//! Sync command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::gateway::AwsGateway;
use crate::reconcile;
use crate::source::FastlySource;

/// Run the sync command
pub async fn run(dry_run: bool, config_path: &Path) -> Result<()> {
    let mut config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    if dry_run {
        config.apply = false;
    }
    if !config.apply {
        info!("Running report-only, no rules will be changed");
    }

    let source = FastlySource::new(&config.source)?;
    let gateway = AwsGateway::from_env().await;

    let outcome = reconcile::run(&gateway, &source, &config).await?;

    if outcome.cidrs_added.is_empty() && outcome.cidrs_removed.is_empty() {
        info!(
            group_id = %config.security_group_id,
            "Security group already in sync"
        );
    } else {
        info!(
            group_id = %config.security_group_id,
            added = outcome.cidrs_added.len(),
            removed = outcome.cidrs_removed.len(),
            "Reconciliation complete"
        );
    }

    // Machine-readable outcome for the invoking trigger
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
