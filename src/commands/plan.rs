//! Plan command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::diff::diff;
use crate::gateway::AwsGateway;
use crate::reconcile::extract;
use crate::source::FastlySource;

/// Run the plan command
pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let source = FastlySource::new(&config.source)?;
    let gateway = AwsGateway::from_env().await;

    let (authoritative, current) = extract(&gateway, &source, &config.security_group_id).await?;
    let plan = diff(&authoritative, &current);

    if plan.is_empty() {
        println!(
            "Security group {} is in sync ({} CIDRs)",
            config.security_group_id,
            authoritative.len()
        );
        return Ok(());
    }

    if !plan.to_add.is_empty() {
        println!("To add ({}):", plan.to_add.len());
        for cidr in &plan.to_add {
            println!("  + {}", cidr);
        }
    }

    if !plan.to_remove.is_empty() {
        println!("To remove ({}):", plan.to_remove.len());
        for cidr in &plan.to_remove {
            println!("  - {}", cidr);
        }
    }

    Ok(())
}
