//! Status command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::error::SgsyncError;
use crate::gateway::{AwsGateway, SecurityGroupGateway};

/// Run the status command
pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let gateway = AwsGateway::from_env().await;
    let mut groups = gateway.describe(&config.security_group_id).await?;
    if groups.len() != 1 {
        return Err(SgsyncError::AmbiguousGroup {
            group_id: config.security_group_id.clone(),
            count: groups.len(),
        }
        .into());
    }
    let group = groups.remove(0);

    println!();
    println!("Security group: {}", group.group_id);
    println!(
        "Apply mode: {}",
        if config.apply { "enabled" } else { "report-only" }
    );

    match group.ingress.first() {
        Some(entry) if !entry.cidrs.is_empty() => {
            println!("Ingress CIDRs ({}):", entry.cidrs.len());
            for cidr in &entry.cidrs {
                println!("  {}", cidr);
            }
        }
        _ => println!("Ingress CIDRs: none"),
    }

    if group.ingress.len() > 1 {
        println!(
            "Note: {} additional ingress entries are not managed",
            group.ingress.len() - 1
        );
    }
    println!();

    Ok(())
}
