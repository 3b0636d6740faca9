//! Reconciliation pipeline: extract, diff, apply.

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::diff::{diff, ReconcilePlan};
use crate::error::SgsyncError;
use crate::gateway::{IngressPermission, SecurityGroupGateway};
use crate::source::CidrSource;

/// Outcome returned to the invoking trigger: the full authoritative list
/// and both applied plan halves. Empty halves serialize as `[]`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncOutcome {
    pub addresses: Vec<String>,
    pub cidrs_added: Vec<String>,
    pub cidrs_removed: Vec<String>,
}

/// Fetch the authoritative CIDRs and read the group's current ingress CIDRs.
///
/// Exactly one security group must match `group_id`. The current set is the
/// first ingress entry's ranges; a group with no ingress entries yields an
/// empty set.
pub async fn extract(
    gateway: &dyn SecurityGroupGateway,
    source: &dyn CidrSource,
    group_id: &str,
) -> Result<(Vec<String>, Vec<String>), SgsyncError> {
    let authoritative = source.cidrs().await?;

    let mut groups = gateway.describe(group_id).await?;
    if groups.len() != 1 {
        return Err(SgsyncError::AmbiguousGroup {
            group_id: group_id.to_string(),
            count: groups.len(),
        });
    }
    let group = groups.remove(0);

    let current = group
        .ingress
        .into_iter()
        .next()
        .map(|entry| entry.cidrs)
        .unwrap_or_default();

    Ok((authoritative, current))
}

/// Apply the plan against the security group.
///
/// With `apply` false this is report-only and nothing is issued. Additions
/// go out as a single authorize call of all-traffic permissions; removals
/// as a single revoke call of TCP full-range permissions. The two calls
/// are not transactional: a failure between them leaves the applied half
/// in place for the next run to reconcile.
pub async fn apply(
    gateway: &dyn SecurityGroupGateway,
    group_id: &str,
    plan: &ReconcilePlan,
    apply: bool,
) -> Result<(), SgsyncError> {
    if !apply {
        info!(
            to_add = plan.to_add.len(),
            to_remove = plan.to_remove.len(),
            "Apply disabled, leaving security group untouched"
        );
        return Ok(());
    }

    if !plan.to_add.is_empty() {
        let permissions: Vec<IngressPermission> = plan
            .to_add
            .iter()
            .map(|cidr| IngressPermission::all_traffic(cidr))
            .collect();
        for permission in &permissions {
            info!(
                cidr = %permission.cidr,
                protocol = %permission.ip_protocol,
                "Authorizing ingress"
            );
        }
        gateway.authorize_ingress(group_id, &permissions).await?;
    }

    if !plan.to_remove.is_empty() {
        let permissions: Vec<IngressPermission> = plan
            .to_remove
            .iter()
            .map(|cidr| IngressPermission::tcp_full_range(cidr))
            .collect();
        for permission in &permissions {
            info!(
                cidr = %permission.cidr,
                protocol = %permission.ip_protocol,
                "Revoking ingress"
            );
        }
        gateway.revoke_ingress(group_id, &permissions).await?;
    }

    Ok(())
}

/// Run the full pipeline once and report what changed.
///
/// The plan is recomputed from live state on every invocation; the security
/// group itself is the only durable state.
pub async fn run(
    gateway: &dyn SecurityGroupGateway,
    source: &dyn CidrSource,
    config: &Config,
) -> Result<SyncOutcome, SgsyncError> {
    let (authoritative, current) = extract(gateway, source, &config.security_group_id).await?;
    let plan = diff(&authoritative, &current);
    apply(gateway, &config.security_group_id, &plan, config.apply).await?;

    Ok(SyncOutcome {
        addresses: authoritative,
        cidrs_added: plan.to_add,
        cidrs_removed: plan.to_remove,
    })
}
