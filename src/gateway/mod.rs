//! Security group gateway (EC2 backend and test mock).

mod aws;

use async_trait::async_trait;
use serde::Serialize;

pub use aws::AwsGateway;

use crate::error::SgsyncError;

/// One security group as described by the cloud provider
#[derive(Debug, Clone, Default)]
pub struct SecurityGroupState {
    pub group_id: String,
    /// Ingress permission entries, in API order
    pub ingress: Vec<IngressEntry>,
}

/// One ingress permission entry: the ordered CIDRs of its IP ranges,
/// IPv4 ranges first, then IPv6
#[derive(Debug, Clone, Default)]
pub struct IngressEntry {
    pub cidrs: Vec<String>,
}

/// Permission tuple for authorize/revoke calls.
///
/// Additions are authorized with the protocol wildcard while removals are
/// revoked as TCP over the full port range. EC2 matches a revocation by
/// exact permission tuple, so the revoke shape must match the rules that
/// are actually in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressPermission {
    pub ip_protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_port: Option<i32>,
    pub cidr: String,
}

impl IngressPermission {
    /// All protocols, all ports
    pub fn all_traffic(cidr: &str) -> Self {
        Self {
            ip_protocol: "-1".to_string(),
            from_port: None,
            to_port: None,
            cidr: cidr.to_string(),
        }
    }

    /// TCP over the full port range
    pub fn tcp_full_range(cidr: &str) -> Self {
        Self {
            ip_protocol: "tcp".to_string(),
            from_port: Some(0),
            to_port: Some(65535),
            cidr: cidr.to_string(),
        }
    }
}

/// Trait for security group backends
#[async_trait]
pub trait SecurityGroupGateway: Send + Sync {
    /// Describe the security groups matching `group_id`
    async fn describe(&self, group_id: &str) -> Result<Vec<SecurityGroupState>, SgsyncError>;

    /// Authorize all `permissions` in a single ingress call
    async fn authorize_ingress(
        &self,
        group_id: &str,
        permissions: &[IngressPermission],
    ) -> Result<(), SgsyncError>;

    /// Revoke all `permissions` in a single ingress call
    async fn revoke_ingress(
        &self,
        group_id: &str,
        permissions: &[IngressPermission],
    ) -> Result<(), SgsyncError>;
}
