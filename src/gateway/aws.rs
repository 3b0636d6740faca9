//! EC2-backed security group gateway.

use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{IpPermission, IpRange, Ipv6Range};
use aws_sdk_ec2::Client;

use super::{IngressEntry, IngressPermission, SecurityGroupGateway, SecurityGroupState};
use crate::error::SgsyncError;

/// Gateway backed by the EC2 security group API
pub struct AwsGateway {
    client: Client,
}

impl AwsGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a gateway from the ambient AWS environment (region and
    /// credential provider chain)
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(Client::new(&config))
    }

    fn to_sdk_permission(permission: &IngressPermission) -> IpPermission {
        let mut builder = IpPermission::builder().ip_protocol(&permission.ip_protocol);
        if let Some(port) = permission.from_port {
            builder = builder.from_port(port);
        }
        if let Some(port) = permission.to_port {
            builder = builder.to_port(port);
        }
        // EC2 keeps IPv4 and IPv6 ranges in separate lists
        if permission.cidr.contains(':') {
            builder = builder.ipv6_ranges(Ipv6Range::builder().cidr_ipv6(&permission.cidr).build());
        } else {
            builder = builder.ip_ranges(IpRange::builder().cidr_ip(&permission.cidr).build());
        }
        builder.build()
    }
}

#[async_trait]
impl SecurityGroupGateway for AwsGateway {
    async fn describe(&self, group_id: &str) -> Result<Vec<SecurityGroupState>, SgsyncError> {
        let output = self
            .client
            .describe_security_groups()
            .group_ids(group_id)
            .send()
            .await
            .map_err(|e| SgsyncError::GroupLookup {
                group_id: group_id.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        let groups = output
            .security_groups()
            .iter()
            .map(|group| SecurityGroupState {
                group_id: group.group_id().unwrap_or_default().to_string(),
                ingress: group
                    .ip_permissions()
                    .iter()
                    .map(|permission| IngressEntry {
                        cidrs: permission
                            .ip_ranges()
                            .iter()
                            .filter_map(|range| range.cidr_ip().map(str::to_string))
                            .chain(
                                permission
                                    .ipv6_ranges()
                                    .iter()
                                    .filter_map(|range| range.cidr_ipv6().map(str::to_string)),
                            )
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Ok(groups)
    }

    async fn authorize_ingress(
        &self,
        group_id: &str,
        permissions: &[IngressPermission],
    ) -> Result<(), SgsyncError> {
        let sdk_permissions: Vec<IpPermission> =
            permissions.iter().map(Self::to_sdk_permission).collect();

        self.client
            .authorize_security_group_ingress()
            .group_id(group_id)
            .set_ip_permissions(Some(sdk_permissions))
            .send()
            .await
            .map_err(|e| SgsyncError::Authorize {
                group_id: group_id.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }

    async fn revoke_ingress(
        &self,
        group_id: &str,
        permissions: &[IngressPermission],
    ) -> Result<(), SgsyncError> {
        let sdk_permissions: Vec<IpPermission> =
            permissions.iter().map(Self::to_sdk_permission).collect();

        self.client
            .revoke_security_group_ingress()
            .group_id(group_id)
            .set_ip_permissions(Some(sdk_permissions))
            .send()
            .await
            .map_err(|e| SgsyncError::Revoke {
                group_id: group_id.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_permission_all_traffic() {
        let sdk = AwsGateway::to_sdk_permission(&IngressPermission::all_traffic("10.0.0.0/8"));
        assert_eq!(sdk.ip_protocol(), Some("-1"));
        assert_eq!(sdk.from_port(), None);
        assert_eq!(sdk.to_port(), None);
        assert_eq!(sdk.ip_ranges().len(), 1);
        assert_eq!(sdk.ip_ranges()[0].cidr_ip(), Some("10.0.0.0/8"));
        assert!(sdk.ipv6_ranges().is_empty());
    }

    #[test]
    fn test_sdk_permission_tcp_full_range() {
        let sdk = AwsGateway::to_sdk_permission(&IngressPermission::tcp_full_range("10.0.0.0/8"));
        assert_eq!(sdk.ip_protocol(), Some("tcp"));
        assert_eq!(sdk.from_port(), Some(0));
        assert_eq!(sdk.to_port(), Some(65535));
        assert_eq!(sdk.ip_ranges()[0].cidr_ip(), Some("10.0.0.0/8"));
    }

    #[test]
    fn test_sdk_permission_routes_ipv6_range() {
        let sdk = AwsGateway::to_sdk_permission(&IngressPermission::all_traffic("2a04:4e40::/32"));
        assert!(sdk.ip_ranges().is_empty());
        assert_eq!(sdk.ipv6_ranges().len(), 1);
        assert_eq!(sdk.ipv6_ranges()[0].cidr_ipv6(), Some("2a04:4e40::/32"));
    }
}
