//! Error types for sgsync.

use thiserror::Error;

/// Failures surfaced by the reconciliation pipeline.
#[derive(Error, Debug)]
pub enum SgsyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to fetch authoritative CIDR list: {0}")]
    Source(String),

    #[error("security group lookup failed for {group_id}: {reason}")]
    GroupLookup { group_id: String, reason: String },

    #[error("expected exactly one security group for {group_id}, found {count}")]
    AmbiguousGroup { group_id: String, count: usize },

    #[error("failed to authorize ingress on {group_id}: {reason}")]
    Authorize { group_id: String, reason: String },

    #[error("failed to revoke ingress on {group_id}: {reason}")]
    Revoke { group_id: String, reason: String },
}

impl SgsyncError {
    /// Whether the invoking trigger may reasonably retry this failure.
    ///
    /// Transport-level conditions (fetch, API calls) are retryable; a bad
    /// configuration or an ambiguous group lookup will not fix itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Source(_)
            | Self::GroupLookup { .. }
            | Self::Authorize { .. }
            | Self::Revoke { .. } => true,
            Self::Config(_) | Self::AmbiguousGroup { .. } => false,
        }
    }
}
