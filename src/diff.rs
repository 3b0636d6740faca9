//! Two-way CIDR comparison between the authoritative list and the
//! security group's current ingress rules.

use serde::Serialize;

/// CIDRs to authorize and revoke to bring the security group in line with
/// the authoritative list.
///
/// Both halves are always concrete vectors; an empty plan serializes as
/// empty arrays rather than omitted fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcilePlan {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl ReconcilePlan {
    /// True when the security group already mirrors the authoritative list.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the plan as a two-way difference.
///
/// CIDRs are opaque tokens compared by exact string equality; nothing is
/// normalized or deduplicated. Output order follows input order: `to_add`
/// in authoritative order, `to_remove` in ingress-rule order. Two linear
/// scans are fine here, both lists stay at tens of entries.
pub fn diff(authoritative: &[String], current: &[String]) -> ReconcilePlan {
    let mut to_add = Vec::new();
    let mut to_remove = Vec::new();

    for cidr in authoritative {
        if !contains(cidr, current) {
            to_add.push(cidr.clone());
        }
    }

    for cidr in current {
        if !contains(cidr, authoritative) {
            to_remove.push(cidr.clone());
        }
    }

    ReconcilePlan { to_add, to_remove }
}

fn contains(cidr: &str, cidrs: &[String]) -> bool {
    cidrs.iter().any(|candidate| candidate == cidr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidrs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diff_add_and_remove() {
        let plan = diff(&cidrs(&["10.0.0.0/8"]), &cidrs(&["172.0.0.0/8"]));
        assert_eq!(plan.to_add, cidrs(&["10.0.0.0/8"]));
        assert_eq!(plan.to_remove, cidrs(&["172.0.0.0/8"]));
    }

    #[test]
    fn test_diff_add_only() {
        let plan = diff(&cidrs(&["10.0.0.0/8"]), &[]);
        assert_eq!(plan.to_add, cidrs(&["10.0.0.0/8"]));
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn test_diff_remove_only() {
        let plan = diff(
            &cidrs(&["10.0.0.0/8"]),
            &cidrs(&["10.0.0.0/8", "172.0.0.0/8"]),
        );
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.to_remove, cidrs(&["172.0.0.0/8"]));
    }

    #[test]
    fn test_diff_no_change() {
        let plan = diff(&cidrs(&["10.0.0.0/8"]), &cidrs(&["10.0.0.0/8"]));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_diff_both_empty() {
        let plan = diff(&[], &[]);
        assert!(plan.is_empty());
        assert_eq!(plan.to_add, Vec::<String>::new());
        assert_eq!(plan.to_remove, Vec::<String>::new());
    }

    #[test]
    fn test_diff_preserves_input_order() {
        let plan = diff(
            &cidrs(&["3.0.0.0/8", "1.0.0.0/8", "2.0.0.0/8"]),
            &cidrs(&["9.0.0.0/8", "8.0.0.0/8"]),
        );
        assert_eq!(plan.to_add, cidrs(&["3.0.0.0/8", "1.0.0.0/8", "2.0.0.0/8"]));
        assert_eq!(plan.to_remove, cidrs(&["9.0.0.0/8", "8.0.0.0/8"]));
    }

    #[test]
    fn test_diff_exact_string_match_no_normalization() {
        // Equivalent ranges spelled differently are different tokens.
        let plan = diff(&cidrs(&["10.0.0.0/8"]), &cidrs(&["10.0.0.1/8"]));
        assert_eq!(plan.to_add, cidrs(&["10.0.0.0/8"]));
        assert_eq!(plan.to_remove, cidrs(&["10.0.0.1/8"]));
    }

    #[test]
    fn test_diff_keeps_duplicates() {
        let plan = diff(&cidrs(&["10.0.0.0/8", "10.0.0.0/8"]), &[]);
        assert_eq!(plan.to_add, cidrs(&["10.0.0.0/8", "10.0.0.0/8"]));
    }

    #[test]
    fn test_diff_same_sets_different_order() {
        let plan = diff(
            &cidrs(&["10.0.0.0/8", "172.0.0.0/8"]),
            &cidrs(&["172.0.0.0/8", "10.0.0.0/8"]),
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn test_empty_plan_serializes_as_arrays() {
        let plan = ReconcilePlan::default();
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"to_add":[],"to_remove":[]}"#);
    }
}
