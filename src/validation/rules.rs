//! Owner-reference rules.
//!
//! Each rule checks one resolved edge (dependent → owner) and reports what it
//! finds. Rules never see dangling edges; the validator handles those before
//! any rule runs.

use crate::core::object::{ObjectDescriptor, OwnerRef};
use crate::validation::finding::{Finding, FindingKind};

/// One resolved owner-reference edge, plus the per-object state rules need.
#[derive(Debug, Clone, Copy)]
pub struct OwnerEdge<'a> {
    /// The dependent object.
    pub object: &'a ObjectDescriptor,
    /// The reference being checked.
    pub reference: &'a OwnerRef,
    /// The owner the reference resolved to.
    pub owner: &'a ObjectDescriptor,
    /// Controller references declared on `object` before this one.
    pub controllers_before: usize,
}

impl<'a> OwnerEdge<'a> {
    fn finding(&self, kind: FindingKind, message: String) -> Finding {
        Finding::new(kind, self.object, &self.reference.uid, Some(self.owner), message)
    }
}

/// Trait for owner-reference rules.
pub trait OwnerRule: Send + Sync {
    /// Name of this rule.
    fn name(&self) -> &str;

    /// Check a single edge. An empty vector means the edge passed.
    fn check(&self, edge: &OwnerEdge<'_>) -> Vec<Finding>;
}

/// Controller uniqueness.
///
/// At most one reference per object may set `controller: true`; every
/// controller reference after the first is reported.
pub struct ControllerUniqueness;

impl OwnerRule for ControllerUniqueness {
    fn name(&self) -> &str {
        "Controller Uniqueness"
    }

    fn check(&self, edge: &OwnerEdge<'_>) -> Vec<Finding> {
        if edge.reference.is_controller && edge.controllers_before > 0 {
            vec![edge.finding(
                FindingKind::MultipleControllers,
                format!(
                    "Object {} has more than 1 controller (extra controller {})",
                    edge.object.display_identity(),
                    edge.owner.display_identity()
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Scope containment: cluster-scoped objects cannot have namespaced owners.
pub struct ScopeContainment;

impl OwnerRule for ScopeContainment {
    fn name(&self) -> &str {
        "Scope Containment"
    }

    fn check(&self, edge: &OwnerEdge<'_>) -> Vec<Finding> {
        if !edge.object.is_namespaced && edge.owner.is_namespaced {
            vec![edge.finding(
                FindingKind::CrossScopeOwnership,
                format!(
                    "Non-namespaced {} is owned by namespaced {}",
                    edge.object.display_identity(),
                    edge.owner.display_identity()
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Namespace containment: namespaced owners must share the dependent's namespace.
pub struct NamespaceContainment;

impl OwnerRule for NamespaceContainment {
    fn name(&self) -> &str {
        "Namespace Containment"
    }

    fn check(&self, edge: &OwnerEdge<'_>) -> Vec<Finding> {
        let (obj, owner) = (edge.object, edge.owner);
        if obj.is_namespaced && owner.is_namespaced && obj.namespace != owner.namespace {
            vec![edge.finding(
                FindingKind::CrossNamespaceOwnership,
                format!(
                    "Namespaced {} is owned by object in another namespace {}",
                    obj.display_identity(),
                    owner.display_identity()
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Identity consistency.
///
/// The reference's cached kind, name and apiVersion are compared to the
/// owner case-insensitively. Each field that differs is a separate finding.
pub struct IdentityConsistency;

impl OwnerRule for IdentityConsistency {
    fn name(&self) -> &str {
        "Identity Consistency"
    }

    fn check(&self, edge: &OwnerEdge<'_>) -> Vec<Finding> {
        let (reference, owner) = (edge.reference, edge.owner);
        let fields = [
            ("kind", reference.kind.as_str(), owner.kind.as_str()),
            ("name", reference.name.as_str(), owner.name.as_str()),
            ("APIVersion", reference.api_version.as_str(), owner.api_version.as_str()),
        ];

        fields
            .into_iter()
            .filter(|(_, cached, actual)| !unicode_eq(cached, actual))
            .map(|(field, cached, actual)| {
                edge.finding(
                    FindingKind::StaleOwnerMetadata,
                    format!(
                        "In object {}, owner ref {} ({}) does not match owner {} ({})",
                        edge.object.display_identity(),
                        field,
                        cached,
                        owner.display_identity(),
                        actual
                    ),
                )
            })
            .collect()
    }
}

/// Case-insensitive comparison using Unicode lowercase mapping.
fn unicode_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Uid;

    fn object(
        uid: &str,
        kind: &str,
        name: &str,
        namespace: &str,
        namespaced: bool,
    ) -> ObjectDescriptor {
        ObjectDescriptor {
            api_version: "apps/v1".to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            uid: Uid::from(uid),
            is_namespaced: namespaced,
            owner_references: Vec::new(),
        }
    }

    fn edge<'a>(
        object: &'a ObjectDescriptor,
        reference: &'a OwnerRef,
        owner: &'a ObjectDescriptor,
    ) -> OwnerEdge<'a> {
        OwnerEdge {
            object,
            reference,
            owner,
            controllers_before: 0,
        }
    }

    #[test]
    fn test_controller_uniqueness() {
        let pod = object("p", "Pod", "web-1", "ns", true);
        let rs = object("rs", "ReplicaSet", "web", "ns", true);
        let reference = OwnerRef::new("rs", "apps/v1", "ReplicaSet", "web").controller();

        let first = edge(&pod, &reference, &rs);
        assert!(ControllerUniqueness.check(&first).is_empty());

        let second = OwnerEdge {
            controllers_before: 1,
            ..first
        };
        let findings = ControllerUniqueness.check(&second);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, FindingKind::MultipleControllers);

        let plain = OwnerRef::new("rs", "apps/v1", "ReplicaSet", "web");
        let non_controller = OwnerEdge {
            reference: &plain,
            controllers_before: 1,
            ..first
        };
        assert!(ControllerUniqueness.check(&non_controller).is_empty());
    }

    #[test]
    fn test_scope_containment() {
        let role = object("cr", "ClusterRole", "admin", "", false);
        let rs = object("rs", "ReplicaSet", "web", "team-a", true);
        let reference = OwnerRef::new("rs", "apps/v1", "ReplicaSet", "web");

        let findings = ScopeContainment.check(&edge(&role, &reference, &rs));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, FindingKind::CrossScopeOwnership);
        assert_eq!(
            findings[0].message,
            "Non-namespaced ClusterRole/admin is owned by namespaced team-a ReplicaSet/web"
        );

        // Namespaced objects owned by cluster-scoped ones are fine.
        let node = object("n", "Node", "n1", "", false);
        let lease = object("l", "Lease", "n1", "kube-node-lease", true);
        let reference = OwnerRef::new("n", "apps/v1", "Node", "n1");
        assert!(ScopeContainment.check(&edge(&lease, &reference, &node)).is_empty());
    }

    #[test]
    fn test_namespace_containment() {
        let pod = object("p", "Pod", "web-1", "ns1", true);
        let rs = object("rs", "ReplicaSet", "web", "ns2", true);
        let reference = OwnerRef::new("rs", "apps/v1", "ReplicaSet", "web");

        let findings = NamespaceContainment.check(&edge(&pod, &reference, &rs));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, FindingKind::CrossNamespaceOwnership);

        let same_ns = object("rs", "ReplicaSet", "web", "ns1", true);
        assert!(NamespaceContainment.check(&edge(&pod, &reference, &same_ns)).is_empty());
    }

    #[test]
    fn test_identity_is_case_insensitive() {
        let pod = object("p", "Pod", "web-1", "ns", true);
        let owner = object("o", "Pod", "Owner", "ns", true);
        let reference = OwnerRef::new("o", "APPS/V1", "pod", "owner");

        assert!(IdentityConsistency.check(&edge(&pod, &reference, &owner)).is_empty());
    }

    #[test]
    fn test_identity_reports_each_field() {
        let pod = object("p", "Pod", "web-1", "ns", true);
        let owner = object("o", "ReplicaSet", "web", "ns", true);
        let reference = OwnerRef::new("o", "v1", "Deployment", "api");

        let findings = IdentityConsistency.check(&edge(&pod, &reference, &owner));
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.category == FindingKind::StaleOwnerMetadata));
        assert!(findings[1].message.contains("owner ref name (api)"));
    }

    #[test]
    fn test_unicode_case_folding() {
        assert!(unicode_eq("ÄPFEL", "äpfel"));
        assert!(!unicode_eq("a", "b"));
    }
}
