//! # badref - Find invalid ownerReferences
//!
//! badref audits the ownership graph of a cluster resource store. It finds
//! owner references that would make the ownership-based garbage collector
//! delete objects unexpectedly, and reports them without changing anything.
//!
//! ## Checks
//!
//! - **Dangling owners**: the referenced owner does not exist (informational)
//! - **Multiple controllers**: more than one reference claims to be the controller
//! - **Cross-scope ownership**: a cluster-scoped object owned by a namespaced one
//! - **Cross-namespace ownership**: an owner in a different namespace
//! - **Stale owner metadata**: the cached kind, name or apiVersion no longer matches
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use badref::prelude::*;
//!
//! let config = AuditConfig::new().with_snapshot_dir("snapshot");
//! let report = Audit::default().run_snapshot(&config)?;
//!
//! Reporter::new(OutputFormat::Text).write(&report, &mut std::io::stdout())?;
//! std::process::exit(report.exit_code());
//! ```
//!
//! ## Architecture
//!
//! - [`enumeration`]: discovery and listing backends
//! - [`catalog`]: the uid-keyed object catalog and its builder
//! - [`validation`]: owner-reference rules and findings
//! - [`report`]: text and JSON rendering
//! - [`core`]: shared types, errors and configuration
//!
//! ## Custom Rules
//!
//! Implement [`OwnerRule`](validation::OwnerRule) and add it to a validator:
//!
//! ```rust,ignore
//! use badref::prelude::*;
//!
//! struct NoSelfOwnership;
//!
//! impl OwnerRule for NoSelfOwnership {
//!     fn name(&self) -> &str {
//!         "No Self Ownership"
//!     }
//!
//!     fn check(&self, edge: &OwnerEdge<'_>) -> Vec<Finding> {
//!         Vec::new()
//!     }
//! }
//!
//! let mut validator = OwnerReferenceValidator::default();
//! validator.add_rule(Box::new(NoSelfOwnership));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod catalog;
pub mod core;
pub mod enumeration;
pub mod report;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use badref::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::config::{AuditConfig, OutputFormat};
    pub use crate::core::error::{
        BadrefError, BadrefResult, ConfigError, EnumerationError, ListError, Uid,
    };
    pub use crate::core::object::{ObjectDescriptor, ObjectRecord, OwnerRef, RawObject};

    // Catalog
    pub use crate::catalog::{CatalogBuilder, ObjectCatalog};

    // Enumeration
    pub use crate::enumeration::{
        collect_objects, CancelHandle, Enumeration, GroupVersion, ListContext,
        ResourceEnumerator, ResourceKind, SkippedKind, SnapshotEnumerator, StaticEnumerator,
    };

    // Validation
    pub use crate::validation::{
        ControllerUniqueness, Finding, FindingKind, IdentityConsistency, NamespaceContainment,
        ObjectIdentity, OwnerEdge, OwnerReferenceValidator, OwnerRule, ScopeContainment, Severity,
        ValidationResult,
    };

    // Running and reporting
    pub use crate::audit::{Audit, AuditReport};
    pub use crate::report::Reporter;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use serde_json::json;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "badref");
    }

    #[test]
    fn test_end_to_end_in_memory() {
        let enumerator = StaticEnumerator::new()
            .with_kind(
                ResourceKind::new(GroupVersion::new("apps", "v1"), "ReplicaSet", true),
                vec![RawObject::new(json!({
                    "metadata": { "name": "web", "namespace": "team-a", "uid": "rs1" }
                }))],
            )
            .with_kind(
                ResourceKind::new(
                    GroupVersion::new("rbac.authorization.k8s.io", "v1"),
                    "ClusterRole",
                    false,
                ),
                vec![RawObject::new(json!({
                    "metadata": {
                        "name": "web-reader",
                        "uid": "cr1",
                        "ownerReferences": [
                            {
                                "apiVersion": "apps/v1",
                                "kind": "ReplicaSet",
                                "name": "web",
                                "uid": "rs1"
                            }
                        ]
                    }
                }))],
            );

        let report = Audit::default().run(&enumerator, &ListContext::new()).unwrap();
        assert_eq!(report.result.findings.len(), 1);
        assert_eq!(report.result.findings[0].category, FindingKind::CrossScopeOwnership);
        assert_eq!(report.exit_code(), 1);

        let text = Reporter::default().render(&report).unwrap();
        let expected = "ERROR: Non-namespaced ClusterRole/web-reader \
                        is owned by namespaced team-a ReplicaSet/web";
        assert!(text.contains(expected));
    }
}
