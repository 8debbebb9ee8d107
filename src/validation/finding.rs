//! Findings and the aggregated validation result.
//!
//! Every anomaly the validator discovers is represented as a [`Finding`].
//! Findings are data, not errors: validation itself cannot fail.

use crate::core::error::Uid;
use crate::core::object::ObjectDescriptor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How serious a finding is.
///
/// Only [`Severity::Error`] affects the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, not a defect.
    Info,
    /// A broken ownership edge.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// Category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FindingKind {
    /// The referenced owner was not observed. The garbage collector prunes
    /// such references on its own, so this is informational.
    DanglingOwner,
    /// More than one reference on the object claims to be the controller.
    MultipleControllers,
    /// A cluster-scoped object is owned by a namespaced one.
    CrossScopeOwnership,
    /// A namespaced object is owned by an object in another namespace.
    CrossNamespaceOwnership,
    /// The reference's cached kind, name or apiVersion disagrees with the owner.
    StaleOwnerMetadata,
}

impl FindingKind {
    /// Severity attached to this category.
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::DanglingOwner => Severity::Info,
            FindingKind::MultipleControllers
            | FindingKind::CrossScopeOwnership
            | FindingKind::CrossNamespaceOwnership
            | FindingKind::StaleOwnerMetadata => Severity::Error,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FindingKind::DanglingOwner => "DanglingOwner",
            FindingKind::MultipleControllers => "MultipleControllers",
            FindingKind::CrossScopeOwnership => "CrossScopeOwnership",
            FindingKind::CrossNamespaceOwnership => "CrossNamespaceOwnership",
            FindingKind::StaleOwnerMetadata => "StaleOwnerMetadata",
        };
        f.write_str(name)
    }
}

/// Identity of an object as it appears in a finding.
///
/// Field order gives the report sort order: namespace, then kind, then name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectIdentity {
    /// Empty for cluster-scoped objects.
    pub namespace: String,
    /// Object kind.
    pub kind: String,
    /// Object name.
    pub name: String,
    /// Whether the kind is namespace-scoped.
    pub namespaced: bool,
}

impl From<&ObjectDescriptor> for ObjectIdentity {
    fn from(obj: &ObjectDescriptor) -> Self {
        Self {
            namespace: obj.namespace.clone(),
            kind: obj.kind.clone(),
            name: obj.name.clone(),
            namespaced: obj.is_namespaced,
        }
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespaced {
            write!(f, "{} {}/{}", self.namespace, self.kind, self.name)
        } else {
            write!(f, "{}/{}", self.kind, self.name)
        }
    }
}

/// A single anomaly on one owner-reference edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// Always the severity of `category`.
    pub severity: Severity,
    /// Which check produced the finding.
    pub category: FindingKind,
    /// The dependent object carrying the reference.
    pub subject: ObjectIdentity,
    /// The resolved owner, absent for dangling references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ObjectIdentity>,
    /// Target uid of the offending reference.
    pub owner_uid: Uid,
    /// Report line, without the severity label.
    pub message: String,
}

impl Finding {
    /// Create a finding whose severity follows from its category.
    pub fn new(
        category: FindingKind,
        subject: &ObjectDescriptor,
        owner_uid: &Uid,
        owner: Option<&ObjectDescriptor>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: category.severity(),
            category,
            subject: subject.into(),
            owner: owner.map(ObjectIdentity::from),
            owner_uid: owner_uid.clone(),
            message: message.into(),
        }
    }

    /// Check if this finding affects the exit status.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    fn report_order(&self, other: &Self) -> Ordering {
        self.subject
            .cmp(&other.subject)
            .then_with(|| self.category.cmp(&other.category))
            .then_with(|| self.owner_uid.cmp(&other.owner_uid))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Findings in discovery order.
    pub findings: Vec<Finding>,
    /// Objects walked.
    pub scanned_objects: usize,
    /// Owner references whose target was found and checked.
    pub scanned_owner_refs: usize,
}

impl ValidationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding.
    pub fn add_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Whether any ERROR-level finding exists.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    /// Number of findings at the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Number of findings in the given category.
    pub fn count_kind(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.category == kind).count()
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    /// Sort findings by namespace, kind and name of the subject.
    pub fn sort(&mut self) {
        self.findings.sort_by(Finding::report_order);
    }

    /// Consume and return the result with sorted findings.
    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        let errors = self.count_severity(Severity::Error);
        let infos = self.count_severity(Severity::Info);
        if errors == 0 {
            if infos == 0 {
                "All owner references are valid".to_string()
            } else {
                format!("No errors, {} informational finding(s)", infos)
            }
        } else {
            format!("{} error(s), {} informational finding(s)", errors, infos)
        }
    }
}
