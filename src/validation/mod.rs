//! Validation module for owner-reference checking.
//!
//! The validator runs every resolved owner reference through a set of rules
//! and collects the outcome as findings.

pub mod finding;
pub mod pipeline;
pub mod rules;

pub use finding::{Finding, FindingKind, ObjectIdentity, Severity, ValidationResult};
pub use pipeline::OwnerReferenceValidator;
pub use rules::{
    ControllerUniqueness, IdentityConsistency, NamespaceContainment, OwnerEdge, OwnerRule,
    ScopeContainment,
};
