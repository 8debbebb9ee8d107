//! Owner-reference validation pipeline.

use crate::catalog::structure::ObjectCatalog;
use crate::validation::finding::{Finding, FindingKind, ValidationResult};
use crate::validation::rules::{
    ControllerUniqueness, IdentityConsistency, NamespaceContainment, OwnerEdge, OwnerRule,
    ScopeContainment,
};

/// Multi-rule owner-reference validator.
///
/// Walks every object's owner references against the catalog. Dangling
/// references are reported and skipped; every resolved reference is passed
/// to all rules, none of which can short-circuit the others.
pub struct OwnerReferenceValidator {
    rules: Vec<Box<dyn OwnerRule>>,
}

impl OwnerReferenceValidator {
    /// Create a validator with the given rules.
    pub fn new(rules: Vec<Box<dyn OwnerRule>>) -> Self {
        Self { rules }
    }

    /// Create the default validator with all standard rules.
    pub fn default_pipeline() -> Self {
        Self {
            rules: vec![
                Box::new(ControllerUniqueness),
                Box::new(ScopeContainment),
                Box::new(NamespaceContainment),
                Box::new(IdentityConsistency),
            ],
        }
    }

    /// Add a custom rule.
    pub fn add_rule(&mut self, rule: Box<dyn OwnerRule>) {
        self.rules.push(rule);
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Validate every owner reference in the catalog.
    pub fn validate(&self, catalog: &ObjectCatalog) -> ValidationResult {
        let mut result = ValidationResult::new();

        for obj in catalog.objects() {
            result.scanned_objects += 1;
            let mut controllers_seen = 0;

            for reference in &obj.owner_references {
                let controllers_before = controllers_seen;
                if reference.is_controller {
                    controllers_seen += 1;
                }

                let Some(owner) = catalog.get(&reference.uid) else {
                    log::debug!(
                        "Owner {} of {} not in catalog",
                        reference.uid,
                        obj.display_identity()
                    );
                    result.add_finding(Finding::new(
                        FindingKind::DanglingOwner,
                        obj,
                        &reference.uid,
                        None,
                        format!(
                            "Couldn't find owner {}/{} (uid {}) of {}",
                            reference.kind,
                            reference.name,
                            reference.uid,
                            obj.display_identity()
                        ),
                    ));
                    continue;
                };

                result.scanned_owner_refs += 1;
                let edge = OwnerEdge {
                    object: obj,
                    reference,
                    owner,
                    controllers_before,
                };

                for rule in &self.rules {
                    let findings = rule.check(&edge);
                    if !findings.is_empty() {
                        log::trace!(
                            "{}: {} finding(s) on {}",
                            rule.name(),
                            findings.len(),
                            obj.display_identity()
                        );
                    }
                    for finding in findings {
                        result.add_finding(finding);
                    }
                }
            }
        }

        log::debug!(
            "Validated {} object(s), {} owner reference(s): {}",
            result.scanned_objects,
            result.scanned_owner_refs,
            result.summary()
        );
        result
    }

    /// Quick check - whether the catalog passes without ERROR findings.
    pub fn is_clean(&self, catalog: &ObjectCatalog) -> bool {
        !self.validate(catalog).has_errors()
    }
}

impl Default for OwnerReferenceValidator {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
