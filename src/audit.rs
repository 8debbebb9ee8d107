//! End-to-end audit: enumerate, build the catalog, validate.

use crate::catalog::builder::CatalogBuilder;
use crate::catalog::structure::ObjectCatalog;
use crate::core::config::AuditConfig;
use crate::core::error::{BadrefResult, EnumerationResult};
use crate::enumeration::{
    collect_objects, ListContext, ResourceEnumerator, SkippedKind, SnapshotEnumerator,
};
use crate::validation::finding::ValidationResult;
use crate::validation::pipeline::OwnerReferenceValidator;

/// Outcome of a full audit run, ready for the reporter.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    /// Records returned by all listings, duplicates included.
    pub discovered_resources: usize,
    /// Kinds whose listing failed; the catalog is incomplete if non-empty.
    pub skipped: Vec<SkippedKind>,
    /// Validation outcome with findings in report order.
    pub result: ValidationResult,
}

impl AuditReport {
    /// Process exit status: 1 if any ERROR finding exists.
    pub fn exit_code(&self) -> i32 {
        self.result.exit_code()
    }
}

/// Runs the audit pipeline.
#[derive(Default)]
pub struct Audit {
    validator: OwnerReferenceValidator,
}

impl Audit {
    /// Create an audit with a specific validator.
    pub fn new(validator: OwnerReferenceValidator) -> Self {
        Self { validator }
    }

    /// Enumerate the store and validate what was collected.
    pub fn run<E>(&self, enumerator: &E, ctx: &ListContext) -> EnumerationResult<AuditReport>
    where
        E: ResourceEnumerator + ?Sized,
    {
        let enumeration = collect_objects(enumerator, ctx)?;
        if enumeration.is_partial() {
            log::warn!(
                "{} kind(s) could not be listed; validating a partial catalog",
                enumeration.skipped.len()
            );
        }

        let mut builder = CatalogBuilder::new();
        builder.extend(enumeration.objects);
        let discovered_resources = builder.observed();
        let catalog = builder.finish();

        Ok(AuditReport {
            discovered_resources,
            skipped: enumeration.skipped,
            result: self.validate(&catalog),
        })
    }

    /// Audit the snapshot named by `config`, honouring its timeout.
    pub fn run_snapshot(&self, config: &AuditConfig) -> BadrefResult<AuditReport> {
        let mut ctx = ListContext::new();
        if let Some(timeout) = config.list_timeout() {
            ctx = ctx.with_timeout(timeout);
        }
        let enumerator = SnapshotEnumerator::open(&config.snapshot_dir)?;
        Ok(self.run(&enumerator, &ctx)?)
    }

    /// Validate an already-built catalog.
    pub fn validate(&self, catalog: &ObjectCatalog) -> ValidationResult {
        self.validator.validate(catalog).sorted()
    }
}
