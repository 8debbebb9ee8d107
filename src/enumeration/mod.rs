//! Resource enumeration.
//!
//! An enumerator discovers the resource kinds a store offers and lists the
//! instances of each. [`collect_objects`] drives the two-level iteration:
//! a failure to list one kind is logged and that kind is skipped, while a
//! discovery failure aborts the run.

pub mod context;
pub mod memory;
pub mod resource;
pub mod snapshot;

pub use context::{CancelHandle, ListContext};
pub use memory::StaticEnumerator;
pub use resource::{GroupVersion, ResourceKind};
pub use snapshot::SnapshotEnumerator;

use crate::core::error::{EnumerationResult, ListResult};
use crate::core::object::RawObject;
use serde::Serialize;

/// Trait for enumeration backends.
pub trait ResourceEnumerator {
    /// Short description of the backend, used in log output.
    fn describe(&self) -> String;

    /// Discover all resource kinds. Failure here is fatal.
    fn discover(&self) -> EnumerationResult<Vec<ResourceKind>>;

    /// List every instance of one kind.
    fn list(&self, kind: &ResourceKind, ctx: &ListContext) -> ListResult<Vec<RawObject>>;
}

/// A kind whose listing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedKind {
    /// `group/version, Kind=Name` of the kind.
    pub gvk: String,
    /// Why the listing failed.
    pub error: String,
}

/// Everything an enumeration pass produced.
#[derive(Debug, Default)]
pub struct Enumeration {
    /// Records paired with the scope of their kind.
    pub objects: Vec<(RawObject, bool)>,
    /// Kinds returned by discovery.
    pub kinds_discovered: usize,
    /// Kinds listed successfully.
    pub kinds_listed: usize,
    /// Kinds whose listing failed.
    pub skipped: Vec<SkippedKind>,
}

impl Enumeration {
    /// Number of records returned across all listings.
    pub fn resource_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether any kind had to be skipped.
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Discover all kinds and list every listable one.
pub fn collect_objects<E>(enumerator: &E, ctx: &ListContext) -> EnumerationResult<Enumeration>
where
    E: ResourceEnumerator + ?Sized,
{
    log::info!("Enumerating resources from {}", enumerator.describe());
    let kinds = enumerator.discover()?;
    let mut enumeration = Enumeration {
        kinds_discovered: kinds.len(),
        ..Enumeration::default()
    };

    for kind in kinds.iter().filter(|kind| kind.is_listable()) {
        ctx.check(enumeration.kinds_listed)?;
        match ctx.remaining() {
            Some(left) => log::debug!("Loading {} ({:.1}s left)", kind.gvk(), left.as_secs_f64()),
            None => log::debug!("Loading {}", kind.gvk()),
        }

        match enumerator.list(kind, ctx) {
            Ok(items) => {
                enumeration.kinds_listed += 1;
                let api_version = kind.group_version.api_version();
                enumeration.objects.extend(items.into_iter().map(|item| {
                    (item.with_default_type(&api_version, &kind.kind), kind.namespaced)
                }));
            }
            Err(e) => {
                log::warn!("Error during list of {}: {}", kind.gvk(), e);
                enumeration.skipped.push(SkippedKind {
                    gvk: kind.gvk(),
                    error: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Listed {} of {} kind(s), {} skipped",
        enumeration.kinds_listed,
        enumeration.kinds_discovered,
        enumeration.skipped.len()
    );
    Ok(enumeration)
}
