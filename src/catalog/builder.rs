//! Catalog construction.
//!
//! Pure transformation from raw records to [`ObjectCatalog`]. No validation
//! happens here.

use crate::catalog::structure::ObjectCatalog;
use crate::core::object::{ObjectDescriptor, ObjectRecord};

/// Builds an [`ObjectCatalog`] from `(record, is_namespaced)` pairs.
///
/// A record whose uid is already present replaces the earlier entry.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: ObjectCatalog,
    observed: usize,
    replaced: usize,
}

impl CatalogBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog in one go.
    pub fn build<R, I>(objects: I) -> ObjectCatalog
    where
        R: ObjectRecord,
        I: IntoIterator<Item = (R, bool)>,
    {
        let mut builder = Self::new();
        builder.extend(objects);
        builder.finish()
    }

    /// Add one record.
    pub fn insert<R: ObjectRecord + ?Sized>(&mut self, record: &R, is_namespaced: bool) {
        self.observed += 1;
        let descriptor = ObjectDescriptor::from_record(record, is_namespaced);
        if let Some(previous) = self.catalog.insert(descriptor) {
            self.replaced += 1;
            log::debug!(
                "uid {} seen again; {} replaces {}",
                previous.uid,
                self.catalog
                    .get(&previous.uid)
                    .map(ObjectDescriptor::display_identity)
                    .unwrap_or_default(),
                previous.display_identity()
            );
        }
    }

    /// Add many records.
    pub fn extend<R, I>(&mut self, objects: I)
    where
        R: ObjectRecord,
        I: IntoIterator<Item = (R, bool)>,
    {
        for (record, is_namespaced) in objects {
            self.insert(&record, is_namespaced);
        }
    }

    /// Records seen so far, duplicates included.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Records that overwrote an existing uid.
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    /// Finish building.
    pub fn finish(self) -> ObjectCatalog {
        log::debug!(
            "Catalog built: {} object(s) from {} record(s)",
            self.catalog.len(),
            self.observed
        );
        self.catalog
    }
}
