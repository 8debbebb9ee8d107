//! In-memory enumerator.

use crate::core::error::{EnumerationError, EnumerationResult, ListError, ListResult};
use crate::core::object::RawObject;
use crate::enumeration::context::ListContext;
use crate::enumeration::resource::ResourceKind;
use crate::enumeration::ResourceEnumerator;

/// Enumerator over a fixed, pre-built set of kinds and records.
///
/// Useful for embedding callers that already hold the objects, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnumerator {
    kinds: Vec<(ResourceKind, Result<Vec<RawObject>, String>)>,
    discovery_error: Option<String>,
}

impl StaticEnumerator {
    /// Create an empty enumerator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind and its instances.
    pub fn with_kind(mut self, kind: ResourceKind, items: Vec<RawObject>) -> Self {
        self.kinds.push((kind, Ok(items)));
        self
    }

    /// Add a kind whose listing fails with `error`.
    pub fn with_failing_kind(mut self, kind: ResourceKind, error: impl Into<String>) -> Self {
        self.kinds.push((kind, Err(error.into())));
        self
    }

    /// Make discovery itself fail.
    pub fn with_discovery_error(mut self, error: impl Into<String>) -> Self {
        self.discovery_error = Some(error.into());
        self
    }
}

impl ResourceEnumerator for StaticEnumerator {
    fn describe(&self) -> String {
        format!("in-memory store ({} kinds)", self.kinds.len())
    }

    fn discover(&self) -> EnumerationResult<Vec<ResourceKind>> {
        if let Some(error) = &self.discovery_error {
            return Err(EnumerationError::Other(error.clone()));
        }
        Ok(self.kinds.iter().map(|(kind, _)| kind.clone()).collect())
    }

    fn list(&self, kind: &ResourceKind, _ctx: &ListContext) -> ListResult<Vec<RawObject>> {
        if !kind.is_listable() {
            return Err(ListError::NotListable);
        }
        match self.kinds.iter().find(|(k, _)| k == kind) {
            Some((_, Ok(items))) => Ok(items.clone()),
            Some((_, Err(error))) => Err(ListError::Other(error.clone())),
            None => Err(ListError::Other(format!("unknown kind {}", kind.gvk()))),
        }
    }
}
