//! The object catalog.
//!
//! The ObjectCatalog is the single in-memory index the validator reads from.
//! It is keyed by uid and preserves first-insertion order so that iteration
//! is reproducible between runs over the same input.

use crate::core::error::Uid;
use crate::core::object::ObjectDescriptor;
use indexmap::IndexMap;

/// Mapping from uid to object descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectCatalog {
    objects: IndexMap<Uid, ObjectDescriptor>,
}

impl ObjectCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
        }
    }

    /// Insert a descriptor under its uid.
    ///
    /// Returns the descriptor it replaced, if any. The replacement keeps the
    /// slot of the original entry.
    pub fn insert(&mut self, descriptor: ObjectDescriptor) -> Option<ObjectDescriptor> {
        self.objects.insert(descriptor.uid.clone(), descriptor)
    }

    /// Look up an object by uid.
    pub fn get(&self, uid: &Uid) -> Option<&ObjectDescriptor> {
        self.objects.get(uid)
    }

    /// Check if an object exists.
    pub fn contains(&self, uid: &Uid) -> bool {
        self.objects.contains_key(uid)
    }

    /// All objects in catalog order.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectDescriptor> {
        self.objects.values()
    }

    /// Number of distinct objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total number of declared owner references across all objects.
    pub fn owner_reference_count(&self) -> usize {
        self.objects
            .values()
            .map(|obj| obj.owner_references.len())
            .sum()
    }
}

impl FromIterator<ObjectDescriptor> for ObjectCatalog {
    fn from_iter<I: IntoIterator<Item = ObjectDescriptor>>(iter: I) -> Self {
        let mut catalog = ObjectCatalog::new();
        for descriptor in iter {
            catalog.insert(descriptor);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::OwnerRef;

    fn object(uid: &str, name: &str) -> ObjectDescriptor {
        ObjectDescriptor {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            name: name.to_string(),
            namespace: "default".to_string(),
            uid: Uid::from(uid),
            is_namespaced: true,
            owner_references: Vec::new(),
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut catalog = ObjectCatalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.insert(object("a", "first")).is_none());
        assert!(catalog.contains(&Uid::from("a")));
        assert_eq!(catalog.get(&Uid::from("a")).unwrap().name, "first");
        assert!(catalog.get(&Uid::from("b")).is_none());
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut catalog: ObjectCatalog =
            vec![object("a", "first"), object("b", "second")].into_iter().collect();

        let replaced = catalog.insert(object("a", "third")).unwrap();
        assert_eq!(replaced.name, "first");
        assert_eq!(catalog.len(), 2);

        let names: Vec<&str> = catalog.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["third", "second"]);
    }

    #[test]
    fn test_owner_reference_count() {
        let owner = object("owner", "owner");
        let mut child = object("child", "child");
        child
            .owner_references
            .push(OwnerRef::new("owner", "v1", "ConfigMap", "owner"));
        child
            .owner_references
            .push(OwnerRef::new("gone", "v1", "ConfigMap", "gone"));

        let catalog: ObjectCatalog = vec![owner, child].into_iter().collect();
        assert_eq!(catalog.owner_reference_count(), 2);
    }
}
