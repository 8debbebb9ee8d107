//! Enumerator backed by a captured snapshot directory.
//!
//! Layout:
//!
//! ```text
//! <root>/discovery.json              API resource lists from discovery
//! <root>/<group|core>/<version>/<Kind>.json   one list document per kind
//! ```
//!
//! `discovery.json` is an array of `{ "groupVersion", "resources": [...] }`
//! entries; each list document is a `{ "items": [...] }` object as returned
//! by a list call.
//!
//! Entries are in discovery's preference order. A resource served at several
//! versions of a group is only enumerated at the first version that lists it.

use crate::core::error::{EnumerationError, EnumerationResult, ListError, ListResult};
use crate::core::object::RawObject;
use crate::enumeration::context::ListContext;
use crate::enumeration::resource::{GroupVersion, ResourceKind};
use crate::enumeration::ResourceEnumerator;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Name of the discovery document inside a snapshot.
pub const DISCOVERY_FILE: &str = "discovery.json";

/// Directory name used for the core API group.
pub const CORE_GROUP_DIR: &str = "core";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResourceList {
    group_version: String,
    #[serde(default)]
    resources: Vec<ApiResource>,
}

#[derive(Debug, Deserialize)]
struct ApiResource {
    name: String,
    kind: String,
    #[serde(default)]
    namespaced: bool,
    #[serde(default)]
    verbs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ListDocument {
    #[serde(default)]
    items: Vec<Value>,
}

/// Reads discovery data and listings from a snapshot directory.
#[derive(Debug, Clone)]
pub struct SnapshotEnumerator {
    root: PathBuf,
}

impl SnapshotEnumerator {
    /// Open a snapshot directory.
    pub fn open(root: impl Into<PathBuf>) -> EnumerationResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(EnumerationError::SnapshotMissing { path: root });
        }
        Ok(Self { root })
    }

    /// Path of the list document for `kind`.
    pub fn list_path(&self, kind: &ResourceKind) -> PathBuf {
        let gv = &kind.group_version;
        let group = if gv.is_core() { CORE_GROUP_DIR } else { gv.group.as_str() };
        self.root
            .join(group)
            .join(&gv.version)
            .join(format!("{}.json", kind.kind))
    }
}

impl ResourceEnumerator for SnapshotEnumerator {
    fn describe(&self) -> String {
        format!("snapshot {}", self.root.display())
    }

    fn discover(&self) -> EnumerationResult<Vec<ResourceKind>> {
        let path = self.root.join(DISCOVERY_FILE);
        let text =
            std::fs::read_to_string(&path).map_err(|error| EnumerationError::DiscoveryRead {
                path: path.clone(),
                error,
            })?;
        let lists: Vec<ApiResourceList> = serde_json::from_str(&text)
            .map_err(|error| EnumerationError::DiscoveryParse { path, error })?;

        let mut kinds = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for list in lists {
            let group_version = GroupVersion::parse(&list.group_version)?;
            for resource in list.resources {
                let key = (group_version.group.clone(), resource.name.clone());
                if !seen.insert(key) {
                    log::debug!(
                        "Skipping {} {}: already served at a preferred version",
                        group_version,
                        resource.name
                    );
                    continue;
                }
                kinds.push(ResourceKind {
                    group_version: group_version.clone(),
                    kind: resource.kind,
                    name: resource.name,
                    namespaced: resource.namespaced,
                    verbs: resource.verbs,
                });
            }
        }
        log::debug!("Discovered {} resource kind(s)", kinds.len());
        Ok(kinds)
    }

    fn list(&self, kind: &ResourceKind, _ctx: &ListContext) -> ListResult<Vec<RawObject>> {
        if !kind.is_listable() {
            return Err(ListError::NotListable);
        }

        let path = self.list_path(kind);
        let text = std::fs::read_to_string(&path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => ListError::NotFound { path: path.clone() },
            _ => ListError::Read {
                path: path.clone(),
                error,
            },
        })?;
        let document: ListDocument =
            serde_json::from_str(&text).map_err(|error| ListError::Decode { path, error })?;

        Ok(document.items.into_iter().map(RawObject::new).collect())
    }
}
