//! Object records and owner references.
//!
//! The store holds arbitrary resource kinds. badref never models concrete
//! kinds; it only needs the small capability set exposed by [`ObjectRecord`].

use crate::core::error::Uid;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A declared ownership edge from a dependent object to its owner.
///
/// `kind`, `name` and `api_version` are a snapshot of the owner's identity
/// taken when the edge was written and may since have gone stale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    /// Identifier of the owner.
    #[serde(default)]
    pub uid: Uid,
    /// Cached owner kind.
    #[serde(default)]
    pub kind: String,
    /// Cached owner name.
    #[serde(default)]
    pub name: String,
    /// Cached owner API version.
    #[serde(default)]
    pub api_version: String,
    /// Marks the owner as the managing controller.
    #[serde(
        rename = "controller",
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub is_controller: bool,
    /// Carried through untouched; no rule reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_owner_deletion: Option<bool>,
}

impl OwnerRef {
    /// Create a non-controller reference.
    pub fn new(
        uid: impl Into<Uid>,
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            kind: kind.into(),
            name: name.into(),
            api_version: api_version.into(),
            is_controller: false,
            block_owner_deletion: None,
        }
    }

    /// Mark this reference as the controller reference.
    pub fn controller(mut self) -> Self {
        self.is_controller = true;
        self
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Capability set the core needs from an object record.
pub trait ObjectRecord {
    /// `apiVersion` of the object, e.g. `apps/v1`.
    fn api_version(&self) -> &str;

    /// `kind` of the object.
    fn kind(&self) -> &str;

    /// `metadata.name`.
    fn name(&self) -> &str;

    /// `metadata.namespace`, empty for cluster-scoped objects.
    fn namespace(&self) -> &str;

    /// `metadata.uid`.
    fn uid(&self) -> Uid;

    /// `metadata.ownerReferences`, in declaration order.
    fn owner_references(&self) -> Vec<OwnerRef>;
}

/// An untyped record as returned by a listing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawObject(pub Value);

impl RawObject {
    /// Wrap a decoded JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Fill in `apiVersion` and `kind` when the record omits them.
    ///
    /// List responses frequently strip the type fields from their items.
    pub fn with_default_type(mut self, api_version: &str, kind: &str) -> Self {
        if let Value::Object(map) = &mut self.0 {
            let missing = |v: Option<&Value>| v.and_then(Value::as_str).map_or(true, str::is_empty);
            if missing(map.get("apiVersion")) {
                map.insert("apiVersion".to_string(), Value::String(api_version.to_string()));
            }
            if missing(map.get("kind")) {
                map.insert("kind".to_string(), Value::String(kind.to_string()));
            }
        }
        self
    }

    fn str_at(&self, pointer: &str) -> &str {
        self.0.pointer(pointer).and_then(Value::as_str).unwrap_or("")
    }
}

impl ObjectRecord for RawObject {
    fn api_version(&self) -> &str {
        self.str_at("/apiVersion")
    }

    fn kind(&self) -> &str {
        self.str_at("/kind")
    }

    fn name(&self) -> &str {
        self.str_at("/metadata/name")
    }

    fn namespace(&self) -> &str {
        self.str_at("/metadata/namespace")
    }

    fn uid(&self) -> Uid {
        Uid::from(self.str_at("/metadata/uid"))
    }

    fn owner_references(&self) -> Vec<OwnerRef> {
        let Some(refs) = self
            .0
            .pointer("/metadata/ownerReferences")
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        refs.iter()
            .filter_map(|raw| match OwnerRef::deserialize(raw) {
                Ok(owner_ref) => Some(owner_ref),
                Err(e) => {
                    log::warn!(
                        "Skipping undecodable owner reference on {}/{}: {}",
                        self.kind(),
                        self.name(),
                        e
                    );
                    None
                }
            })
            .collect()
    }
}

/// Normalized view of one discovered object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    /// `group/version`, or `version` for the core group.
    pub api_version: String,
    /// Object kind.
    pub kind: String,
    /// Object name.
    pub name: String,
    /// Empty for cluster-scoped objects.
    pub namespace: String,
    /// Catalog key.
    pub uid: Uid,
    /// Scope of the object's kind, independent of `namespace`.
    pub is_namespaced: bool,
    /// Owner references in declaration order.
    pub owner_references: Vec<OwnerRef>,
}

impl ObjectDescriptor {
    /// Extract a descriptor from any record.
    pub fn from_record<R: ObjectRecord + ?Sized>(record: &R, is_namespaced: bool) -> Self {
        Self {
            api_version: record.api_version().to_string(),
            kind: record.kind().to_string(),
            name: record.name().to_string(),
            namespace: record.namespace().to_string(),
            uid: record.uid(),
            is_namespaced,
            owner_references: record.owner_references(),
        }
    }

    /// Human-readable identity: `ns Kind/name` or `Kind/name`.
    pub fn display_identity(&self) -> String {
        if self.is_namespaced {
            format!("{} {}/{}", self.namespace, self.kind, self.name)
        } else {
            format!("{}/{}", self.kind, self.name)
        }
    }
}

impl ObjectRecord for ObjectDescriptor {
    fn api_version(&self) -> &str {
        &self.api_version
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn uid(&self) -> Uid {
        self.uid.clone()
    }

    fn owner_references(&self) -> Vec<OwnerRef> {
        self.owner_references.clone()
    }
}
