//! Resource kind descriptors produced by discovery.

use crate::core::error::{EnumerationError, EnumerationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An API group and version, e.g. `apps/v1` or the core group's `v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersion {
    /// Empty for the core group.
    pub group: String,
    /// Version within the group, e.g. `v1beta1`.
    pub version: String,
}

impl GroupVersion {
    /// Create from parts.
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Parse `group/version` or a bare core-group `version`.
    pub fn parse(s: &str) -> EnumerationResult<Self> {
        let invalid = || EnumerationError::InvalidGroupVersion(s.to_string());
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(version), None, None) if !version.is_empty() => Ok(Self::new("", version)),
            (Some(group), Some(version), None) if !group.is_empty() && !version.is_empty() => {
                Ok(Self::new(group, version))
            }
            _ => Err(invalid()),
        }
    }

    /// Check if this is the core (legacy) group.
    pub fn is_core(&self) -> bool {
        self.group.is_empty()
    }

    /// The value objects of this group carry in `apiVersion`.
    pub fn api_version(&self) -> String {
        if self.is_core() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_version())
    }
}

/// A discovered resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceKind {
    /// Group and version the kind is served at.
    pub group_version: GroupVersion,
    /// Kind name, e.g. `ReplicaSet`.
    pub kind: String,
    /// Plural resource name, e.g. `replicasets`. Empty when not known.
    pub name: String,
    /// Whether instances of this kind live in a namespace.
    pub namespaced: bool,
    /// Verbs the kind supports.
    pub verbs: Vec<String>,
}

impl ResourceKind {
    /// Create a listable kind with no resource name.
    pub fn new(group_version: GroupVersion, kind: impl Into<String>, namespaced: bool) -> Self {
        Self {
            group_version,
            kind: kind.into(),
            name: String::new(),
            namespaced,
            verbs: vec!["get".to_string(), "list".to_string()],
        }
    }

    /// Set the plural resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the supported verbs.
    pub fn with_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.verbs = verbs.into_iter().map(Into::into).collect();
        self
    }

    /// Whether instances can be listed.
    pub fn is_listable(&self) -> bool {
        self.verbs.iter().any(|verb| verb == "list")
    }

    /// `apps/v1, Kind=ReplicaSet`.
    pub fn gvk(&self) -> String {
        format!("{}, Kind={}", self.group_version, self.kind)
    }
}
