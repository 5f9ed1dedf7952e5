//! Permission catalog types.
//!
//! A permission is a named capability ("NEWS_WRITE") that roles bundle and
//! grant to users. Equality and hashing are defined by name alone: the
//! surrogate id only addresses the record in storage, and two records with
//! the same name denote the same capability. Because sets key on the name,
//! renaming a permission in place is not supported: a rename is a delete
//! followed by a create.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named capability that can be granted to roles.
///
/// # Example
///
/// ```
/// use matchday_rbac::Permission;
///
/// let perm = Permission::new("NEWS_WRITE").with_description("Publish and edit news posts");
/// assert_eq!(perm.name, "NEWS_WRITE");
///
/// // Identity is the name; ids and descriptions do not participate.
/// assert_eq!(perm, Permission::new("NEWS_WRITE"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    /// Surrogate id used to address the record in storage.
    pub id: Uuid,

    /// Unique capability name, e.g. `NEWS_WRITE`.
    pub name: String,

    /// Optional human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Permission {
    /// Create a permission with a freshly stamped id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// Identity is the name; see the module docs.
impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A flat set of permission names, as resolved for an identity.
///
/// Backed by the names rather than full records so that a set computed
/// from a fresh graph lookup and a set reconstructed from token claims
/// compare identically.
///
/// # Example
///
/// ```
/// use matchday_rbac::PermissionSet;
///
/// let mut set = PermissionSet::from_names(&["NEWS_READ"]);
/// set.insert("NEWS_WRITE");
///
/// assert!(set.contains("NEWS_WRITE"));
/// assert!(!set.contains("USER_MANAGE"));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    names: HashSet<String>,
}

impl PermissionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    /// Create from a list of permission names.
    pub fn from_names(names: &[&str]) -> Self {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// Add a permission name to the set.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Membership check. An absent name is simply not granted.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Union another set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        for name in &other.names {
            self.names.insert(name.clone());
        }
    }

    /// Iterate over the granted names (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Granted names in sorted order, for stable output.
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }

    /// Number of granted names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no permission is granted.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
