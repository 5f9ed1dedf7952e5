//! Role domain model.
//!
//! A role is a named bundle of permissions assignable to users. Role names
//! are unique across the graph ("ROLE_ADMIN", "ROLE_EDITOR"); the name is
//! the public handle used for assignment and for the role snapshot carried
//! in tokens, while the id addresses the record in storage.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::{Permission, PermissionSet};

/// A named bundle of permissions.
///
/// The role owns its permission edge set: storage mutates the set as a
/// whole under a single write, so a reader never observes a role with a
/// half-applied edge update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Surrogate id used to address the record in storage.
    pub id: Uuid,

    /// Unique role name, e.g. `ROLE_ADMIN`.
    pub name: String,

    /// Permissions granted through this role.
    #[serde(default)]
    pub permissions: HashSet<Permission>,
}

impl Role {
    /// Create an empty role with a freshly stamped id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            permissions: HashSet::new(),
        }
    }

    /// Add a permission edge. Returns `false` when the edge already
    /// existed; either way the edge is present afterwards.
    pub fn grant(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Remove a permission edge by name. Returns `false` when the edge
    /// was absent; either way the edge is gone afterwards.
    pub fn revoke(&mut self, permission_name: &str) -> bool {
        let before = self.permissions.len();
        self.permissions.retain(|p| p.name != permission_name);
        self.permissions.len() != before
    }

    /// Check whether this role grants the named permission.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.name == name)
    }

    /// Flatten the edge set to the name set used by the resolver.
    pub fn permission_names(&self) -> PermissionSet {
        self.permissions.iter().map(|p| p.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_is_idempotent() {
        let mut role = Role::new("ROLE_EDITOR");

        assert!(role.grant(Permission::new("NEWS_WRITE")));
        assert!(!role.grant(Permission::new("NEWS_WRITE")));
        assert_eq!(role.permissions.len(), 1);
    }

    #[test]
    fn test_revoke_absent_edge_is_noop() {
        let mut role = Role::new("ROLE_EDITOR");
        role.grant(Permission::new("NEWS_WRITE"));

        assert!(!role.revoke("MATCH_WRITE"));
        assert!(role.revoke("NEWS_WRITE"));
        assert!(role.permissions.is_empty());
    }

    #[test]
    fn test_permission_names_flattens_edges() {
        let mut role = Role::new("ROLE_EDITOR");
        role.grant(Permission::new("NEWS_READ"));
        role.grant(Permission::new("NEWS_WRITE"));

        let names = role.permission_names();
        assert!(names.contains("NEWS_READ"));
        assert!(names.contains("NEWS_WRITE"));
        assert_eq!(names.len(), 2);
    }
}
