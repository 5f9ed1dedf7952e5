//! Effective-permission resolution.
//!
//! The effective permission set of an identity is the union of the
//! permission sets of its roles. Resolution is deny-by-default: a
//! membership pointing at a role that no longer exists, or a stale role
//! name inside token claims, contributes nothing rather than erroring.

use std::sync::Arc;

use matchday_identity::User;
use matchday_rbac::{PermissionSet, RbacError, RoleGraph};

use crate::claims::AccessClaims;
use crate::error::AuthResult;

/// Resolves identities to their effective permission set.
///
/// Two resolution paths exist, matching the two shapes an identity can
/// take: a [`User`] record (memberships by role id, fresh graph state)
/// and [`AccessClaims`] (role names snapshotted at issuance; changes to
/// the graph after issuance are not reflected until re-login).
pub struct PermissionResolver {
    graph: Arc<dyn RoleGraph>,
}

impl PermissionResolver {
    /// Create a resolver over the given graph.
    pub fn new(graph: Arc<dyn RoleGraph>) -> Self {
        Self { graph }
    }

    /// Union over the user's current role memberships.
    pub async fn effective_permissions(&self, user: &User) -> AuthResult<PermissionSet> {
        let mut set = PermissionSet::new();
        for role_id in &user.roles {
            match self.graph.role(*role_id).await {
                Ok(role) => set.merge(&role.permission_names()),
                // Membership outlived the role; it grants nothing.
                Err(RbacError::RoleNotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(set)
    }

    /// Union over a set of role names, as embedded in token claims.
    pub async fn permissions_for_roles(&self, role_names: &[String]) -> AuthResult<PermissionSet> {
        let mut set = PermissionSet::new();
        for name in role_names {
            match self.graph.role_by_name(name).await {
                Ok(role) => set.merge(&role.permission_names()),
                Err(RbacError::RoleNotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(set)
    }

    /// Union over the role snapshot carried by token claims.
    pub async fn permissions_for_claims(&self, claims: &AccessClaims) -> AuthResult<PermissionSet> {
        self.permissions_for_roles(&claims.roles).await
    }

    /// Check a single permission against the user's current memberships.
    pub async fn has_permission(&self, user: &User, permission: &str) -> AuthResult<bool> {
        Ok(self.effective_permissions(user).await?.contains(permission))
    }

    /// Check whether the user currently holds the named role.
    pub async fn has_role(&self, user: &User, role_name: &str) -> AuthResult<bool> {
        for role_id in &user.roles {
            match self.graph.role(*role_id).await {
                Ok(role) if role.name == role_name => return Ok(true),
                Ok(_) => {}
                Err(RbacError::RoleNotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(false)
    }

    /// Resolve the sorted role names for a user's memberships. Stale
    /// memberships are skipped, consistent with permission resolution.
    pub async fn role_names(&self, user: &User) -> AuthResult<Vec<String>> {
        let mut names = Vec::with_capacity(user.roles.len());
        for role_id in &user.roles {
            match self.graph.role(*role_id).await {
                Ok(role) => names.push(role.name),
                Err(RbacError::RoleNotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchday_rbac::MemoryRoleGraph;
    use uuid::Uuid;

    async fn graph_with_editor() -> (Arc<MemoryRoleGraph>, matchday_rbac::Role) {
        let graph = Arc::new(MemoryRoleGraph::new());
        let news_write = graph.create_permission("NEWS_WRITE", None).await.unwrap();
        let news_read = graph.create_permission("NEWS_READ", None).await.unwrap();
        let editor = graph.create_role("ROLE_EDITOR").await.unwrap();
        graph.assign_permission(editor.id, news_write.id).await.unwrap();
        let editor = graph.assign_permission(editor.id, news_read.id).await.unwrap();
        (graph, editor)
    }

    #[tokio::test]
    async fn test_effective_permissions_is_union_of_roles() {
        let (graph, editor) = graph_with_editor().await;
        let user_manage = graph.create_permission("USER_MANAGE", None).await.unwrap();
        let admin = graph.create_role("ROLE_ADMIN").await.unwrap();
        graph.assign_permission(admin.id, user_manage.id).await.unwrap();

        let resolver = PermissionResolver::new(graph);
        let user = User::new("Alice", "alice@example.com", "$2b$04$hash")
            .with_role(editor.id)
            .with_role(admin.id);

        let set = resolver.effective_permissions(&user).await.unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("NEWS_WRITE"));
        assert!(set.contains("USER_MANAGE"));
    }

    #[tokio::test]
    async fn test_no_roles_resolves_to_empty_set() {
        let (graph, _) = graph_with_editor().await;
        let resolver = PermissionResolver::new(graph);
        let user = User::new("Alice", "alice@example.com", "$2b$04$hash");

        let set = resolver.effective_permissions(&user).await.unwrap();
        assert!(set.is_empty());
        assert!(!resolver.has_permission(&user, "NEWS_WRITE").await.unwrap());
    }

    #[tokio::test]
    async fn test_stale_membership_grants_nothing() {
        let (graph, editor) = graph_with_editor().await;
        let resolver = PermissionResolver::new(graph.clone());
        let user = User::new("Alice", "alice@example.com", "$2b$04$hash")
            .with_role(editor.id)
            .with_role(Uuid::now_v7());

        let set = resolver.effective_permissions(&user).await.unwrap();
        assert_eq!(set.len(), 2);

        graph.delete_role(editor.id).await.unwrap();
        let set = resolver.effective_permissions(&user).await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_claims_resolution_skips_unknown_role_names() {
        let (graph, _) = graph_with_editor().await;
        let resolver = PermissionResolver::new(graph);

        let set = resolver
            .permissions_for_roles(&[
                "ROLE_EDITOR".to_string(),
                "ROLE_GONE".to_string(),
            ])
            .await
            .unwrap();

        assert!(set.contains("NEWS_WRITE"));
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn test_has_role_checks_current_memberships() {
        let (graph, editor) = graph_with_editor().await;
        let resolver = PermissionResolver::new(graph);
        let user =
            User::new("Alice", "alice@example.com", "$2b$04$hash").with_role(editor.id);

        assert!(resolver.has_role(&user, "ROLE_EDITOR").await.unwrap());
        assert!(!resolver.has_role(&user, "ROLE_ADMIN").await.unwrap());
    }
}
