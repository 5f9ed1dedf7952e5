//! In-memory role/permission graph.
//!
//! Suitable for single-process deployments and tests. A durable backend
//! would enforce name uniqueness through database constraints; here a
//! single writer lock over the whole graph provides the same
//! check-then-write atomicity, and every edge mutation replaces the owning
//! role's state under that lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::graph::{RbacError, RbacResult, RoleGraph};
use crate::permission::Permission;
use crate::role::Role;

#[derive(Debug, Default)]
struct GraphState {
    roles: HashMap<Uuid, Role>,
    permissions: HashMap<Uuid, Permission>,
}

/// In-memory [`RoleGraph`] implementation.
#[derive(Debug, Default)]
pub struct MemoryRoleGraph {
    state: RwLock<GraphState>,
}

impl MemoryRoleGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleGraph for MemoryRoleGraph {
    async fn create_role(&self, name: &str) -> RbacResult<Role> {
        let mut state = self.state.write().await;
        if state.roles.values().any(|r| r.name == name) {
            return Err(RbacError::DuplicateName(name.to_string()));
        }
        let role = Role::new(name);
        state.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn create_permission(
        &self,
        name: &str,
        description: Option<String>,
    ) -> RbacResult<Permission> {
        let mut state = self.state.write().await;
        if state.permissions.values().any(|p| p.name == name) {
            return Err(RbacError::DuplicateName(name.to_string()));
        }
        let mut permission = Permission::new(name);
        permission.description = description;
        state.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn role(&self, id: Uuid) -> RbacResult<Role> {
        let state = self.state.read().await;
        state
            .roles
            .get(&id)
            .cloned()
            .ok_or_else(|| RbacError::RoleNotFound(id.to_string()))
    }

    async fn role_by_name(&self, name: &str) -> RbacResult<Role> {
        let state = self.state.read().await;
        state
            .roles
            .values()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| RbacError::RoleNotFound(name.to_string()))
    }

    async fn permission(&self, id: Uuid) -> RbacResult<Permission> {
        let state = self.state.read().await;
        state
            .permissions
            .get(&id)
            .cloned()
            .ok_or_else(|| RbacError::PermissionNotFound(id.to_string()))
    }

    async fn permission_by_name(&self, name: &str) -> RbacResult<Permission> {
        let state = self.state.read().await;
        state
            .permissions
            .values()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| RbacError::PermissionNotFound(name.to_string()))
    }

    async fn list_roles(&self) -> RbacResult<Vec<Role>> {
        let state = self.state.read().await;
        let mut roles: Vec<Role> = state.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn list_permissions(&self) -> RbacResult<Vec<Permission>> {
        let state = self.state.read().await;
        let mut permissions: Vec<Permission> = state.permissions.values().cloned().collect();
        permissions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(permissions)
    }

    async fn assign_permission(&self, role_id: Uuid, permission_id: Uuid) -> RbacResult<Role> {
        let mut state = self.state.write().await;
        let permission = state
            .permissions
            .get(&permission_id)
            .cloned()
            .ok_or_else(|| RbacError::PermissionNotFound(permission_id.to_string()))?;
        let role = state
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| RbacError::RoleNotFound(role_id.to_string()))?;
        role.grant(permission);
        Ok(role.clone())
    }

    async fn remove_permission(&self, role_id: Uuid, permission_id: Uuid) -> RbacResult<Role> {
        let mut state = self.state.write().await;
        let permission = state
            .permissions
            .get(&permission_id)
            .cloned()
            .ok_or_else(|| RbacError::PermissionNotFound(permission_id.to_string()))?;
        let role = state
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| RbacError::RoleNotFound(role_id.to_string()))?;
        role.revoke(&permission.name);
        Ok(role.clone())
    }

    async fn rename_role(&self, id: Uuid, new_name: &str) -> RbacResult<Role> {
        let mut state = self.state.write().await;
        if state.roles.values().any(|r| r.id != id && r.name == new_name) {
            return Err(RbacError::DuplicateName(new_name.to_string()));
        }
        let role = state
            .roles
            .get_mut(&id)
            .ok_or_else(|| RbacError::RoleNotFound(id.to_string()))?;
        role.name = new_name.to_string();
        Ok(role.clone())
    }

    async fn update_permission_description(
        &self,
        id: Uuid,
        description: Option<String>,
    ) -> RbacResult<Permission> {
        let mut state = self.state.write().await;
        let updated = {
            let permission = state
                .permissions
                .get_mut(&id)
                .ok_or_else(|| RbacError::PermissionNotFound(id.to_string()))?;
            permission.description = description;
            permission.clone()
        };
        // Keep the copies embedded in role edge sets in step.
        for role in state.roles.values_mut() {
            if role.permissions.contains(&updated) {
                role.permissions.replace(updated.clone());
            }
        }
        Ok(updated)
    }

    async fn delete_role(&self, id: Uuid) -> RbacResult<()> {
        let mut state = self.state.write().await;
        state
            .roles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RbacError::RoleNotFound(id.to_string()))
    }

    async fn delete_permission(&self, id: Uuid) -> RbacResult<()> {
        let mut state = self.state.write().await;
        let permission = state
            .permissions
            .remove(&id)
            .ok_or_else(|| RbacError::PermissionNotFound(id.to_string()))?;
        for role in state.roles.values_mut() {
            role.revoke(&permission.name);
        }
        Ok(())
    }
}
