//! Storage contract for the role/permission graph.
//!
//! Implementations own name uniqueness: every check-then-write below must
//! be atomic relative to other writers targeting the same name or edge, so
//! that two concurrent create calls for the same name yield exactly one
//! success and one [`RbacError::DuplicateName`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::permission::Permission;
use crate::role::Role;

/// Role/permission graph error types.
#[derive(Debug, Error)]
pub enum RbacError {
    /// Role lookup miss.
    #[error("role not found: {0}")]
    RoleNotFound(String),

    /// Permission lookup miss.
    #[error("permission not found: {0}")]
    PermissionNotFound(String),

    /// Name uniqueness violation on a role or permission write.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// Backend timeout or unavailability.
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl RbacError {
    /// Transient failures may be retried by the caller with backoff;
    /// everything else is a final answer for the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RbacError::Storage(_))
    }
}

/// Result type for graph operations.
pub type RbacResult<T> = Result<T, RbacError>;

/// The role/permission assignment graph.
///
/// Roles and permissions are the vertices; the many-to-many edges between
/// them carry no attributes. Edge mutation is idempotent in both
/// directions: adding an existing edge and removing an absent one are
/// successful no-ops.
#[async_trait]
pub trait RoleGraph: Send + Sync {
    /// Create a role. Fails with [`RbacError::DuplicateName`] when the
    /// name is already taken.
    async fn create_role(&self, name: &str) -> RbacResult<Role>;

    /// Create a permission. Fails with [`RbacError::DuplicateName`] when
    /// the name is already taken.
    async fn create_permission(
        &self,
        name: &str,
        description: Option<String>,
    ) -> RbacResult<Permission>;

    /// Fetch a role by id.
    async fn role(&self, id: Uuid) -> RbacResult<Role>;

    /// Fetch a role by its unique name.
    async fn role_by_name(&self, name: &str) -> RbacResult<Role>;

    /// Fetch a permission by id.
    async fn permission(&self, id: Uuid) -> RbacResult<Permission>;

    /// Fetch a permission by its unique name.
    async fn permission_by_name(&self, name: &str) -> RbacResult<Permission>;

    /// All roles, sorted by name.
    async fn list_roles(&self) -> RbacResult<Vec<Role>>;

    /// All permissions, sorted by name.
    async fn list_permissions(&self) -> RbacResult<Vec<Permission>>;

    /// Add the role→permission edge and return the role with the edge
    /// present, whether or not it pre-existed.
    async fn assign_permission(&self, role_id: Uuid, permission_id: Uuid) -> RbacResult<Role>;

    /// Remove the role→permission edge and return the role with the edge
    /// absent, whether or not it existed before.
    async fn remove_permission(&self, role_id: Uuid, permission_id: Uuid) -> RbacResult<Role>;

    /// Rename a role. Renaming to a name held by a *different* role is
    /// [`RbacError::DuplicateName`]; renaming a role to its own current
    /// name is a no-op success.
    async fn rename_role(&self, id: Uuid, new_name: &str) -> RbacResult<Role>;

    /// Update a permission's description. The name is immutable; renaming
    /// a permission is a delete followed by a create.
    async fn update_permission_description(
        &self,
        id: Uuid,
        description: Option<String>,
    ) -> RbacResult<Permission>;

    /// Delete a role together with its permission edges.
    async fn delete_role(&self, id: Uuid) -> RbacResult<()>;

    /// Delete a permission, clearing its edges from every role first so
    /// no role is left referencing a deleted permission.
    async fn delete_permission(&self, id: Uuid) -> RbacResult<()>;
}
