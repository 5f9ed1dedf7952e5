//! Default catalog bootstrap.
//!
//! Seeds the permission catalog for the club-site content resources and
//! the two built-in roles. Every entry is create-if-absent, so running the
//! seed against an already-populated graph changes nothing; operators can
//! call it unconditionally at startup.

use crate::graph::{RbacError, RbacResult, RoleGraph};
use crate::permission::Permission;
use crate::role::Role;

/// Capability names for the club-site content resources.
pub mod permissions {
    pub const PLAYER_READ: &str = "PLAYER_READ";
    pub const PLAYER_WRITE: &str = "PLAYER_WRITE";
    pub const NEWS_READ: &str = "NEWS_READ";
    pub const NEWS_WRITE: &str = "NEWS_WRITE";
    pub const MATCH_READ: &str = "MATCH_READ";
    pub const MATCH_WRITE: &str = "MATCH_WRITE";
    pub const GALLERY_READ: &str = "GALLERY_READ";
    pub const GALLERY_WRITE: &str = "GALLERY_WRITE";
    pub const USER_MANAGE: &str = "USER_MANAGE";
}

/// Built-in role names.
pub mod roles {
    pub const EDITOR: &str = "ROLE_EDITOR";
    pub const ADMIN: &str = "ROLE_ADMIN";
}

/// The full permission catalog, in seeding order.
pub const ALL_PERMISSIONS: &[&str] = &[
    permissions::PLAYER_READ,
    permissions::PLAYER_WRITE,
    permissions::NEWS_READ,
    permissions::NEWS_WRITE,
    permissions::MATCH_READ,
    permissions::MATCH_WRITE,
    permissions::GALLERY_READ,
    permissions::GALLERY_WRITE,
    permissions::USER_MANAGE,
];

/// Grants for the editor role: read everything, write news and gallery.
const EDITOR_GRANTS: &[&str] = &[
    permissions::PLAYER_READ,
    permissions::NEWS_READ,
    permissions::NEWS_WRITE,
    permissions::MATCH_READ,
    permissions::GALLERY_READ,
    permissions::GALLERY_WRITE,
];

/// Seed the default catalog: all content permissions, plus `ROLE_EDITOR`
/// and `ROLE_ADMIN` with their grants.
pub async fn seed_defaults(graph: &dyn RoleGraph) -> RbacResult<()> {
    for name in ALL_PERMISSIONS {
        ensure_permission(graph, name).await?;
    }
    ensure_role(graph, roles::EDITOR, EDITOR_GRANTS).await?;
    ensure_role(graph, roles::ADMIN, ALL_PERMISSIONS).await?;
    Ok(())
}

async fn ensure_permission(graph: &dyn RoleGraph, name: &str) -> RbacResult<Permission> {
    match graph.create_permission(name, None).await {
        Ok(permission) => {
            tracing::debug!(permission = name, "seeded permission");
            Ok(permission)
        }
        // Lost the race or already seeded; the existing record wins.
        Err(RbacError::DuplicateName(_)) => graph.permission_by_name(name).await,
        Err(e) => Err(e),
    }
}

async fn ensure_role(graph: &dyn RoleGraph, name: &str, grants: &[&str]) -> RbacResult<Role> {
    match graph.create_role(name).await {
        Ok(mut role) => {
            for grant in grants {
                let permission = graph.permission_by_name(grant).await?;
                role = graph.assign_permission(role.id, permission.id).await?;
            }
            tracing::info!(role = name, grants = grants.len(), "seeded role");
            Ok(role)
        }
        // An existing role's grants are operator-owned; leave them alone.
        Err(RbacError::DuplicateName(_)) => graph.role_by_name(name).await,
        Err(e) => Err(e),
    }
}
