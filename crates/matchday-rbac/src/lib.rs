//! # Matchday RBAC (Role-Based Access Control)
//!
//! This crate owns the role/permission assignment graph for the Matchday
//! club-site backend: the permission catalog, the named roles that bundle
//! permissions, and the storage contract that keeps both consistent.
//!
//! ## Overview
//!
//! The matchday-rbac crate handles:
//! - **Permissions**: named capabilities ("NEWS_WRITE"), unique by name
//! - **Roles**: named permission bundles ("ROLE_ADMIN"), unique by name
//! - **The graph contract**: [`RoleGraph`], with atomic name-uniqueness
//!   checks and idempotent edge mutation
//! - **Bootstrap**: idempotent seeding of the default catalog
//!
//! ## Semantics
//!
//! - Permission identity is the *name*; surrogate ids only address
//!   storage. Renaming a permission in place is not offered: rename is
//!   delete + create.
//! - Adding an edge that already exists and removing one that never did
//!   are both successful no-ops.
//! - Deleting a permission clears its edges from every role first;
//!   deleting a role takes its edge set with it.
//! - Two concurrent creates for the same name resolve to exactly one
//!   success and one `DuplicateName`.
//!
//! ## Features
//!
//! - `memory` (default): in-memory graph backend for single-process
//!   deployments and tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use matchday_rbac::{MemoryRoleGraph, RoleGraph};
//!
//! # async fn example() -> matchday_rbac::RbacResult<()> {
//! let graph = MemoryRoleGraph::new();
//!
//! let news_write = graph.create_permission("NEWS_WRITE", None).await?;
//! let editor = graph.create_role("ROLE_EDITOR").await?;
//!
//! let editor = graph.assign_permission(editor.id, news_write.id).await?;
//! assert!(editor.has_permission("NEWS_WRITE"));
//! # Ok(())
//! # }
//! ```

pub mod graph;
#[cfg(feature = "memory")]
pub mod memory;
pub mod permission;
pub mod role;
pub mod seed;

// Re-export main types
pub use graph::{RbacError, RbacResult, RoleGraph};
pub use permission::{Permission, PermissionSet};
pub use role::Role;
pub use seed::seed_defaults;

#[cfg(feature = "memory")]
pub use memory::MemoryRoleGraph;
