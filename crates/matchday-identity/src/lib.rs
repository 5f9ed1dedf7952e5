//! # Matchday Identity
//!
//! This crate owns the account records for the Matchday club-site
//! backend: who exists, how they log in, and which roles they hold.
//!
//! ## Overview
//!
//! The matchday-identity crate handles:
//! - **User records**: display name, unique email identifier, opaque
//!   password hash, timestamps, role memberships
//! - **The store contract**: [`CredentialStore`], with atomic
//!   check-and-insert on the email identifier
//! - **Public projection**: [`UserSummary`], the role-name view handed
//!   to callers, without the password hash
//!
//! Password hashing and verification are deliberately *not* here; they
//! live in the auth layer. This crate treats the hash as an opaque
//! string that must never be empty once an account exists.
//!
//! ## Features
//!
//! - `memory` (default): in-memory store backend for single-process
//!   deployments and tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use matchday_identity::{CredentialStore, MemoryCredentialStore, User};
//!
//! # async fn example() -> matchday_identity::IdentityResult<()> {
//! let store = MemoryCredentialStore::new();
//!
//! let user = User::new("Alice", "alice@example.com", "$2b$12$...");
//! let user = store.create(user).await?;
//!
//! assert!(store.exists_by_email("alice@example.com").await?);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "memory")]
pub mod memory;
pub mod store;
pub mod user;

// Re-export main types
pub use store::{CredentialStore, IdentityError, IdentityResult};
pub use user::{User, UserSummary};

#[cfg(feature = "memory")]
pub use memory::MemoryCredentialStore;
