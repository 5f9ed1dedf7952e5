//! Storage contract for user credentials.
//!
//! The store is the data owner for accounts. Implementations must make
//! `create` an atomic check-and-insert keyed on the email identifier:
//! two concurrent creates for the same email yield exactly one success
//! and one [`IdentityError::DuplicateIdentifier`], never two records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::user::User;

/// Credential store error types.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Account lookup miss.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Email uniqueness violation on insert.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// The record violates a store invariant (e.g. empty password hash).
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Backend timeout or unavailability.
    #[error("storage unavailable: {0}")]
    Storage(String),
}

impl IdentityError {
    /// Transient failures may be retried by the caller with backoff;
    /// everything else is a final answer for the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, IdentityError::Storage(_))
    }
}

/// Result type for credential store operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// The account data owner.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Atomic check-and-insert keyed on the email identifier. Rejects an
    /// empty password hash with [`IdentityError::InvalidRecord`].
    async fn create(&self, user: User) -> IdentityResult<User>;

    /// Look up an account by its login identifier.
    async fn find_by_email(&self, email: &str) -> IdentityResult<User>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: Uuid) -> IdentityResult<User>;

    /// Check whether the login identifier is taken.
    async fn exists_by_email(&self, email: &str) -> IdentityResult<bool>;

    /// Stamp the last successful login.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> IdentityResult<()>;

    /// Add a role membership; adding one the account already holds is a
    /// no-op. Returns the updated record.
    async fn assign_role(&self, id: Uuid, role_id: Uuid) -> IdentityResult<User>;

    /// All accounts, sorted by email.
    async fn list(&self) -> IdentityResult<Vec<User>>;
}
