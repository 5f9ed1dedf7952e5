//! User records and their public projection.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A provisioned account.
///
/// Accounts are created by the admin provisioning flow, never
/// self-registered. The password hash is opaque to this crate (hashing
/// and verification live in the auth layer) and the plaintext is never
/// stored anywhere. Role membership is recorded by role id; names are
/// resolved against the graph when a display form or a permission union
/// is needed, so renaming a role never strands a membership.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account id.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Unique login identifier.
    pub email: String,

    /// Opaque salted password digest. Never empty once the account exists.
    pub password_hash: String,

    /// When the account was provisioned.
    pub created_at: DateTime<Utc>,

    /// Last successful login, if any.
    pub last_login: Option<DateTime<Utc>>,

    /// Role memberships, by role id. May be empty; an account with no
    /// roles resolves to the empty permission set.
    #[serde(default)]
    pub roles: HashSet<Uuid>,
}

impl User {
    /// Create a record with a freshly stamped id and creation time.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
            last_login: None,
            roles: HashSet::new(),
        }
    }

    /// Add a role membership.
    pub fn with_role(mut self, role_id: Uuid) -> Self {
        self.roles.insert(role_id);
        self
    }

    /// Check membership by role id.
    pub fn has_role_id(&self, role_id: Uuid) -> bool {
        self.roles.contains(&role_id)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .field("roles", &self.roles)
            .finish()
    }
}

/// Public projection of a user, safe to hand to callers.
///
/// Carries resolved role *names* instead of ids, and never the password
/// hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// Unique account id.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Login identifier.
    pub email: String,

    /// Resolved role names, sorted.
    pub roles: Vec<String>,

    /// When the account was provisioned.
    pub created_at: DateTime<Utc>,

    /// Last successful login, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl UserSummary {
    /// Build from a stored record plus its resolved role names.
    pub fn new(user: &User, role_names: Vec<String>) -> Self {
        let mut roles = role_names;
        roles.sort();
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            roles,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_logins_or_roles() {
        let user = User::new("Alice", "alice@example.com", "$2b$04$hash");

        assert!(user.last_login.is_none());
        assert!(user.roles.is_empty());
    }

    #[test]
    fn test_with_role_is_idempotent() {
        let role_id = Uuid::now_v7();
        let user = User::new("Alice", "alice@example.com", "$2b$04$hash")
            .with_role(role_id)
            .with_role(role_id);

        assert_eq!(user.roles.len(), 1);
        assert!(user.has_role_id(role_id));
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User::new("Alice", "alice@example.com", "$2b$04$topsecret");
        let rendered = format!("{:?}", user);

        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("topsecret"));
    }

    #[test]
    fn test_summary_sorts_roles_and_omits_hash() {
        let user = User::new("Alice", "alice@example.com", "$2b$04$topsecret");
        let summary = UserSummary::new(
            &user,
            vec!["ROLE_EDITOR".to_string(), "ROLE_ADMIN".to_string()],
        );

        assert_eq!(summary.roles, vec!["ROLE_ADMIN", "ROLE_EDITOR"]);
        let rendered = serde_json::to_string(&summary).unwrap();
        assert!(!rendered.contains("topsecret"));
    }
}
