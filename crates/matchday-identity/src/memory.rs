//! In-memory credential store.
//!
//! Suitable for single-process deployments and tests. A durable backend
//! would enforce email uniqueness through a database constraint; here the
//! single writer lock over the account table provides the same
//! check-then-insert atomicity.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{CredentialStore, IdentityError, IdentityResult};
use crate::user::User;

/// In-memory [`CredentialStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, user: User) -> IdentityResult<User> {
        if user.password_hash.is_empty() {
            return Err(IdentityError::InvalidRecord(
                "password hash must not be empty".to_string(),
            ));
        }
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(IdentityError::DuplicateIdentifier(user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> IdentityResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| IdentityError::UserNotFound(email.to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> IdentityResult<User> {
        let users = self.users.read().await;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| IdentityError::UserNotFound(id.to_string()))
    }

    async fn exists_by_email(&self, email: &str) -> IdentityResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> IdentityResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| IdentityError::UserNotFound(id.to_string()))?;
        user.last_login = Some(at);
        Ok(())
    }

    async fn assign_role(&self, id: Uuid, role_id: Uuid) -> IdentityResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| IdentityError::UserNotFound(id.to_string()))?;
        user.roles.insert(role_id);
        Ok(user.clone())
    }

    async fn list(&self) -> IdentityResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_user(email: &str) -> User {
        User::new("Alice", email, "$2b$04$hash")
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = MemoryCredentialStore::new();
        let user = store.create(sample_user("alice@example.com")).await.unwrap();

        let by_email = store.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.find_by_id(user.id).await.unwrap();
        assert_eq!(by_id.email, "alice@example.com");

        assert!(store.exists_by_email("alice@example.com").await.unwrap());
        assert!(!store.exists_by_email("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let store = MemoryCredentialStore::new();
        store.create(sample_user("alice@example.com")).await.unwrap();

        let result = store.create(sample_user("alice@example.com")).await;
        assert!(matches!(result, Err(IdentityError::DuplicateIdentifier(_))));
    }

    #[tokio::test]
    async fn test_concurrent_create_yields_one_row() {
        let store = Arc::new(MemoryCredentialStore::new());

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.create(sample_user("alice@example.com")).await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.create(sample_user("alice@example.com")).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(IdentityError::DuplicateIdentifier(_))))
                .count(),
            1
        );
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_hash() {
        let store = MemoryCredentialStore::new();
        let result = store.create(User::new("Alice", "alice@example.com", "")).await;

        assert!(matches!(result, Err(IdentityError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_record_login_stamps_timestamp() {
        let store = MemoryCredentialStore::new();
        let user = store.create(sample_user("alice@example.com")).await.unwrap();
        assert!(user.last_login.is_none());

        let at = Utc::now();
        store.record_login(user.id, at).await.unwrap();

        let user = store.find_by_id(user.id).await.unwrap();
        assert_eq!(user.last_login, Some(at));
    }

    #[tokio::test]
    async fn test_assign_role_is_idempotent() {
        let store = MemoryCredentialStore::new();
        let user = store.create(sample_user("alice@example.com")).await.unwrap();
        let role_id = Uuid::now_v7();

        store.assign_role(user.id, role_id).await.unwrap();
        let updated = store.assign_role(user.id, role_id).await.unwrap();

        assert_eq!(updated.roles.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_miss() {
        let store = MemoryCredentialStore::new();

        assert!(matches!(
            store.find_by_id(Uuid::now_v7()).await,
            Err(IdentityError::UserNotFound(_))
        ));
        assert!(matches!(
            store.record_login(Uuid::now_v7(), Utc::now()).await,
            Err(IdentityError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_email() {
        let store = MemoryCredentialStore::new();
        store.create(sample_user("carol@example.com")).await.unwrap();
        store.create(sample_user("alice@example.com")).await.unwrap();
        store.create(sample_user("bob@example.com")).await.unwrap();

        let emails: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(
            emails,
            vec!["alice@example.com", "bob@example.com", "carol@example.com"]
        );
    }
}
