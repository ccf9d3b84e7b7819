use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PersistenceError, UserStore};
use crate::shared::user::{normalize_email, NewUser, User, UserPatch};

/// User store kept in process memory
///
/// Data is lost on restart. The email uniqueness check and the insert happen
/// under the same write lock.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, PersistenceError> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == new_user.email) {
            return Err(PersistenceError::Conflict { field: "email" });
        }
        let user = new_user.into_user(Uuid::new_v4(), Utc::now());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PersistenceError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError> {
        let email = normalize_email(email);
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, PersistenceError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(PersistenceError::NotFound)?;
        patch.apply(user, Utc::now());
        Ok(user.clone())
    }

    async fn record_usage(&self, id: Uuid, tokens: u64, words: u64) -> Result<User, PersistenceError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(PersistenceError::NotFound)?;
        let token_used = user
            .token_used
            .checked_add(tokens)
            .ok_or(PersistenceError::CounterOverflow)?;
        let word_used = user
            .word_used
            .checked_add(words)
            .ok_or(PersistenceError::CounterOverflow)?;
        user.token_used = token_used;
        user.word_used = word_used;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::shared::user::AccountStatus;

    fn new_user(email: &str) -> NewUser {
        let mut user = NewUser::new("Test User", email, "https://img/test.png");
        user.password = Some("hash".to_string());
        user
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryUserStore::new();
        let created = store.create(new_user("test@example.com")).await.unwrap();

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_email = store.find_by_email(" TEST@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryUserStore::new();
        store.create(new_user("dup@example.com")).await.unwrap();

        let result = store.create(new_user("Dup@Example.com")).await;
        assert_matches!(result, Err(PersistenceError::Conflict { field: "email" }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = InMemoryUserStore::new();
        let result = store.update(Uuid::new_v4(), UserPatch::default()).await;
        assert_matches!(result, Err(PersistenceError::NotFound));
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let store = InMemoryUserStore::new();
        let created = store.create(new_user("patch@example.com")).await.unwrap();

        let updated = store
            .update(
                created.id,
                UserPatch {
                    name: Some("Renamed".to_string()),
                    status: Some(AccountStatus::Inactive),
                    ..UserPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, AccountStatus::Inactive);
        assert_eq!(updated.email, created.email);
    }

    #[tokio::test]
    async fn test_record_usage_accumulates() {
        let store = InMemoryUserStore::new();
        let created = store.create(new_user("usage@example.com")).await.unwrap();

        store.record_usage(created.id, 10, 3).await.unwrap();
        let user = store.record_usage(created.id, 5, 2).await.unwrap();
        assert_eq!(user.token_used, 15);
        assert_eq!(user.word_used, 5);
    }

    #[tokio::test]
    async fn test_record_usage_overflow() {
        let store = InMemoryUserStore::new();
        let created = store.create(new_user("big@example.com")).await.unwrap();
        store.record_usage(created.id, u64::MAX, 0).await.unwrap();

        let result = store.record_usage(created.id, 1, 0).await;
        assert_matches!(result, Err(PersistenceError::CounterOverflow));
    }
}
