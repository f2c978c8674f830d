use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Implementations assign ids on `create` and must reject a name already held
/// by another user with [`UserError::NameTaken`], even if the service-level
/// check raced with a concurrent writer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get a user by exact name
    async fn find_by_user_name(&self, user_name: &str) -> UserResult<Option<User>>;

    /// All users, ordered by id
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Insert a new user and assign its id
    async fn create(&self, user_name: String) -> UserResult<User>;

    /// Overwrite an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct UserStore {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl UserStore {
    fn name_taken_by_other(&self, user_name: &str, id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.user_name == user_name && Some(u.id) != id)
    }
}

/// In-memory implementation of UserRepository
///
/// Clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<UserStore>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.user_name == user_name)
            .cloned())
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn create(&self, user_name: String) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.name_taken_by_other(&user_name, None) {
            return Err(UserError::NameTaken(user_name));
        }

        store.last_id += 1;
        let user = User {
            id: store.last_id,
            user_name,
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }
        if store.name_taken_by_other(&user.user_name, Some(user.id)) {
            return Err(UserError::NameTaken(user.user_name));
        }

        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.users.remove(&id).is_some();

        if removed {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create("alice".to_string()).await.unwrap();
        let second = repo.create("bob".to_string()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryUserRepository::new();

        let alice = repo.create("alice".to_string()).await.unwrap();
        assert!(repo.delete(alice.id).await.unwrap());

        let bob = repo.create("bob".to_string()).await.unwrap();
        assert_eq!(bob.id, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let repo = InMemoryUserRepository::new();
        repo.create("alice".to_string()).await.unwrap();

        let err = repo.create("alice".to_string()).await.unwrap_err();
        assert!(matches!(err, UserError::NameTaken(name) if name == "alice"));
    }

    #[tokio::test]
    async fn test_update_allows_own_name_but_not_others() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.create("alice".to_string()).await.unwrap();
        repo.create("bob".to_string()).await.unwrap();

        assert!(repo.update(alice.clone()).await.is_ok());

        let err = repo
            .update(User {
                id: alice.id,
                user_name: "bob".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NameTaken(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = InMemoryUserRepository::new();

        let err = repo
            .update(User {
                id: 7,
                user_name: "ghost".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryUserRepository::new();
        let other = repo.clone();

        repo.create("alice".to_string()).await.unwrap();

        let found = other.find_by_user_name("alice").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(1));
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_name_only_one_wins() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create("alice".to_string()).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
