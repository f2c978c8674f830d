use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

fn ensure_valid_id(id: i64) -> UserResult<()> {
    if id <= 0 {
        return Err(UserError::Validation(format!(
            "id must be a positive integer, got {}",
            id
        )));
    }
    Ok(())
}

/// Service layer for User business logic
///
/// Every method performs its reads first and at most one mutating
/// repository call.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All users, ordered by id
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        ensure_valid_id(id)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(user_name = %input.user_name))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input.validate()?;

        if self
            .repository
            .find_by_user_name(&input.user_name)
            .await?
            .is_some()
        {
            return Err(UserError::NameTaken(input.user_name));
        }

        self.repository.create(input.user_name).await
    }

    /// Rename a user. Keeping the current name is allowed.
    #[instrument(skip(self, input), fields(user_id = id, user_name = %input.user_name))]
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        ensure_valid_id(id)?;
        input.validate()?;

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if let Some(existing) = self.repository.find_by_user_name(&input.user_name).await? {
            if existing.id != id {
                return Err(UserError::NameTaken(input.user_name));
            }
        }

        user.user_name = input.user_name;
        self.repository.update(user).await
    }

    /// Delete a user. Tasks assigned to the user keep the dangling id.
    #[instrument(skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        ensure_valid_id(id)?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(UserError::NotFound(id));
        }

        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use mockall::predicate::eq;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            user_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_name_without_writing() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_user_name()
            .with(eq("alice"))
            .returning(|_| Ok(Some(user(1, "alice"))));
        mock_repo.expect_create().never();

        let service = UserService::new(mock_repo);
        let err = service
            .create_user(CreateUser {
                user_name: "alice".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NameTaken(name) if name == "alice"));
    }

    #[tokio::test]
    async fn test_create_user_rejects_blank_name_before_lookup() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_user_name().never();
        mock_repo.expect_create().never();

        let service = UserService::new(mock_repo);
        let err = service
            .create_user(CreateUser {
                user_name: " ".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_user_to_own_name_succeeds() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Ok(Some(user(5, "alice"))));
        mock_repo
            .expect_find_by_user_name()
            .returning(|_| Ok(Some(user(5, "alice"))));
        mock_repo
            .expect_update()
            .times(1)
            .returning(|u| Ok(u));

        let service = UserService::new(mock_repo);
        let updated = service
            .update_user(
                5,
                UpdateUser {
                    user_name: "alice".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated, user(5, "alice"));
    }

    #[tokio::test]
    async fn test_update_user_to_other_users_name_conflicts() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(user(5, "alice"))));
        mock_repo
            .expect_find_by_user_name()
            .with(eq("bob"))
            .returning(|_| Ok(Some(user(6, "bob"))));
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let err = service
            .update_user(
                5,
                UpdateUser {
                    user_name: "bob".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NameTaken(_)));
    }

    #[tokio::test]
    async fn test_update_user_unknown_id_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let err = service
            .update_user(
                42,
                UpdateUser {
                    user_name: "carol".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_non_positive_ids_are_rejected() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(mock_repo);

        assert!(matches!(
            service.get_user(0).await,
            Err(UserError::Validation(_))
        ));
        assert!(matches!(
            service.delete_user(-3).await,
            Err(UserError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_user_unknown_id_does_not_call_delete() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = UserService::new(mock_repo);
        let err = service.delete_user(3).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_user_lifecycle_in_memory() {
        let service = UserService::new(InMemoryUserRepository::new());

        let alice = service
            .create_user(CreateUser {
                user_name: "alice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(alice.id, 1);

        let renamed = service
            .update_user(
                alice.id,
                UpdateUser {
                    user_name: "alice2".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.user_name, "alice2");
        assert_eq!(service.get_user(1).await.unwrap().user_name, "alice2");

        service.delete_user(alice.id).await.unwrap();
        assert!(matches!(
            service.get_user(alice.id).await,
            Err(UserError::NotFound(1))
        ));
        assert!(service.find_all().await.unwrap().is_empty());
    }
}
