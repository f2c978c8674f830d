use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// The unique index on `user_name` turns a lost race into `NameTaken`.
fn map_write_error(err: DbErr, user_name: &str) -> UserError {
    let kind = err.sql_err();
    write_error(kind, err, user_name)
}

fn write_error(kind: Option<SqlErr>, err: DbErr, user_name: &str) -> UserError {
    match kind {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::NameTaken(user_name.to_string()),
        _ => err.into(),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_user_name(&self, user_name: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::UserName.eq(user_name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, user_name: String) -> UserResult<User> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            user_name: Set(user_name.clone()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, &user_name))?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let active_model = entity::ActiveModel {
            id: Set(user.id),
            user_name: Set(user.user_name.clone()),
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => UserError::NotFound(user.id),
            other => map_write_error(other, &user.user_name),
        })?;

        tracing::info!(user_id = user.id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(result.rows_affected > 0)
    }
}
