use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{NewTask, Task, TaskFilter},
    repository::TaskRepository,
};

/// PostgreSQL implementation of TaskRepository
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_write_error(err: DbErr, name: &str) -> TaskError {
    let kind = err.sql_err();
    write_error(kind, err, name)
}

fn write_error(kind: Option<SqlErr>, err: DbErr, name: &str) -> TaskError {
    match kind {
        Some(SqlErr::UniqueConstraintViolation(_)) => TaskError::NameTaken(name.to_string()),
        _ => err.into(),
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        self.find_by_filter(TaskFilter::default()).await
    }

    async fn find_by_filter(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let mut query = entity::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create(&self, task: NewTask) -> TaskResult<Task> {
        let name = task.name.clone();
        let active_model: entity::ActiveModel = task.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, &name))?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let name = task.name.clone();
        let active_model: entity::ActiveModel = task.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => TaskError::NotFound(id),
            other => map_write_error(other, &name),
        })?;

        tracing::info!(task_id = id, "Updated task");
        Ok(model.into())
    }
}
