use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use std::collections::HashMap;

use crate::{
    entity::{todo_list, todo_list_task},
    error::{TodoListError, TodoListResult},
    models::{NewTodoList, TodoList},
    repository::TodoListRepository,
};

/// PostgreSQL implementation of TodoListRepository
///
/// Membership lives in `todo_list_tasks`, one row per task with its
/// position in the list.
#[derive(Clone)]
pub struct PgTodoListRepository {
    db: DatabaseConnection,
}

impl PgTodoListRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn task_ids<C: ConnectionTrait>(db: &C, todo_list_id: i64) -> Result<Vec<i64>, DbErr> {
        let rows = todo_list_task::Entity::find()
            .filter(todo_list_task::Column::TodoListId.eq(todo_list_id))
            .order_by_asc(todo_list_task::Column::Position)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|row| row.task_id).collect())
    }

    async fn with_task_ids(&self, model: todo_list::Model) -> TodoListResult<TodoList> {
        let task_ids = Self::task_ids(&self.db, model.id).await?;
        Ok(TodoList {
            id: model.id,
            name: model.name,
            task_ids,
        })
    }
}

fn map_write_error(err: DbErr, name: &str) -> TodoListError {
    let kind = err.sql_err();
    write_error(kind, err, name)
}

fn write_error(kind: Option<SqlErr>, err: DbErr, name: &str) -> TodoListError {
    match kind {
        Some(SqlErr::UniqueConstraintViolation(_)) => TodoListError::NameTaken(name.to_string()),
        _ => err.into(),
    }
}

#[async_trait]
impl TodoListRepository for PgTodoListRepository {
    async fn find_by_id(&self, id: i64) -> TodoListResult<Option<TodoList>> {
        match todo_list::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.with_task_ids(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> TodoListResult<Option<TodoList>> {
        let model = todo_list::Entity::find()
            .filter(todo_list::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Ok(Some(self.with_task_ids(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> TodoListResult<Vec<TodoList>> {
        let models = todo_list::Entity::find()
            .order_by_asc(todo_list::Column::Id)
            .all(&self.db)
            .await?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let rows = todo_list_task::Entity::find()
            .filter(todo_list_task::Column::TodoListId.is_in(models.iter().map(|m| m.id)))
            .order_by_asc(todo_list_task::Column::TodoListId)
            .order_by_asc(todo_list_task::Column::Position)
            .all(&self.db)
            .await?;

        let mut members: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in rows {
            members.entry(row.todo_list_id).or_default().push(row.task_id);
        }

        Ok(models
            .into_iter()
            .map(|model| TodoList {
                task_ids: members.remove(&model.id).unwrap_or_default(),
                id: model.id,
                name: model.name,
            })
            .collect())
    }

    async fn create(&self, list: NewTodoList) -> TodoListResult<TodoList> {
        let txn = self.db.begin().await?;

        let model = todo_list::ActiveModel {
            id: NotSet,
            name: Set(list.name.clone()),
        }
        .insert(&txn)
        .await
        .map_err(|e| map_write_error(e, &list.name))?;

        if !list.task_ids.is_empty() {
            let rows = (0i32..)
                .zip(list.task_ids.iter())
                .map(|(position, task_id)| todo_list_task::ActiveModel {
                    todo_list_id: Set(model.id),
                    position: Set(position),
                    task_id: Set(*task_id),
                });

            todo_list_task::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            todo_list_id = model.id,
            tasks = list.task_ids.len(),
            "Created todo list"
        );
        Ok(TodoList {
            id: model.id,
            name: model.name,
            task_ids: list.task_ids,
        })
    }

    async fn delete(&self, id: i64) -> TodoListResult<bool> {
        // Membership rows cascade
        let result = todo_list::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(todo_list_id = id, "Deleted todo list");
        }
        Ok(result.rows_affected > 0)
    }
}
