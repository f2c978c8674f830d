use domain_tasks::{Task, TaskRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TodoListError, TodoListResult};
use crate::models::{CreateTodoList, NewTodoList, TodoList, TodoListResponse};
use crate::repository::TodoListRepository;

fn ensure_valid_id(id: i64) -> TodoListResult<()> {
    if id <= 0 {
        return Err(TodoListError::Validation(format!(
            "id must be a positive integer, got {}",
            id
        )));
    }
    Ok(())
}

/// Service layer for TodoList business logic
#[derive(Clone)]
pub struct TodoListService<R: TodoListRepository, T: TaskRepository> {
    repository: Arc<R>,
    tasks: Arc<T>,
}

impl<R: TodoListRepository, T: TaskRepository> TodoListService<R, T> {
    pub fn new(repository: R, tasks: T) -> Self {
        Self {
            repository: Arc::new(repository),
            tasks: Arc::new(tasks),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all_todo_lists(&self) -> TodoListResult<Vec<TodoListResponse>> {
        let lists = self.repository.find_all().await?;

        let mut cache: HashMap<i64, Option<Task>> = HashMap::new();
        let mut responses = Vec::with_capacity(lists.len());
        for list in lists {
            let tasks = self.resolve_tasks(&list.task_ids, &mut cache).await?;
            responses.push(TodoListResponse::new(list, tasks));
        }

        Ok(responses)
    }

    #[instrument(skip(self), fields(todo_list_id = id))]
    pub async fn get_todo_list_by_id(&self, id: i64) -> TodoListResult<TodoListResponse> {
        let list = self.load(id).await?;
        let tasks = self
            .resolve_tasks(&list.task_ids, &mut HashMap::new())
            .await?;
        Ok(TodoListResponse::new(list, tasks))
    }

    #[instrument(skip(self), fields(todo_list_id = id))]
    pub async fn get_todo_list_tasks(&self, id: i64) -> TodoListResult<Vec<Task>> {
        let list = self.load(id).await?;
        self.resolve_tasks(&list.task_ids, &mut HashMap::new())
            .await
    }

    /// Create a list from the given task ids.
    ///
    /// Ids that do not name an existing task are dropped; the rest keep
    /// their relative order.
    #[instrument(skip(self, input), fields(todo_list_name = %input.name))]
    pub async fn create_todo_list(&self, input: CreateTodoList) -> TodoListResult<TodoListResponse> {
        input.validate()?;

        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(TodoListError::NameTaken(input.name));
        }

        let mut tasks = Vec::with_capacity(input.task_ids.len());
        for task_id in &input.task_ids {
            match self.tasks.find_by_id(*task_id).await? {
                Some(task) => tasks.push(task),
                None => tracing::debug!(task_id, "Dropping unknown task id"),
            }
        }

        let list = self
            .repository
            .create(NewTodoList {
                name: input.name,
                task_ids: tasks.iter().map(|t| t.id).collect(),
            })
            .await?;

        Ok(TodoListResponse::new(list, tasks))
    }

    /// Delete a list. Its tasks are left in place.
    #[instrument(skip(self), fields(todo_list_id = id))]
    pub async fn delete_todo_list(&self, id: i64) -> TodoListResult<()> {
        self.load(id).await?;

        if !self.repository.delete(id).await? {
            return Err(TodoListError::NotFound(id));
        }
        Ok(())
    }

    async fn load(&self, id: i64) -> TodoListResult<TodoList> {
        ensure_valid_id(id)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TodoListError::NotFound(id))
    }

    async fn resolve_tasks(
        &self,
        task_ids: &[i64],
        cache: &mut HashMap<i64, Option<Task>>,
    ) -> TodoListResult<Vec<Task>> {
        let mut tasks = Vec::with_capacity(task_ids.len());

        for task_id in task_ids {
            let task = match cache.get(task_id) {
                Some(cached) => cached.clone(),
                None => {
                    let task = self.tasks.find_by_id(*task_id).await?;
                    cache.insert(*task_id, task.clone());
                    task
                }
            };
            tasks.extend(task);
        }

        Ok(tasks)
    }
}
