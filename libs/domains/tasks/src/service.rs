use domain_users::{User, UserRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, NewTask, Task, TaskFilter, TaskResponse, TaskStatus, UpdateTask};
use crate::repository::TaskRepository;

fn ensure_valid_id(id: i64) -> TaskResult<()> {
    if id <= 0 {
        return Err(TaskError::Validation(format!(
            "id must be a positive integer, got {}",
            id
        )));
    }
    Ok(())
}

/// Service layer for Task business logic
///
/// Reads users through their repository to resolve assignees; never writes
/// to it.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository, U: UserRepository> {
    repository: Arc<R>,
    users: Arc<U>,
}

impl<R: TaskRepository, U: UserRepository> TaskService<R, U> {
    pub fn new(repository: R, users: U) -> Self {
        Self {
            repository: Arc::new(repository),
            users: Arc::new(users),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self.repository.find_all().await?;
        self.with_assignees(tasks).await
    }

    #[instrument(skip(self), fields(status = %status))]
    pub async fn get_all_tasks_by_status(
        &self,
        status: TaskStatus,
    ) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self
            .repository
            .find_by_filter(TaskFilter {
                status: Some(status),
            })
            .await?;
        self.with_assignees(tasks).await
    }

    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i64) -> TaskResult<TaskResponse> {
        ensure_valid_id(id)?;

        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;
        self.with_assignee(task).await
    }

    /// Create a task, optionally assigned by user name.
    ///
    /// A `user_name` that resolves to nobody fails the whole call; the task
    /// is never created unassigned instead.
    #[instrument(skip(self, input), fields(task_name = %input.name))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<TaskResponse> {
        input.validate()?;

        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(TaskError::NameTaken(input.name));
        }

        let assignee = match input.user_name.as_deref() {
            Some(user_name) => Some(self.resolve_user(user_name).await?),
            None => None,
        };

        let task = self
            .repository
            .create(NewTask {
                name: input.name,
                description: input.description,
                status: input.status,
                assigned_user_id: assignee.as_ref().map(|u| u.id),
            })
            .await?;

        Ok(TaskResponse::new(task, assignee))
    }

    /// Overwrite a task. Omitting `user_name` (or sending a blank one)
    /// clears the assignment.
    #[instrument(skip(self, input), fields(task_id = id, task_name = %input.name))]
    pub async fn update_task(&self, id: i64, input: UpdateTask) -> TaskResult<TaskResponse> {
        ensure_valid_id(id)?;
        input.validate()?;

        let assignee = match input.user_name.as_deref() {
            Some(user_name) if !user_name.trim().is_empty() => {
                Some(self.resolve_user(user_name).await?)
            }
            _ => None,
        };

        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        if let Some(existing) = self.repository.find_by_name(&input.name).await? {
            if existing.id != id {
                return Err(TaskError::NameTaken(input.name));
            }
        }

        task.name = input.name;
        task.description = input.description;
        task.status = input.status;
        task.assigned_user_id = assignee.as_ref().map(|u| u.id);

        let task = self.repository.update(task).await?;
        Ok(TaskResponse::new(task, assignee))
    }

    async fn resolve_user(&self, user_name: &str) -> TaskResult<User> {
        self.users
            .find_by_user_name(user_name)
            .await?
            .ok_or_else(|| TaskError::UserNotFound(user_name.to_string()))
    }

    async fn with_assignee(&self, task: Task) -> TaskResult<TaskResponse> {
        let assignee = match task.assigned_user_id {
            Some(user_id) => self.users.find_by_id(user_id).await?,
            None => None,
        };
        Ok(TaskResponse::new(task, assignee))
    }

    /// Resolve assignees, looking each distinct user up once.
    async fn with_assignees(&self, tasks: Vec<Task>) -> TaskResult<Vec<TaskResponse>> {
        let mut users: HashMap<i64, Option<User>> = HashMap::new();
        let mut responses = Vec::with_capacity(tasks.len());

        for task in tasks {
            let assignee = match task.assigned_user_id {
                Some(user_id) => match users.get(&user_id) {
                    Some(cached) => cached.clone(),
                    None => {
                        let user = self.users.find_by_id(user_id).await?;
                        users.insert(user_id, user.clone());
                        user
                    }
                },
                None => None,
            };
            responses.push(TaskResponse::new(task, assignee));
        }

        Ok(responses)
    }
}
