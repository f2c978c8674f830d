use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{NewTask, Task, TaskFilter};

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations must reject a name held by another task with
/// [`TaskError::NameTaken`] on both `create` and `update`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get a task by ID
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Get a task by exact name
    async fn find_by_name(&self, name: &str) -> TaskResult<Option<Task>>;

    /// All tasks, ordered by id
    async fn find_all(&self) -> TaskResult<Vec<Task>>;

    /// Tasks matching the filter, ordered by id
    async fn find_by_filter(&self, filter: TaskFilter) -> TaskResult<Vec<Task>>;

    /// Insert a new task and assign its id
    async fn create(&self, task: NewTask) -> TaskResult<Task>;

    /// Overwrite an existing task
    async fn update(&self, task: Task) -> TaskResult<Task>;
}

#[derive(Debug, Default)]
struct TaskStore {
    tasks: BTreeMap<i64, Task>,
    last_id: i64,
}

impl TaskStore {
    fn name_taken_by_other(&self, name: &str, id: Option<i64>) -> bool {
        self.tasks
            .values()
            .any(|t| t.name == name && Some(t.id) != id)
    }
}

/// In-memory implementation of TaskRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<TaskStore>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.values().find(|t| t.name == name).cloned())
    }

    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.values().cloned().collect())
    }

    async fn find_by_filter(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn create(&self, task: NewTask) -> TaskResult<Task> {
        let mut store = self.store.write().await;

        if store.name_taken_by_other(&task.name, None) {
            return Err(TaskError::NameTaken(task.name));
        }

        store.last_id += 1;
        let task = Task {
            id: store.last_id,
            name: task.name,
            description: task.description,
            status: task.status,
            assigned_user_id: task.assigned_user_id,
        };
        store.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let mut store = self.store.write().await;

        if !store.tasks.contains_key(&task.id) {
            return Err(TaskError::NotFound(task.id));
        }
        if store.name_taken_by_other(&task.name, Some(task.id)) {
            return Err(TaskError::NameTaken(task.name));
        }

        store.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Updated task");
        Ok(task)
    }
}
