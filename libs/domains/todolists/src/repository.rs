use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{TodoListError, TodoListResult};
use crate::models::{NewTodoList, TodoList};

/// Repository trait for TodoList persistence
///
/// `create` must reject a taken name with [`TodoListError::NameTaken`] and
/// store the list together with its task ids atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> TodoListResult<Option<TodoList>>;

    async fn find_by_name(&self, name: &str) -> TodoListResult<Option<TodoList>>;

    /// All lists, ordered by id
    async fn find_all(&self) -> TodoListResult<Vec<TodoList>>;

    async fn create(&self, list: NewTodoList) -> TodoListResult<TodoList>;

    /// Delete a list. Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> TodoListResult<bool>;
}

#[derive(Debug, Default)]
struct TodoListStore {
    lists: BTreeMap<i64, TodoList>,
    last_id: i64,
}

/// In-memory implementation of TodoListRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryTodoListRepository {
    store: Arc<RwLock<TodoListStore>>,
}

impl InMemoryTodoListRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoListRepository for InMemoryTodoListRepository {
    async fn find_by_id(&self, id: i64) -> TodoListResult<Option<TodoList>> {
        let store = self.store.read().await;
        Ok(store.lists.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> TodoListResult<Option<TodoList>> {
        let store = self.store.read().await;
        Ok(store.lists.values().find(|l| l.name == name).cloned())
    }

    async fn find_all(&self) -> TodoListResult<Vec<TodoList>> {
        let store = self.store.read().await;
        Ok(store.lists.values().cloned().collect())
    }

    async fn create(&self, list: NewTodoList) -> TodoListResult<TodoList> {
        let mut store = self.store.write().await;

        if store.lists.values().any(|l| l.name == list.name) {
            return Err(TodoListError::NameTaken(list.name));
        }

        store.last_id += 1;
        let list = TodoList {
            id: store.last_id,
            name: list.name,
            task_ids: list.task_ids,
        };
        store.lists.insert(list.id, list.clone());

        tracing::info!(todo_list_id = list.id, tasks = list.task_ids.len(), "Created todo list");
        Ok(list)
    }

    async fn delete(&self, id: i64) -> TodoListResult<bool> {
        let mut store = self.store.write().await;
        let deleted = store.lists.remove(&id).is_some();

        if deleted {
            tracing::info!(todo_list_id = id, "Deleted todo list");
        }
        Ok(deleted)
    }
}
