//! Service wiring.
//!
//! The services are generic over their stores, so one [`Services`] value is
//! built per storage backend. Stores are cloned into every service that
//! needs them; clones share the same underlying data.

use domain_tasks::{InMemoryTaskRepository, PgTaskRepository, TaskRepository, TaskService};
use domain_todolists::{
    InMemoryTodoListRepository, PgTodoListRepository, TodoListRepository, TodoListService,
};
use domain_users::{InMemoryUserRepository, PgUserRepository, UserRepository, UserService};
use sea_orm::DatabaseConnection;

/// All services of the application
#[derive(Clone)]
pub struct Services<U, T, L>
where
    U: UserRepository + Clone,
    T: TaskRepository + Clone,
    L: TodoListRepository + Clone,
{
    pub users: UserService<U>,
    pub tasks: TaskService<T, U>,
    pub todo_lists: TodoListService<L, T>,
}

impl<U, T, L> Services<U, T, L>
where
    U: UserRepository + Clone,
    T: TaskRepository + Clone,
    L: TodoListRepository + Clone,
{
    pub fn new(users: U, tasks: T, todo_lists: L) -> Self {
        Self {
            users: UserService::new(users.clone()),
            tasks: TaskService::new(tasks.clone(), users),
            todo_lists: TodoListService::new(todo_lists, tasks),
        }
    }
}

pub type InMemoryServices =
    Services<InMemoryUserRepository, InMemoryTaskRepository, InMemoryTodoListRepository>;

pub type PgServices = Services<PgUserRepository, PgTaskRepository, PgTodoListRepository>;

impl InMemoryServices {
    pub fn in_memory() -> Self {
        Self::new(
            InMemoryUserRepository::new(),
            InMemoryTaskRepository::new(),
            InMemoryTodoListRepository::new(),
        )
    }
}

impl PgServices {
    pub fn postgres(db: &DatabaseConnection) -> Self {
        Self::new(
            PgUserRepository::new(db.clone()),
            PgTaskRepository::new(db.clone()),
            PgTodoListRepository::new(db.clone()),
        )
    }
}
