//! TodoLists Domain
//!
//! A todo list is a named, ordered collection of task ids. Lists reference
//! tasks without owning them: deleting a list never deletes its tasks, and
//! ids that do not resolve to a task at creation time are dropped.
//!
//! ```rust,no_run
//! use domain_tasks::PgTaskRepository;
//! use domain_todolists::{PgTodoListRepository, TodoListService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = TodoListService::new(
//!     PgTodoListRepository::new(db.clone()),
//!     PgTaskRepository::new(db),
//! );
//! let lists = service.get_all_todo_lists().await?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TodoListError, TodoListResult};
pub use handlers::ApiDoc;
pub use models::{CreateTodoList, NewTodoList, TodoList, TodoListResponse};
pub use postgres::PgTodoListRepository;
pub use repository::{InMemoryTodoListRepository, TodoListRepository};
pub use service::TodoListService;
