//! Users Domain
//!
//! Users are identified by a store-assigned `i64` id and a `user_name` that
//! is unique across all users. Tasks reference users by id only, so deleting
//! a user never touches tasks.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, UserService, CreateUser};
//!
//! # async fn example() -> Result<(), domain_users::UserError> {
//! let service = UserService::new(InMemoryUserRepository::new());
//! let user = service
//!     .create_user(CreateUser { user_name: "alice".to_string() })
//!     .await?;
//! assert_eq!(user.id, 1);
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

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, UpdateUser, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
