use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_users::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i64),

    #[error("Task with name '{0}' already exists")]
    NameTaken(String),

    /// The assignee named in the request does not exist
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            TaskError::NameTaken(name) => {
                AppError::Conflict(format!("Task with name '{}' already exists", name))
            }
            TaskError::UserNotFound(user) => {
                AppError::ReferenceNotFound(format!("No user named '{}'", user))
            }
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            TaskError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// User lookups made while handling a task request
impl From<UserError> for TaskError {
    fn from(err: UserError) -> Self {
        match err {
            // Assignees are resolved by name, so an id lookup miss is a store fault.
            UserError::NotFound(id) => {
                TaskError::Database(format!("user {} missing during assignee lookup", id))
            }
            UserError::NameTaken(name) => TaskError::Validation(format!(
                "user name '{}' is already taken",
                name
            )),
            UserError::Validation(msg) => TaskError::Validation(msg),
            UserError::Database(msg) => TaskError::Database(msg),
        }
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TaskError {
    fn from(err: validator::ValidationErrors) -> Self {
        TaskError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_miss_is_a_database_error() {
        let err: TaskError = UserError::NotFound(7).into();
        assert!(matches!(err, TaskError::Database(ref msg) if msg.contains('7')));
    }

    #[test]
    fn test_user_database_error_is_kept() {
        let err: TaskError = UserError::Database("pool closed".to_string()).into();
        assert!(matches!(err, TaskError::Database(ref msg) if msg == "pool closed"));
    }
}
