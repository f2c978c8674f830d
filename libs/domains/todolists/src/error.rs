use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_tasks::TaskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoListError {
    #[error("TodoList not found: {0}")]
    NotFound(i64),

    #[error("TodoList with name '{0}' already exists")]
    NameTaken(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TodoListResult<T> = Result<T, TodoListError>;

impl From<TodoListError> for AppError {
    fn from(err: TodoListError) -> Self {
        match err {
            TodoListError::NotFound(id) => {
                AppError::NotFound(format!("TodoList {} not found", id))
            }
            TodoListError::NameTaken(name) => {
                AppError::Conflict(format!("TodoList with name '{}' already exists", name))
            }
            TodoListError::Validation(msg) => AppError::BadRequest(msg),
            TodoListError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for TodoListError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Task lookups made while resolving list members
impl From<TaskError> for TodoListError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Database(msg) => TodoListError::Database(msg),
            other => TodoListError::Validation(other.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for TodoListError {
    fn from(err: sea_orm::DbErr) -> Self {
        TodoListError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TodoListError {
    fn from(err: validator::ValidationErrors) -> Self {
        TodoListError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (TodoListError::NotFound(3), StatusCode::NOT_FOUND),
            (TodoListError::NameTaken("L1".into()), StatusCode::CONFLICT),
            (TodoListError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                TodoListError::Database("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_task_store_failure_stays_a_database_error() {
        let err: TodoListError = TaskError::Database("pool closed".into()).into();
        assert!(matches!(err, TodoListError::Database(msg) if msg == "pool closed"));
    }
}
