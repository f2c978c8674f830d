use domain_tasks::Task;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// TodoList as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoList {
    pub id: i64,
    /// Unique across all todo lists
    pub name: String,
    /// Member task ids in list order
    pub task_ids: Vec<i64>,
}

/// A todo list that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoList {
    pub name: String,
    pub task_ids: Vec<i64>,
}

/// DTO for creating a todo list
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTodoList {
    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    /// Ids that do not name an existing task are ignored
    #[serde(default)]
    pub task_ids: Vec<i64>,
}

/// TodoList with its member tasks resolved, in list order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoListResponse {
    pub id: i64,
    pub name: String,
    pub tasks: Vec<Task>,
}

impl TodoListResponse {
    pub fn new(list: TodoList, tasks: Vec<Task>) -> Self {
        Self {
            id: list.id,
            name: list.name,
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_todo_list_defaults_to_no_tasks() {
        let input: CreateTodoList = serde_json::from_str(r#"{"name":"L1"}"#).unwrap();
        assert!(input.task_ids.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_invalid() {
        let input = CreateTodoList {
            name: " ".to_string(),
            task_ids: vec![1],
        };
        assert!(input.validate().is_err());
    }
}
