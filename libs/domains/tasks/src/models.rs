use domain_users::User;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Task status. Any status may replace any other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    #[sea_orm(string_value = "not_started")]
    NotStarted,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "complete")]
    Complete,
}

/// Task entity as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: i64,
    /// Unique across all tasks
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Id of the assigned user; may outlive the user
    pub assigned_user_id: Option<i64>,
}

/// A task that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assigned_user_id: Option<i64>,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    /// Assignee by user name; must name an existing user when present
    #[validate(length(max = 255))]
    pub user_name: Option<String>,
}

/// DTO for overwriting a task
///
/// All fields replace the stored values. A missing or blank `user_name`
/// clears the assignment.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[validate(length(max = 255))]
    pub user_name: Option<String>,
}

/// Query filters for listing tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status == status)
    }
}

/// Task with its assignee resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assigned_user_id: Option<i64>,
    /// `None` when unassigned or when the user has since been deleted
    pub assigned_user: Option<User>,
}

impl TaskResponse {
    pub fn new(task: Task, assigned_user: Option<User>) -> Self {
        Self {
            id: task.id,
            name: task.name,
            description: task.description,
            status: task.status,
            assigned_user_id: task.assigned_user_id,
            assigned_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::NotStarted).unwrap(),
            "\"NOT_STARTED\""
        );
        assert_eq!(TaskStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(TaskStatus::from_str("COMPLETE").unwrap(), TaskStatus::Complete);
    }

    #[test]
    fn test_create_task_defaults_status() {
        let input: CreateTask = serde_json::from_str(r#"{"name":"task1"}"#).unwrap();
        assert_eq!(input.status, TaskStatus::NotStarted);
        assert_eq!(input.user_name, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_task_rejects_blank_name() {
        let input: UpdateTask = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_filter_matches_status() {
        let task = Task {
            id: 1,
            name: "task1".to_string(),
            description: None,
            status: TaskStatus::Complete,
            assigned_user_id: None,
        };

        assert!(TaskFilter::default().matches(&task));
        assert!(
            TaskFilter {
                status: Some(TaskStatus::Complete)
            }
            .matches(&task)
        );
        assert!(
            !TaskFilter {
                status: Some(TaskStatus::InProgress)
            }
            .matches(&task)
        );
    }
}
