//! Sample data for local development.
//!
//! Everything goes through the services so the usual checks apply. Records
//! whose name already exists are skipped, which makes seeding safe to repeat
//! against a persistent database.

use domain_tasks::{CreateTask, TaskError, TaskRepository, TaskStatus};
use domain_todolists::{CreateTodoList, TodoListError, TodoListRepository};
use domain_users::{CreateUser, UserError, UserRepository};
use tracing::{debug, info};

use crate::state::Services;

const USERS: [&str; 3] = ["niceUser1", "niceUser2", "niceUser3"];

const TASKS: [(&str, &str, TaskStatus, &str); 3] = [
    ("task1", "description1", TaskStatus::NotStarted, "niceUser1"),
    ("task2", "description2", TaskStatus::Complete, "niceUser2"),
    ("task3", "description3", TaskStatus::InProgress, "niceUser3"),
];

const TODO_LISTS: [(&str, &[&str]); 2] = [
    ("todolist1", &["task1", "task2"]),
    ("todolist2", &["task3"]),
];

pub async fn seed<U, T, L>(services: &Services<U, T, L>) -> eyre::Result<()>
where
    U: UserRepository + Clone,
    T: TaskRepository + Clone,
    L: TodoListRepository + Clone,
{
    for user_name in USERS {
        let input = CreateUser {
            user_name: user_name.to_string(),
        };
        match services.users.create_user(input).await {
            Ok(user) => info!(user_id = user.id, user_name, "Seeded user"),
            Err(UserError::NameTaken(_)) => debug!(user_name, "User already present"),
            Err(e) => return Err(e.into()),
        }
    }

    for (name, description, status, user_name) in TASKS {
        let input = CreateTask {
            name: name.to_string(),
            description: Some(description.to_string()),
            status,
            user_name: Some(user_name.to_string()),
        };
        match services.tasks.create_task(input).await {
            Ok(task) => info!(task_id = task.id, name, "Seeded task"),
            Err(TaskError::NameTaken(_)) => debug!(name, "Task already present"),
            Err(e) => return Err(e.into()),
        }
    }

    let tasks = services.tasks.get_all_tasks().await?;
    for (name, members) in TODO_LISTS {
        let task_ids = members
            .iter()
            .filter_map(|member| tasks.iter().find(|t| t.name == *member).map(|t| t.id))
            .collect();

        let input = CreateTodoList {
            name: name.to_string(),
            task_ids,
        };
        match services.todo_lists.create_todo_list(input).await {
            Ok(list) => info!(todo_list_id = list.id, name, "Seeded todo list"),
            Err(TodoListError::NameTaken(_)) => debug!(name, "Todo list already present"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
